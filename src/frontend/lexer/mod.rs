//! Lexer module
//!
//! Turns source text into the token stream the parser consumes. Newlines and
//! comments (`| …`, `# …`) are dropped; the stream always ends in `Eof`.

pub mod keywords;
pub mod literals;
pub mod tokenizer;
pub mod tokens;

#[cfg(test)]
mod tests;

pub use tokenizer::Lexer;
pub use tokens::{Color, LexError, Token, TokenKind};

use crate::util::span::Span;

/// Tokenize source code
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    tracing::debug!("lexing {} bytes", source.len());

    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next_token() {
        tracing::trace!("token {} at {}", token.kind, token.span.start);
        tokens.push(token);
    }

    if let Some(err) = lexer.error.take() {
        tracing::debug!("lexing failed: {}", err);
        return Err(err);
    }

    let end = lexer.position();
    tokens.push(Token::new(TokenKind::Eof, "", Span::new(end, end)));
    tracing::debug!("lexing complete, {} tokens", tokens.len());
    Ok(tokens)
}
