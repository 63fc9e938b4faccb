//! Literal scanning implementations
//! Handles number, string, and character literals

use unicode_ident::{is_xid_continue, is_xid_start};

use super::tokenizer::Lexer;
use super::tokens::*;

/// Scan a decimal number: `123`, `1.5`, `2.0e-3`
pub fn scan_number(
    lexer: &mut Lexer<'_>,
    first_char: char,
) -> Option<Token> {
    let mut text = String::new();
    text.push(first_char);
    let mut is_real = false;

    consume_digits(lexer, &mut text);

    if lexer.peek() == Some(&'.') && lexer.peek_next().map(is_digit).unwrap_or(false) {
        is_real = true;
        text.push('.');
        lexer.advance();
        consume_digits(lexer, &mut text);
    }

    if matches!(lexer.peek(), Some(&'e') | Some(&'E')) {
        let next = lexer.peek_next();
        let signed = matches!(next, Some('+') | Some('-'));
        let has_exponent = match next {
            Some(c) if is_digit(c) => true,
            Some('+') | Some('-') => exponent_digit_after_sign(lexer),
            _ => false,
        };
        if has_exponent {
            is_real = true;
            if let Some(e) = lexer.advance() {
                text.push(e);
            }
            if signed {
                if let Some(sign) = lexer.advance() {
                    text.push(sign);
                }
            }
            consume_digits(lexer, &mut text);
        }
    }

    if lexer.peek().map(|&c| is_identifier_char(c)).unwrap_or(false) {
        while let Some(&c) = lexer.peek() {
            if !is_identifier_char(c) {
                break;
            }
            text.push(c);
            lexer.advance();
        }
        return invalid_number(lexer, text);
    }

    let kind = if is_real {
        match text.parse::<f64>() {
            Ok(value) => TokenKind::RealLiteral(value),
            Err(_) => return invalid_number(lexer, text),
        }
    } else {
        match text.parse::<i64>() {
            Ok(value) => TokenKind::IntLiteral(value),
            Err(_) => return invalid_number(lexer, text),
        }
    };

    Some(lexer.make_token(kind))
}

fn consume_digits(
    lexer: &mut Lexer<'_>,
    text: &mut String,
) {
    while let Some(&c) = lexer.peek() {
        if !is_digit(c) {
            break;
        }
        text.push(c);
        lexer.advance();
    }
}

fn exponent_digit_after_sign(lexer: &Lexer<'_>) -> bool {
    lexer.lookahead(2).map(is_digit).unwrap_or(false)
}

fn invalid_number(
    lexer: &mut Lexer<'_>,
    text: String,
) -> Option<Token> {
    let position = lexer.start_position();
    lexer.fail(LexError::InvalidNumber { text, position });
    None
}

/// Scan a string literal; `""` inside the quotes stands for one `"`
pub fn scan_string(lexer: &mut Lexer<'_>) -> Option<Token> {
    let value = scan_quoted(lexer, '"')?;
    Some(lexer.make_token(TokenKind::StringLiteral(value)))
}

/// Scan a character literal: exactly one character between `'` quotes
pub fn scan_char(lexer: &mut Lexer<'_>) -> Option<Token> {
    let value = scan_quoted(lexer, '\'')?;
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(lexer.make_token(TokenKind::CharLiteral(c))),
        _ => {
            let position = lexer.start_position();
            lexer.fail(LexError::InvalidChar { position });
            None
        }
    }
}

fn scan_quoted(
    lexer: &mut Lexer<'_>,
    quote: char,
) -> Option<String> {
    let mut value = String::new();
    loop {
        match lexer.peek().copied() {
            Some(c) if c == quote => {
                lexer.advance();
                if lexer.peek() == Some(&quote) {
                    lexer.advance();
                    value.push(quote);
                } else {
                    return Some(value);
                }
            }
            Some('\n') | None => {
                let position = lexer.start_position();
                lexer.fail(LexError::UnterminatedString { position });
                return None;
            }
            Some(c) => {
                lexer.advance();
                value.push(c);
            }
        }
    }
}

/// Check if character is an ASCII digit
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Check if character can start an identifier
pub fn is_identifier_start(c: char) -> bool {
    c == '_' || is_xid_start(c)
}

/// Check if character can continue an identifier
pub fn is_identifier_char(c: char) -> bool {
    is_xid_continue(c)
}
