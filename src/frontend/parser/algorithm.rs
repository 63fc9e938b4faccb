//! Algorithm definitions
//!
//! ```text
//! алг [тип] имя из нескольких слов [(параметры)] [;]
//!   [дано … | надо … | объявления]*
//! нач
//!   …
//! кон [имя] [;]
//! ```

use crate::frontend::lexer::tokens::{Token, TokenKind};
use crate::frontend::parser::ast::*;
use crate::frontend::parser::error::{Expected, ParseError};
use crate::frontend::parser::parser_state::{ParseResult, ParserState};

/// Tokens that end an algorithm name
fn is_name_boundary(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::LParen
            | TokenKind::KwBegin
            | TokenKind::KwPre
            | TokenKind::KwPost
            | TokenKind::Semicolon
            | TokenKind::Eof
    )
}

/// Block terminators that cannot close an algorithm body
fn is_stray_terminator(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::KwElse
            | TokenKind::KwFi
            | TokenKind::KwCase
            | TokenKind::KwEndLoop
            | TokenKind::KwEndLoopCond
            | TokenKind::KwBegin
    )
}

impl ParserState<'_> {
    /// algorithmDefinition → header (pre | post | varDecl)* `нач` seq `кон` echo? `;`?
    pub fn parse_algorithm(&mut self) -> ParseResult<AlgorithmDef> {
        let header = self.parse_algorithm_header()?;
        let start = header.span;

        let mut prologue = Vec::new();
        loop {
            match self.kind() {
                TokenKind::KwBegin => break,
                TokenKind::KwPre => {
                    self.bump();
                    prologue.push(Prologue::Pre(self.parse_expression()?));
                    self.skip(&TokenKind::Semicolon);
                }
                TokenKind::KwPost => {
                    self.bump();
                    prologue.push(Prologue::Post(self.parse_expression()?));
                    self.skip(&TokenKind::Semicolon);
                }
                kind if kind.starts_type() => {
                    prologue.push(Prologue::Decl(self.parse_var_decl()?));
                    self.skip(&TokenKind::Semicolon);
                }
                TokenKind::Eof => {
                    return Err(ParseError::IncompleteConstruct {
                        rule: "algorithm",
                        span: self.span(),
                    })
                }
                _ => {
                    return Err(self.unexpected(vec![
                        Expected::Token(TokenKind::KwBegin),
                        Expected::Token(TokenKind::KwPre),
                        Expected::Token(TokenKind::KwPost),
                        Expected::Rule("declaration"),
                    ]))
                }
            }
        }

        self.expect(&TokenKind::KwBegin)?;
        let mut body = self.parse_statement_sequence()?;
        while is_stray_terminator(self.kind()) {
            let err = self.unexpected(vec![Expected::Token(TokenKind::KwEnd)]);
            self.absorb(err)?;
            self.bump();
            body.extend(self.parse_statement_sequence()?);
        }
        if let Err(err) = self.expect_end(&TokenKind::KwEnd, "algorithm") {
            self.absorb(err)?;
        }

        let end_name = self.parse_name_echo();
        let terminated = self.skip(&TokenKind::Semicolon);

        Ok(AlgorithmDef {
            header,
            prologue,
            body,
            end_name,
            terminated,
            span: self.span_from(start),
        })
    }

    /// algorithmHeader → `алг` typeSpecifier? nameTokens (`(` parameterList? `)`)? `;`?
    pub fn parse_algorithm_header(&mut self) -> ParseResult<AlgorithmHeader> {
        let alg = self.expect(&TokenKind::KwAlg)?;
        let header_line = alg.span.start.line;

        // A type right before a boundary (or the end of the line) is the name
        // itself, not a return type.
        let type_len = self.type_len_at(0);
        let after_type = self.peek_nth(type_len);
        let takes_return_type = type_len > 0
            && !is_name_boundary(&after_type.kind)
            && after_type.span.start.line <= header_line;
        let return_type = if takes_return_type {
            Some(self.parse_type_specifier()?)
        } else {
            if type_len > 0 {
                self.note("type keyword before a name boundary read as the algorithm name", self.span());
            }
            None
        };

        let name = self.parse_algorithm_name(header_line)?;

        let params = if self.skip(&TokenKind::LParen) {
            let params = if self.at(&TokenKind::RParen) {
                None
            } else {
                Some(self.parse_param_list()?)
            };
            self.expect_closing(&TokenKind::RParen)?;
            params
        } else {
            None
        };

        let span = self.span_from(alg.span);
        let terminated = self.skip(&TokenKind::Semicolon);

        tracing::debug!("algorithm header `{}`", name.text());
        Ok(AlgorithmHeader {
            return_type,
            name,
            params,
            terminated,
            span,
        })
    }

    /// One or more tokens up to a boundary token or the end of the header
    /// line
    fn parse_algorithm_name(
        &mut self,
        header_line: usize,
    ) -> ParseResult<AlgorithmName> {
        let mut tokens: Vec<Token> = Vec::new();
        while !is_name_boundary(self.kind()) {
            if !tokens.is_empty() && self.current().span.start.line > header_line {
                break;
            }
            tokens.push(self.bump());
        }

        match NonEmpty::from_vec(tokens) {
            Some(tokens) => {
                let span = tokens.first.span.to(tokens.last().span);
                Ok(AlgorithmName { tokens, span })
            }
            None => Err(self.unexpected(vec![Expected::Rule("algorithm name")])),
        }
    }

    /// Identifiers after `кон` / `конец_модуля`; an identifier that starts
    /// an assignment is left alone
    pub(crate) fn parse_name_echo(&mut self) -> Option<NonEmpty<Ident>> {
        let mut names = Vec::new();
        while matches!(self.kind(), TokenKind::Identifier(_)) && self.peek().kind != TokenKind::Assign {
            match self.expect_ident() {
                Ok(ident) => names.push(ident),
                Err(_) => break,
            }
        }
        NonEmpty::from_vec(names)
    }
}
