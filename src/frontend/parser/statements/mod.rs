//! Statement parsing
//!
//! `parse_statement` dispatches on the first token; every form may be
//! followed by a `;` which is recorded in `Stmt::terminated`.

pub mod assignment;
pub mod control_flow;
pub mod declarations;
pub mod simple;

use crate::frontend::lexer::tokens::TokenKind;
use crate::frontend::parser::ast::*;
use crate::frontend::parser::error::Expected;
use crate::frontend::parser::parser_state::{is_block_terminator, starts_expression, ParseResult, ParserState};

impl ParserState<'_> {
    /// statementSequence → statement*, up to the next block terminator
    ///
    /// A malformed statement is recorded and skipped; its siblings are
    /// still parsed.
    pub fn parse_statement_sequence(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut stmts = Vec::new();

        while !is_block_terminator(self.kind()) {
            let start = self.save_position();
            match self.parse_statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(err) => {
                    self.absorb(err)?;
                    self.synchronize_statement(start);
                }
            }
        }

        Ok(stmts)
    }

    /// Parse one statement
    pub fn parse_statement(&mut self) -> ParseResult<Stmt> {
        self.nested(|state| {
            let start = state.span();
            let first = state.kind().clone();

            let kind = match &first {
                TokenKind::Semicolon => {
                    state.bump();
                    return Ok(Stmt {
                        kind: StmtKind::Empty,
                        terminated: false,
                        span: start,
                    });
                }
                kind if kind.starts_type() => StmtKind::VarDecl(state.parse_var_decl()?),
                TokenKind::KwInput | TokenKind::KwOutput => state.parse_io()?,
                TokenKind::KwIf => state.parse_if()?,
                TokenKind::KwSwitch => state.parse_switch()?,
                TokenKind::KwLoop => state.parse_loop()?,
                TokenKind::KwExit => {
                    state.bump();
                    StmtKind::Exit
                }
                TokenKind::KwPause => {
                    state.bump();
                    StmtKind::Pause
                }
                TokenKind::KwStop => {
                    state.bump();
                    StmtKind::Stop
                }
                TokenKind::KwAssert => state.parse_assertion()?,
                kind if starts_expression(kind) => state.parse_assignment_or_call()?,
                _ => return Err(state.unexpected(vec![Expected::Rule("statement")])),
            };

            let span = state.span_from(start);
            let terminated = state.skip(&TokenKind::Semicolon);
            Ok(Stmt {
                kind,
                terminated,
                span,
            })
        })
    }
}
