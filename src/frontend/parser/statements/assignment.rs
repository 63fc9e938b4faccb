//! Assignment and procedure-call statements
//!
//! Both start with an expression-like prefix. The parser first tries
//! `lvalue :=`; when that fails the cursor goes back and the same tokens are
//! read as a bare expression.

use crate::frontend::lexer::tokens::TokenKind;
use crate::frontend::parser::ast::*;
use crate::frontend::parser::error::Expected;
use crate::frontend::parser::parser_state::{ParseResult, ParserState};

impl ParserState<'_> {
    /// lvalue → identifier (`[` indexList `]`)? | `знач`
    pub fn parse_lvalue(&mut self) -> ParseResult<LValue> {
        match self.kind() {
            TokenKind::KwReturnValue => Ok(LValue::ReturnValue(self.bump().span)),
            TokenKind::Identifier(_) => {
                let name = self.expect_ident()?;
                if !self.skip(&TokenKind::LBracket) {
                    return Ok(LValue::Plain(name));
                }
                let indices = self.parse_expression_list()?;
                self.expect_closing(&TokenKind::RBracket)?;
                Ok(LValue::Indexed {
                    span: self.span_from(name.span),
                    name,
                    indices,
                })
            }
            _ => Err(self.unexpected(vec![Expected::Rule("assignment target")])),
        }
    }

    /// assignment → lvalue `:=` expression, falling back to a bare expression
    pub fn parse_assignment_or_call(&mut self) -> ParseResult<StmtKind> {
        let target = self.speculate(|state| {
            let target = state.parse_lvalue()?;
            state.expect(&TokenKind::Assign)?;
            Ok(target)
        })?;

        if let Some(target) = target {
            let value = self.parse_expression()?;
            return Ok(StmtKind::Assignment { target, value });
        }

        let call = self.parse_expression()?;
        self.note("statement without `:=` read as a procedure call", call.span);
        Ok(StmtKind::ProcedureCall { call })
    }
}
