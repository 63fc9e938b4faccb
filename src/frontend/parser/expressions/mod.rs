//! Expression parsing
//!
//! Binary levels use precedence climbing over the table in `precedence`;
//! prefix operators bind tighter than `**`, so `-2**2` is `(-2)**2`.

pub mod precedence;
pub mod primary;

pub use precedence::*;

use crate::frontend::lexer::tokens::TokenKind;
use crate::frontend::parser::ast::*;
use crate::frontend::parser::parser_state::{ParseResult, ParserState};

impl ParserState<'_> {
    /// expression → logicalOr
    pub fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_expr_bp(BP_LOWEST)
    }

    /// Parse a binary expression whose operators all bind at least `min_bp`
    pub fn parse_expr_bp(
        &mut self,
        min_bp: u8,
    ) -> ParseResult<Expr> {
        self.nested(|state| {
            let mut lhs = state.parse_unary()?;

            while let Some((op, bp, assoc)) = infix_binding(state.kind()) {
                if bp < min_bp {
                    break;
                }
                state.bump();

                let rhs = state.parse_expr_bp(right_operand_bp(bp, assoc))?;
                let span = lhs.span.to(rhs.span);
                lhs = Expr::new(
                    ExprKind::Binary {
                        op,
                        lhs: Box::new(lhs),
                        rhs: Box::new(rhs),
                    },
                    span,
                );
            }

            Ok(lhs)
        })
    }

    /// unary → (`+`|`-`|`не`) unary | postfix
    pub fn parse_unary(&mut self) -> ParseResult<Expr> {
        let Some(op) = prefix_op(self.kind()) else {
            return self.parse_postfix();
        };

        self.nested(|state| {
            let start = state.bump().span;
            let operand = state.parse_unary()?;
            let span = start.to(operand.span);
            Ok(Expr::new(
                ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                span,
            ))
        })
    }

    /// expressionList → expression (`,` expression)*
    pub fn parse_expression_list(&mut self) -> ParseResult<NonEmpty<Expr>> {
        let mut list = NonEmpty::new(self.parse_expression()?);
        while self.skip(&TokenKind::Comma) {
            list.push(self.parse_expression()?);
        }
        Ok(list)
    }
}
