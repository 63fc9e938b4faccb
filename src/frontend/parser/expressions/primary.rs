//! Primary and postfix expressions

use crate::frontend::lexer::tokens::TokenKind;
use crate::frontend::parser::ast::*;
use crate::frontend::parser::error::Expected;
use crate::frontend::parser::parser_state::{ParseResult, ParserState};

impl ParserState<'_> {
    /// postfix → primary (`[` indexList `]` | `(` argumentList? `)`)*
    pub fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;

        loop {
            match self.kind() {
                TokenKind::LBracket => {
                    self.bump();
                    let indices = self.parse_expression_list()?;
                    self.expect_closing(&TokenKind::RBracket)?;
                    let span = self.span_from(expr.span);
                    expr = Expr::new(
                        ExprKind::Index {
                            target: Box::new(expr),
                            indices,
                        },
                        span,
                    );
                }
                TokenKind::LParen => {
                    self.bump();
                    let args = if self.at(&TokenKind::RParen) {
                        None
                    } else {
                        Some(self.parse_expression_list()?)
                    };
                    self.expect_closing(&TokenKind::RParen)?;
                    let span = self.span_from(expr.span);
                    expr = Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        span,
                    );
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    /// primary → literal | identifier | `знач` | `(` expression `)` | arrayLiteral
    pub fn parse_primary(&mut self) -> ParseResult<Expr> {
        let span = self.span();
        let kind = match self.kind() {
            TokenKind::IntLiteral(n) => ExprKind::Int(*n),
            TokenKind::RealLiteral(r) => ExprKind::Real(*r),
            TokenKind::StringLiteral(s) => ExprKind::Str(s.clone()),
            TokenKind::CharLiteral(c) => ExprKind::Char(*c),
            TokenKind::BoolLiteral(b) => ExprKind::Bool(*b),
            TokenKind::ColorLiteral(color) => ExprKind::Color(*color),
            TokenKind::KwNewline => ExprKind::Newline,
            TokenKind::Identifier(name) => ExprKind::Identifier(name.clone()),
            TokenKind::KwReturnValue => ExprKind::ReturnValue,
            TokenKind::LParen => return self.parse_parenthesized(),
            TokenKind::LBrace => return self.parse_array_literal(),
            _ => return Err(self.unexpected(vec![Expected::Rule("expression")])),
        };
        self.bump();
        Ok(Expr::new(kind, span))
    }

    fn parse_parenthesized(&mut self) -> ParseResult<Expr> {
        let start = self.bump().span;
        let inner = self.parse_expression()?;
        self.expect_closing(&TokenKind::RParen)?;
        Ok(Expr::new(
            ExprKind::Parenthesized(Box::new(inner)),
            self.span_from(start),
        ))
    }

    /// arrayLiteral → `{` expressionList? `}`
    pub fn parse_array_literal(&mut self) -> ParseResult<Expr> {
        let start = self.expect(&TokenKind::LBrace)?.span;
        let items = if self.at(&TokenKind::RBrace) {
            None
        } else {
            Some(self.parse_expression_list()?)
        };
        self.expect_closing(&TokenKind::RBrace)?;
        Ok(Expr::new(ExprKind::ArrayLiteral(items), self.span_from(start)))
    }
}
