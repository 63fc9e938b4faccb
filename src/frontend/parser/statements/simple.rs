//! Input/output and single-keyword statements

use crate::frontend::lexer::tokens::TokenKind;
use crate::frontend::parser::ast::*;
use crate::frontend::parser::parser_state::{ParseResult, ParserState};

impl ParserState<'_> {
    /// (`ввод`|`вывод`) ioArgument (`,` ioArgument)*
    pub fn parse_io(&mut self) -> ParseResult<StmtKind> {
        let direction = match self.bump().kind {
            TokenKind::KwInput => IoDirection::Input,
            _ => IoDirection::Output,
        };

        let mut args = NonEmpty::new(self.parse_io_argument()?);
        while self.skip(&TokenKind::Comma) {
            args.push(self.parse_io_argument()?);
        }

        Ok(StmtKind::Io { direction, args })
    }

    /// ioArgument → expression (`:` width (`:` precision)?)?
    ///
    /// `нс` is an ordinary expression here.
    fn parse_io_argument(&mut self) -> ParseResult<IoArgument> {
        let value = self.parse_expression()?;
        let start = value.span;

        let width = if self.skip(&TokenKind::Colon) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        let precision = if width.is_some() && self.skip(&TokenKind::Colon) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(IoArgument {
            value,
            width,
            precision,
            span: self.span_from(start),
        })
    }

    /// `утв` expression
    pub fn parse_assertion(&mut self) -> ParseResult<StmtKind> {
        self.expect(&TokenKind::KwAssert)?;
        Ok(StmtKind::Assertion(self.parse_expression()?))
    }
}
