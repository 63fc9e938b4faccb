//! Type specifiers, variable and parameter declarations

use crate::frontend::lexer::tokens::TokenKind;
use crate::frontend::parser::ast::*;
use crate::frontend::parser::error::Expected;
use crate::frontend::parser::parser_state::{ParseResult, ParserState};

/// Type specifier for a single type keyword
fn type_from_token(kind: &TokenKind) -> Option<TypeSpecifier> {
    let basic = |ty| TypeSpecifier::Basic { ty, table: false };
    let spec = match kind {
        TokenKind::KwInt => basic(BasicType::Int),
        TokenKind::KwReal => basic(BasicType::Real),
        TokenKind::KwBool => basic(BasicType::Bool),
        TokenKind::KwChar => basic(BasicType::Char),
        TokenKind::KwString => basic(BasicType::String),
        TokenKind::KwIntTable => TypeSpecifier::Array(ArrayType::Int),
        TokenKind::KwRealTable => TypeSpecifier::Array(ArrayType::Real),
        TokenKind::KwCharTable => TypeSpecifier::Array(ArrayType::Char),
        TokenKind::KwStringTable => TypeSpecifier::Array(ArrayType::String),
        TokenKind::KwBoolTable => TypeSpecifier::Array(ArrayType::Bool),
        TokenKind::KwComplex => TypeSpecifier::Actor(ActorType::Complex),
        TokenKind::KwColor => TypeSpecifier::Actor(ActorType::Color),
        TokenKind::KwScancode => TypeSpecifier::Actor(ActorType::Scancode),
        TokenKind::KwFile => TypeSpecifier::Actor(ActorType::File),
        _ => return None,
    };
    Some(spec)
}

impl ParserState<'_> {
    /// Number of tokens a type specifier starting `n` tokens ahead would
    /// take (0 when there is none)
    pub fn type_len_at(
        &self,
        n: usize,
    ) -> usize {
        let kind = &self.peek_nth(n).kind;
        if kind.is_basic_type() && self.peek_nth(n + 1).kind == TokenKind::KwTable {
            2
        } else if kind.starts_type() {
            1
        } else {
            0
        }
    }

    /// typeSpecifier → arrayType | basicType `таб`? | actorType
    pub fn parse_type_specifier(&mut self) -> ParseResult<TypeSpecifier> {
        let Some(mut spec) = type_from_token(self.kind()) else {
            return Err(self.unexpected(vec![Expected::Rule("type")]));
        };
        self.bump();

        if let TypeSpecifier::Basic { table, .. } = &mut spec {
            *table = self.skip(&TokenKind::KwTable);
        }

        Ok(spec)
    }

    /// variableDeclaration → typeSpecifier variableList
    pub fn parse_var_decl(&mut self) -> ParseResult<VarDecl> {
        let start = self.span();
        let ty = self.parse_type_specifier()?;
        let vars = self.parse_var_list()?;
        Ok(VarDecl {
            ty,
            vars,
            span: self.span_from(start),
        })
    }

    /// variableList → item (`,` item)*
    ///
    /// A comma is only taken when an identifier follows, so a parameter
    /// list can continue with the next typed group.
    pub fn parse_var_list(&mut self) -> ParseResult<NonEmpty<VarItem>> {
        let mut vars = NonEmpty::new(self.parse_var_item()?);
        while self.at(&TokenKind::Comma) && matches!(self.peek().kind, TokenKind::Identifier(_)) {
            self.bump();
            vars.push(self.parse_var_item()?);
        }
        Ok(vars)
    }

    /// item → identifier (`[` bounds (`,` bounds)* `]`)? (`=` expression)?
    pub fn parse_var_item(&mut self) -> ParseResult<VarItem> {
        let name = self.expect_ident()?;

        let bounds = if self.skip(&TokenKind::LBracket) {
            let mut bounds = NonEmpty::new(self.parse_array_bounds()?);
            while self.skip(&TokenKind::Comma) {
                bounds.push(self.parse_array_bounds()?);
            }
            self.expect_closing(&TokenKind::RBracket)?;
            Some(bounds)
        } else {
            None
        };

        let init = if self.skip(&TokenKind::Eq) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(VarItem {
            span: self.span_from(name.span),
            name,
            bounds,
            init,
        })
    }

    /// arrayBounds → expression `:` expression
    fn parse_array_bounds(&mut self) -> ParseResult<ArrayBounds> {
        let lower = self.parse_expression()?;
        self.expect(&TokenKind::Colon)?;
        let upper = self.parse_expression()?;
        Ok(ArrayBounds { lower, upper })
    }

    /// parameterDeclaration → (`арг`|`рез`|`аргрез`)? typeSpecifier variableList
    pub fn parse_param_decl(&mut self) -> ParseResult<ParamDecl> {
        let start = self.span();
        let mode = match self.kind() {
            TokenKind::KwArg => Some(ParamMode::In),
            TokenKind::KwRes => Some(ParamMode::Out),
            TokenKind::KwArgRes => Some(ParamMode::InOut),
            _ => None,
        };
        if mode.is_some() {
            self.bump();
        }

        let ty = self.parse_type_specifier()?;
        let vars = self.parse_var_list()?;
        Ok(ParamDecl {
            mode,
            ty,
            vars,
            span: self.span_from(start),
        })
    }

    /// parameterList → parameterDeclaration (`,` parameterDeclaration)*
    pub fn parse_param_list(&mut self) -> ParseResult<NonEmpty<ParamDecl>> {
        let mut params = NonEmpty::new(self.parse_param_decl()?);
        while self.skip(&TokenKind::Comma) {
            params.push(self.parse_param_decl()?);
        }
        Ok(params)
    }
}
