//! Modules, global items and the program root

use crate::frontend::lexer::tokens::TokenKind;
use crate::frontend::parser::ast::*;
use crate::frontend::parser::error::{Expected, ParseError};
use crate::frontend::parser::parser_state::{ParseResult, ParserState};

/// First token of an import, global declaration or global assignment
fn starts_program_item(kind: &TokenKind) -> bool {
    matches!(kind, TokenKind::KwImport | TokenKind::Identifier(_)) || kind.starts_type()
}

impl ParserState<'_> {
    /// program → programItem* moduleDefinition+ EOF
    ///
    /// Fills `program` as it goes so a caller still has the partial tree when
    /// the unit is aborted.
    pub fn parse_program_into(
        &mut self,
        program: &mut Program,
    ) -> ParseResult<()> {
        let start = self.span();

        while starts_program_item(self.kind()) {
            let item_start = self.save_position();
            match self.parse_program_item() {
                Ok(item) => program.items.push(item),
                Err(err) => {
                    self.absorb(err)?;
                    self.synchronize_item(item_start);
                }
            }
        }

        while !self.at_end() {
            let module_start = self.save_position();
            let result = match self.kind() {
                TokenKind::KwModule => self.parse_explicit_module(),
                kind if *kind == TokenKind::KwAlg || starts_program_item(kind) => {
                    self.parse_implicit_module()
                }
                _ => Err(self.unexpected(vec![
                    Expected::Token(TokenKind::KwModule),
                    Expected::Token(TokenKind::KwAlg),
                ])),
            };
            match result {
                Ok(module) => program.modules.push(module),
                Err(err) => {
                    self.absorb(err)?;
                    self.synchronize_item(module_start);
                }
            }
        }

        if program.modules.is_empty() {
            if !program.items.is_empty() {
                let body: Vec<ModuleItem> = program.items.drain(..).map(ModuleItem::Global).collect();
                let span = self.span_from(start);
                program.modules.push(ModuleDef::Implicit { body, span });
            } else if !self.has_errors() {
                self.absorb(ParseError::IncompleteConstruct {
                    rule: "program",
                    span: self.span(),
                })?;
            }
        }

        program.span = self.span_from(start);
        Ok(())
    }

    /// programItem → import | globalDeclaration | globalAssignment
    pub fn parse_program_item(&mut self) -> ParseResult<GlobalItem> {
        let start = self.span();

        let kind = match self.kind() {
            TokenKind::KwImport => {
                self.bump();
                GlobalItemKind::Import(self.parse_module_ref()?)
            }
            kind if kind.starts_type() => GlobalItemKind::Declaration(self.parse_var_decl()?),
            TokenKind::Identifier(_) => {
                let target = self.expect_ident()?;
                self.expect(&TokenKind::Assign)?;
                // literal | unaryExpression | arrayLiteral
                let value = self.parse_unary()?;
                GlobalItemKind::Assignment { target, value }
            }
            _ => {
                return Err(self.unexpected(vec![
                    Expected::Token(TokenKind::KwImport),
                    Expected::Rule("declaration"),
                    Expected::Rule("identifier"),
                ]))
            }
        };

        let span = self.span_from(start);
        let terminated = self.skip(&TokenKind::Semicolon);
        Ok(GlobalItem {
            kind,
            terminated,
            span,
        })
    }

    /// moduleName → identifier | string
    fn parse_module_ref(&mut self) -> ParseResult<ModuleRef> {
        match self.kind() {
            TokenKind::Identifier(_) => Ok(ModuleRef::Name(self.expect_ident()?)),
            TokenKind::StringLiteral(path) => {
                let path = path.clone();
                let span = self.bump().span;
                Ok(ModuleRef::Path { path, span })
            }
            _ => Err(self.unexpected(vec![Expected::Rule("module name")])),
        }
    }

    /// `модуль` name `;`? body `конец_модуля` name? `;`?
    pub fn parse_explicit_module(&mut self) -> ParseResult<ModuleDef> {
        let start = self.expect(&TokenKind::KwModule)?.span;
        let name = self.expect_ident()?;
        self.skip(&TokenKind::Semicolon);
        tracing::debug!("module `{}`", name.name);

        let body = self.parse_module_body(true)?;

        let end_name = match self.expect_end(&TokenKind::KwEndModule, "module") {
            Ok(_) => {
                let end_name = if matches!(self.kind(), TokenKind::Identifier(_))
                    && self.peek().kind != TokenKind::Assign
                {
                    Some(self.expect_ident()?)
                } else {
                    None
                };
                self.skip(&TokenKind::Semicolon);
                end_name
            }
            Err(err) => {
                self.absorb(err)?;
                None
            }
        };

        Ok(ModuleDef::Explicit {
            name,
            body,
            end_name,
            span: self.span_from(start),
        })
    }

    /// One or more items and algorithms with no module header
    pub fn parse_implicit_module(&mut self) -> ParseResult<ModuleDef> {
        let start = self.span();
        let body = self.parse_module_body(false)?;
        Ok(ModuleDef::Implicit {
            body,
            span: self.span_from(start),
        })
    }

    /// Items up to `конец_модуля` (explicit) or `модуль` (implicit), or EOF
    fn parse_module_body(
        &mut self,
        explicit: bool,
    ) -> ParseResult<Vec<ModuleItem>> {
        let mut body = Vec::new();

        loop {
            match self.kind() {
                TokenKind::Eof => break,
                TokenKind::KwEndModule if explicit => break,
                TokenKind::KwModule if !explicit => break,
                _ => {}
            }

            let item_start = self.save_position();
            let item = if self.at(&TokenKind::KwAlg) {
                self.parse_algorithm().map(ModuleItem::Algorithm)
            } else {
                self.parse_program_item().map(ModuleItem::Global)
            };
            match item {
                Ok(item) => body.push(item),
                Err(err) => {
                    self.absorb(err)?;
                    self.synchronize_item(item_start);
                }
            }
        }

        Ok(body)
    }
}
