//! Control flow statements: `если`, `выбор`, `нц`

use crate::frontend::lexer::tokens::TokenKind;
use crate::frontend::parser::ast::*;
use crate::frontend::parser::error::{Expected, ParseError};
use crate::frontend::parser::parser_state::{starts_expression, ParseResult, ParserState};

impl ParserState<'_> {
    /// `если` cond `то` seq (`иначе` seq)? `все`
    pub fn parse_if(&mut self) -> ParseResult<StmtKind> {
        self.expect(&TokenKind::KwIf)?;
        let condition = self.parse_expression()?;
        self.expect(&TokenKind::KwThen)?;
        let then_branch = self.parse_statement_sequence()?;

        let else_branch = if self.skip(&TokenKind::KwElse) {
            Some(self.parse_statement_sequence()?)
        } else {
            None
        };

        self.expect_end(&TokenKind::KwFi, "if statement")?;
        Ok(StmtKind::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    /// `выбор` (`при` cond `:` seq)+ (`иначе` seq)? `все`
    pub fn parse_switch(&mut self) -> ParseResult<StmtKind> {
        self.expect(&TokenKind::KwSwitch)?;
        let first_case_at = self.span();

        let mut cases = Vec::new();
        while self.at(&TokenKind::KwCase) {
            let start = self.save_position();
            match self.parse_case_block() {
                Ok(case) => cases.push(case),
                Err(err) => {
                    self.absorb(err)?;
                    self.synchronize_case(start);
                }
            }
        }

        let else_branch = if self.skip(&TokenKind::KwElse) {
            Some(self.parse_statement_sequence()?)
        } else {
            None
        };

        // With no case block the rest is still consumed so recovery resumes
        // after `все`.
        self.expect_end(&TokenKind::KwFi, "switch statement")?;

        match NonEmpty::from_vec(cases) {
            Some(cases) => Ok(StmtKind::Switch { cases, else_branch }),
            None => Err(ParseError::IncompleteConstruct {
                rule: "switch statement",
                span: first_case_at,
            }),
        }
    }

    /// caseBlock → `при` cond `:` seq
    fn parse_case_block(&mut self) -> ParseResult<CaseBlock> {
        let start = self.expect(&TokenKind::KwCase)?.span;
        let condition = self.parse_expression()?;
        self.expect(&TokenKind::Colon)?;
        let body = self.parse_statement_sequence()?;
        Ok(CaseBlock {
            condition,
            body,
            span: self.span_from(start),
        })
    }

    /// `нц` loopSpecifier? seq (`кц` | `кц_при` cond)
    pub fn parse_loop(&mut self) -> ParseResult<StmtKind> {
        self.expect(&TokenKind::KwLoop)?;
        let spec = self.parse_loop_specifier()?;
        let body = self.parse_statement_sequence()?;

        let end_condition = match self.kind() {
            TokenKind::KwEndLoop => {
                self.bump();
                None
            }
            TokenKind::KwEndLoopCond => {
                self.bump();
                Some(self.parse_expression()?)
            }
            TokenKind::Eof => {
                return Err(ParseError::IncompleteConstruct {
                    rule: "loop",
                    span: self.span(),
                })
            }
            _ => {
                return Err(self.unexpected(vec![
                    Expected::Token(TokenKind::KwEndLoop),
                    Expected::Token(TokenKind::KwEndLoopCond),
                ]))
            }
        };

        Ok(StmtKind::Loop {
            spec,
            body,
            end_condition,
        })
    }

    /// loopSpecifier → `для` id `от` e `до` e (`шаг` e)? | `пока` e | e `раз`
    ///
    /// Absent specifier means an infinite loop. The `раз` form is found by
    /// reading an expression speculatively; if no `раз` follows, the tokens
    /// belong to the body.
    pub fn parse_loop_specifier(&mut self) -> ParseResult<LoopSpecifier> {
        match self.kind() {
            TokenKind::KwFor => {
                self.bump();
                let var = self.expect_ident()?;
                self.expect(&TokenKind::KwFrom)?;
                let from = self.parse_expression()?;
                self.expect(&TokenKind::KwTo)?;
                let to = self.parse_expression()?;
                let step = if self.skip(&TokenKind::KwStep) {
                    Some(self.parse_expression()?)
                } else {
                    None
                };
                Ok(LoopSpecifier::CountedFor {
                    var,
                    from,
                    to,
                    step,
                })
            }
            TokenKind::KwWhile => {
                self.bump();
                Ok(LoopSpecifier::While(self.parse_expression()?))
            }
            kind if starts_expression(kind) => {
                let at = self.span();
                let count = self.speculate(|state| {
                    let count = state.parse_expression()?;
                    state.expect(&TokenKind::KwTimes)?;
                    Ok(count)
                })?;
                match count {
                    Some(count) => Ok(LoopSpecifier::Times(count)),
                    None => {
                        self.note("loop without `раз` read as an infinite loop", at);
                        Ok(LoopSpecifier::Infinite)
                    }
                }
            }
            _ => Ok(LoopSpecifier::Infinite),
        }
    }
}
