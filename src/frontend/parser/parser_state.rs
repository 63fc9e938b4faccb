//! Parser state: token cursor, diagnostics, depth guard and recovery

use crate::frontend::lexer::tokens::{Token, TokenKind};
use crate::frontend::parser::ast::Ident;
use crate::frontend::parser::error::{Expected, ParseError};
use crate::util::config::ParserConfig;
use crate::util::span::Span;

/// Result type used by every sub-parser
pub type ParseResult<T> = Result<T, ParseError>;

/// Tokens that close a block; statement sequences stop in front of them
pub(crate) fn is_block_terminator(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::KwElse
            | TokenKind::KwFi
            | TokenKind::KwCase
            | TokenKind::KwEndLoop
            | TokenKind::KwEndLoopCond
            | TokenKind::KwEnd
            | TokenKind::KwBegin
            | TokenKind::KwAlg
            | TokenKind::KwModule
            | TokenKind::KwEndModule
            | TokenKind::Eof
    )
}

/// Keywords that always open a statement
pub(crate) fn is_statement_keyword(kind: &TokenKind) -> bool {
    kind.starts_type()
        || matches!(
            kind,
            TokenKind::KwInput
                | TokenKind::KwOutput
                | TokenKind::KwIf
                | TokenKind::KwSwitch
                | TokenKind::KwLoop
                | TokenKind::KwExit
                | TokenKind::KwPause
                | TokenKind::KwStop
                | TokenKind::KwAssert
        )
}

/// Tokens that can open an expression
pub(crate) fn starts_expression(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier(_)
            | TokenKind::IntLiteral(_)
            | TokenKind::RealLiteral(_)
            | TokenKind::StringLiteral(_)
            | TokenKind::CharLiteral(_)
            | TokenKind::BoolLiteral(_)
            | TokenKind::ColorLiteral(_)
            | TokenKind::KwNewline
            | TokenKind::KwReturnValue
            | TokenKind::LParen
            | TokenKind::LBrace
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::KwNot
    )
}

/// Parser state for recursive descent
pub struct ParserState<'a> {
    tokens: &'a [Token],
    pos: usize,
    eof: Token,
    config: ParserConfig,
    depth: usize,
    errors: Vec<ParseError>,
    notes: Vec<ParseError>,
}

impl<'a> ParserState<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self::with_config(tokens, ParserConfig::default())
    }

    pub fn with_config(
        tokens: &'a [Token],
        config: ParserConfig,
    ) -> Self {
        let end = tokens.last().map(|t| t.span).unwrap_or_default();
        let eof_span = Span::new(end.end, end.end);
        Self {
            tokens,
            pos: 0,
            eof: Token::new(TokenKind::Eof, "", eof_span),
            config,
            depth: 0,
            errors: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    // ========================================================================
    // Cursor
    // ========================================================================

    pub fn at_end(&self) -> bool {
        matches!(self.kind(), TokenKind::Eof)
    }

    /// Current token; past the end of the slice this is `Eof`
    pub fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    pub fn kind(&self) -> &TokenKind {
        &self.current().kind
    }

    pub fn peek(&self) -> &Token {
        self.peek_nth(1)
    }

    pub fn peek_nth(
        &self,
        n: usize,
    ) -> &Token {
        self.tokens.get(self.pos + n).unwrap_or(&self.eof)
    }

    pub fn span(&self) -> Span {
        self.current().span
    }

    /// Span of the last consumed token
    pub fn prev_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.span)
            .unwrap_or_else(|| self.span())
    }

    /// Span from `start` to the end of the last consumed token
    pub fn span_from(
        &self,
        start: Span,
    ) -> Span {
        start.to(self.prev_span())
    }

    pub fn bump(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() && !matches!(token.kind, TokenKind::Eof) {
            self.pos += 1;
        }
        token
    }

    pub fn at(
        &self,
        kind: &TokenKind,
    ) -> bool {
        self.kind() == kind
    }

    pub fn skip(
        &mut self,
        kind: &TokenKind,
    ) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or fail with `UnexpectedToken`
    pub fn expect(
        &mut self,
        kind: &TokenKind,
    ) -> ParseResult<Token> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(vec![Expected::Token(kind.clone())]))
        }
    }

    /// Consume a closing bracket or fail with `MissingDelimiter`
    pub fn expect_closing(
        &mut self,
        delimiter: &TokenKind,
    ) -> ParseResult<Token> {
        if self.at(delimiter) {
            Ok(self.bump())
        } else {
            Err(ParseError::MissingDelimiter {
                delimiter: delimiter.clone(),
                span: self.span(),
            })
        }
    }

    /// Consume the keyword that ends `rule`; running out of input makes the
    /// construct incomplete
    pub fn expect_end(
        &mut self,
        kind: &TokenKind,
        rule: &'static str,
    ) -> ParseResult<Token> {
        if self.at_end() && !self.at(kind) {
            return Err(ParseError::IncompleteConstruct {
                rule,
                span: self.span(),
            });
        }
        self.expect(kind)
    }

    /// Consume an identifier
    pub fn expect_ident(&mut self) -> ParseResult<Ident> {
        match self.kind() {
            TokenKind::Identifier(name) => {
                let ident = Ident::new(name.clone(), self.span());
                self.bump();
                Ok(ident)
            }
            _ => Err(self.unexpected(vec![Expected::Rule("identifier")])),
        }
    }

    /// `UnexpectedToken` at the current token
    pub fn unexpected(
        &self,
        expected: Vec<Expected>,
    ) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            found: self.kind().clone(),
            span: self.span(),
        }
    }

    /// Save current position for backtracking
    pub fn save_position(&self) -> usize {
        self.pos
    }

    /// Restore a previously saved position
    pub fn restore_position(
        &mut self,
        pos: usize,
    ) {
        self.pos = pos;
    }

    /// Run `f` speculatively
    ///
    /// On failure the cursor and any errors or notes recorded by `f` are rolled back
    /// and `Ok(None)` is returned. `NestingTooDeep` is never swallowed.
    pub fn speculate<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Option<T>> {
        let pos = self.save_position();
        let notes = self.notes.len();
        let errors = self.errors.len();
        match f(self) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_fatal() => Err(err),
            Err(_) => {
                self.restore_position(pos);
                self.notes.truncate(notes);
                self.errors.truncate(errors);
                Ok(None)
            }
        }
    }

    // ========================================================================
    // Depth guard
    // ========================================================================

    /// Run `f` one nesting level deeper
    pub fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= self.config.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.config.max_depth,
                span: self.span(),
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Record a recovered error
    pub fn error(
        &mut self,
        error: ParseError,
    ) {
        tracing::debug!("parse error at {}: {}", error.span().start, error);
        self.errors.push(error);
    }

    /// Record an informational note about a resolved ambiguity
    pub fn note(
        &mut self,
        form: &'static str,
        span: Span,
    ) {
        tracing::debug!("{} at {}", form, span.start);
        if self.config.record_notes {
            self.notes.push(ParseError::AmbiguousFormResolved { form, span });
        }
    }

    /// Decide what to do with an error caught at a synchronisation point:
    /// record it and keep going, or hand it back to abort the unit
    pub fn absorb(
        &mut self,
        error: ParseError,
    ) -> ParseResult<()> {
        if error.is_fatal() || !self.config.recover {
            return Err(error);
        }
        self.error(error);
        Ok(())
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn notes(&self) -> &[ParseError] {
        &self.notes
    }

    pub fn into_diagnostics(self) -> (Vec<ParseError>, Vec<ParseError>) {
        (self.errors, self.notes)
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    /// Skip past a malformed statement that started at token index `start`
    pub fn synchronize_statement(
        &mut self,
        start: usize,
    ) {
        let start_line = self
            .tokens
            .get(start)
            .map(|t| t.span.start.line)
            .unwrap_or(0);
        let from = self.pos;

        if self.pos == start && !self.at_end() {
            if self.bump().kind == TokenKind::Semicolon {
                self.report_skipped(from);
                return;
            }
        }

        while !self.at_end() {
            let kind = self.kind();
            if matches!(kind, TokenKind::Semicolon) {
                self.bump();
                break;
            }
            if is_block_terminator(kind) || is_statement_keyword(kind) {
                break;
            }
            if starts_expression(kind) && self.current().span.start.line > start_line {
                break;
            }
            self.bump();
        }

        self.report_skipped(from);
    }

    /// Skip to the next `при`, `иначе` or `все` after a malformed case block
    pub fn synchronize_case(
        &mut self,
        start: usize,
    ) {
        let from = self.pos;
        if self.pos == start && !self.at_end() {
            self.bump();
        }
        while !self.at_end()
            && !matches!(
                self.kind(),
                TokenKind::KwCase | TokenKind::KwElse | TokenKind::KwFi
            )
        {
            self.bump();
        }
        self.report_skipped(from);
    }

    /// Skip past a malformed module item that started at token index `start`
    pub fn synchronize_item(
        &mut self,
        start: usize,
    ) {
        let start_line = self
            .tokens
            .get(start)
            .map(|t| t.span.start.line)
            .unwrap_or(0);
        let from = self.pos;

        if self.pos == start && !self.at_end() {
            self.bump();
        }

        while !self.at_end() {
            let kind = self.kind();
            let item_start = matches!(
                kind,
                TokenKind::KwAlg | TokenKind::KwModule | TokenKind::KwEndModule | TokenKind::KwImport
            ) || kind.starts_type();
            if item_start {
                break;
            }
            if matches!(kind, TokenKind::Identifier(_)) && self.current().span.start.line > start_line {
                break;
            }
            self.bump();
        }

        self.report_skipped(from);
    }

    fn report_skipped(
        &self,
        from: usize,
    ) {
        let skipped = self.pos.saturating_sub(from);
        if skipped > 0 {
            tracing::warn!("recovery skipped {} token(s) before {}", skipped, self.span().start);
        }
    }
}
