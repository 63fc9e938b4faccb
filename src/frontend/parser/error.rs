//! Parse errors

use std::fmt;

use crate::frontend::lexer::tokens::TokenKind;
use crate::util::diagnostic::{Diagnostic, Severity};
use crate::util::span::Span;

/// Something the parser was looking for
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    /// A specific token
    Token(TokenKind),
    /// A grammar rule, e.g. "expression"
    Rule(&'static str),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{}", kind),
            Expected::Rule(rule) => write!(f, "{}", rule),
        }
    }
}

fn one_of(expected: &[Expected]) -> String {
    match expected {
        [] => "something else".to_string(),
        [only] => only.to_string(),
        [init @ .., last] => format!(
            "{} or {}",
            init.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            last
        ),
    }
}

/// Parse error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("expected {}, found {found}", one_of(.expected))]
    UnexpectedToken {
        expected: Vec<Expected>,
        found: TokenKind,
        span: Span,
    },
    #[error("missing closing {delimiter}")]
    MissingDelimiter { delimiter: TokenKind, span: Span },
    #[error("incomplete {rule}")]
    IncompleteConstruct { rule: &'static str, span: Span },
    #[error("{form}")]
    AmbiguousFormResolved { form: &'static str, span: Span },
    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::MissingDelimiter { span, .. }
            | ParseError::IncompleteConstruct { span, .. }
            | ParseError::AmbiguousFormResolved { span, .. }
            | ParseError::NestingTooDeep { span, .. } => *span,
        }
    }

    /// Stable diagnostic code
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::UnexpectedToken { .. } => "P0001",
            ParseError::MissingDelimiter { .. } => "P0002",
            ParseError::IncompleteConstruct { .. } => "P0003",
            ParseError::AmbiguousFormResolved { .. } => "P0004",
            ParseError::NestingTooDeep { .. } => "P0005",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ParseError::AmbiguousFormResolved { .. } => Severity::Info,
            _ => Severity::Error,
        }
    }

    /// Aborts the unit instead of being recovered from
    pub fn is_fatal(&self) -> bool {
        matches!(self, ParseError::NestingTooDeep { .. })
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let span = Some(self.span());
        let diagnostic = match self.severity() {
            Severity::Info => Diagnostic::info(self.code(), self.to_string(), span),
            _ => Diagnostic::error(self.code(), self.to_string(), span),
        };
        match self {
            ParseError::MissingDelimiter { delimiter, .. } => {
                diagnostic.with_help(format!("insert {} here", delimiter))
            }
            ParseError::NestingTooDeep { .. } => {
                diagnostic.with_help("raise `parser.max_depth` or flatten the expression")
            }
            _ => diagnostic,
        }
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(error: &ParseError) -> Self {
        error.to_diagnostic()
    }
}
