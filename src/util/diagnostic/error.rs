//! Diagnostic record
//!
//! `Diagnostic` is the presentation-neutral form every front-end error is
//! converted into before it is rendered.

use crate::util::span::Span;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Hint,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Check whether this severity fails a parse
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
            Severity::Hint => write!(f, "hint"),
        }
    }
}

/// Rendered diagnostic
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity
    pub severity: Severity,
    /// Stable code, e.g. `P0001`
    pub code: &'static str,
    /// Complete message
    pub message: String,
    /// Optional help line
    pub help: Option<String>,
    /// Location
    pub span: Option<Span>,
}

impl Diagnostic {
    /// Create an error diagnostic
    pub fn error(
        code: &'static str,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            help: None,
            span,
        }
    }

    /// Create an informational diagnostic
    pub fn info(
        code: &'static str,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            severity: Severity::Info,
            code,
            message: message.into(),
            help: None,
            span,
        }
    }

    /// Attach a help line
    pub fn with_help(
        mut self,
        help: impl Into<String>,
    ) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}
