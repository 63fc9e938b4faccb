//! Syntax front end
//!
//! The lexer turns KuMir source text into tokens and the parser turns tokens
//! into a `Program`. `SourceParser` runs both.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::util::config::ParserConfig;
use crate::util::diagnostic::Diagnostic;

pub mod lexer;
pub mod parser;

use lexer::LexError;
use parser::ast::Program;
use parser::{ParseFailure, ParseOutcome};

/// Source text to syntax tree
#[derive(Debug, Clone, Default)]
pub struct SourceParser {
    config: ParserConfig,
}

impl SourceParser {
    /// Create a parser with the default configuration
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse source text; any error fails the whole unit
    pub fn parse(
        &self,
        source: &str,
    ) -> Result<Program, FrontendError> {
        self.parse_outcome(source)?
            .into_result()
            .map_err(FrontendError::Parse)
    }

    /// Parse source text and keep the partial tree and every diagnostic
    pub fn parse_outcome(
        &self,
        source: &str,
    ) -> Result<ParseOutcome, FrontendError> {
        debug!("parsing source ({} bytes)", source.len());
        let tokens = lexer::tokenize(source)?;
        Ok(parser::parse_with_config(&tokens, &self.config))
    }

    /// Read and parse a source file
    pub fn parse_file(
        &self,
        path: &Path,
    ) -> Result<Program, FrontendError> {
        debug!("reading {}", path.display());
        let source = fs::read_to_string(path)?;
        self.parse(&source)
    }
}

/// Front-end errors
#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Lexical error: {0}")]
    Lex(#[from] LexError),

    #[error("Parse error: {0}")]
    Parse(ParseFailure),
}

impl FrontendError {
    /// Renderable diagnostics; an IO error has none
    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            FrontendError::Io(_) => Vec::new(),
            FrontendError::Lex(err) => vec![Diagnostic::from(err)],
            FrontendError::Parse(failure) => failure.to_diagnostics(),
        }
    }
}
