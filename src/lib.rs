//! KuMir syntax front end
//!
//! Tokens, a recoverable recursive-descent parser and the syntax tree for
//! the KuMir educational language. Semantic checks, execution and editor
//! integration are left to the crates that consume the tree.
//!
//! # Example
//!
//! ```
//! use kumir_syntax::parse_source;
//!
//! let program = parse_source(
//!     "алг вещ вычисли среднее(арг вещ a, арг вещ b)\n\
//!      нач\n\
//!        знач := (a + b) / 2\n\
//!      кон\n",
//! )
//! .unwrap();
//! let alg = program.algorithms().next().unwrap();
//! assert_eq!(alg.header.name.text(), "вычисли среднее");
//! ```

#![warn(rust_2018_idioms)]

pub mod frontend;
pub mod util;

pub use frontend::lexer::{tokenize, LexError, Token, TokenKind};
pub use frontend::parser::ast::Program;
pub use frontend::parser::{parse, parse_with_config, print_program, ParseError, ParseFailure, ParseOutcome};
pub use frontend::{FrontendError, SourceParser};
pub use util::config::{ParserConfig, SyntaxConfig};

use std::path::Path;

use tracing::debug;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Language name
pub const NAME: &str = "КуМир";

/// Parse source text with the default configuration
pub fn parse_source(source: &str) -> Result<Program, FrontendError> {
    debug!("parse_source called");
    SourceParser::new().parse(source)
}

/// Parse a file with the default configuration
pub fn parse_file(path: &Path) -> Result<Program, FrontendError> {
    debug!("parse_file called for {}", path.display());
    SourceParser::new().parse_file(path)
}

/// Parse source text with settings from a configuration file
///
/// The `[log]` section takes effect here: the logger is installed at
/// `log.level` unless one is already in place.
pub fn parse_source_with(
    source: &str,
    config: &SyntaxConfig,
) -> Result<Program, FrontendError> {
    config.init_logging();
    SourceParser::with_config(config.parser.clone()).parse(source)
}
