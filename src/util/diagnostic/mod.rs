//! Diagnostics: a neutral record plus a plain-text renderer
//!
//! # Example
//!
//! ```
//! use kumir_syntax::util::diagnostic::{Diagnostic, TextEmitter};
//! use kumir_syntax::util::span::SourceFile;
//!
//! let file = SourceFile::new("demo.kum", "алг А\nнач\nкон\n");
//! let diagnostic = Diagnostic::error("P0001", "unexpected token", None);
//! let text = TextEmitter::plain().render_with_source(&diagnostic, Some(&file));
//! assert!(text.starts_with("error[P0001]: unexpected token"));
//! ```

pub mod emitter;
pub mod error;

pub use emitter::{EmitterConfig, TextEmitter};
pub use error::{Diagnostic, Severity};
