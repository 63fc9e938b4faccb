//! Diagnostic output

pub mod text;

pub use text::{EmitterConfig, TextEmitter};
