//! Parser module
//!
//! Recursive descent over a token slice, with precedence climbing for binary
//! expressions. The parser recovers from malformed statements, case blocks
//! and module items so one run reports every independent error; the tree it
//! returns alongside errors is flagged as partial.

pub mod algorithm;
pub mod ast;
pub mod error;
pub mod expressions;
pub mod module;
pub mod parser_state;
pub mod printer;
pub mod statements;

#[cfg(test)]
mod tests;

pub use error::{Expected, ParseError};
pub use expressions::{BP_LOWEST, BP_POWER};
pub use parser_state::{ParseResult, ParserState};
pub use printer::{print_expression, print_program};

use std::panic;
use std::thread;

use crate::frontend::lexer::tokens::{Token, TokenKind};
use crate::util::config::ParserConfig;
use crate::util::diagnostic::Diagnostic;
use ast::*;

/// Everything one parse produced
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    /// The tree; partial when `diagnostics` is not empty
    pub program: Program,
    /// Errors, in source order of discovery
    pub diagnostics: Vec<ParseError>,
    /// Resolved ambiguities (informational)
    pub notes: Vec<ParseError>,
    /// The unit was aborted
    pub fatal: bool,
}

impl ParseOutcome {
    /// The tree is missing the parts that failed to parse
    pub fn is_partial(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Errors followed by notes, as renderable diagnostics
    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .iter()
            .chain(self.notes.iter())
            .map(Diagnostic::from)
            .collect()
    }

    /// Complete tree, or the failure carrying the partial one
    pub fn into_result(self) -> Result<Program, ParseFailure> {
        if self.is_partial() {
            Err(ParseFailure {
                diagnostics: self.diagnostics,
                partial: self.program,
                fatal: self.fatal,
            })
        } else {
            Ok(self.program)
        }
    }
}

/// Failed parse: every error plus the partial tree
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{} parse error(s){}", .diagnostics.len(), first_message(.diagnostics))]
pub struct ParseFailure {
    pub diagnostics: Vec<ParseError>,
    pub partial: Program,
    pub fatal: bool,
}

impl ParseFailure {
    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.iter().map(Diagnostic::from).collect()
    }
}

fn first_message(diagnostics: &[ParseError]) -> String {
    match diagnostics.first() {
        Some(first) => format!(", first at {}: {}", first.span().start, first),
        None => String::new(),
    }
}

/// Parse tokens into a program with the default configuration
///
/// # Example
/// ```
/// use kumir_syntax::frontend::lexer::tokenize;
/// use kumir_syntax::frontend::parser::parse;
///
/// let tokens = tokenize("алг привет\nнач\n  вывод \"привет\", нс\nкон\n").unwrap();
/// let program = parse(&tokens).unwrap();
/// assert_eq!(program.algorithms().count(), 1);
/// ```
pub fn parse(tokens: &[Token]) -> Result<Program, ParseFailure> {
    parse_with_config(tokens, &ParserConfig::default()).into_result()
}

/// Parse tokens into a program, keeping every diagnostic
pub fn parse_with_config(
    tokens: &[Token],
    config: &ParserConfig,
) -> ParseOutcome {
    on_parser_stack(config.max_depth, || parse_on_current_stack(tokens, config))
}

fn parse_on_current_stack(
    tokens: &[Token],
    config: &ParserConfig,
) -> ParseOutcome {
    tracing::debug!("parsing {} tokens", tokens.len());

    let mut state = ParserState::with_config(tokens, config.clone());
    let mut program = Program::default();

    let fatal = match state.parse_program_into(&mut program) {
        Ok(()) => false,
        Err(err) => {
            state.error(err);
            true
        }
    };

    let (diagnostics, notes) = state.into_diagnostics();
    tracing::debug!(
        "parse finished: {} module(s), {} error(s), {} note(s){}",
        program.modules.len(),
        diagnostics.len(),
        notes.len(),
        if fatal { ", aborted" } else { "" }
    );

    ParseOutcome {
        program,
        diagnostics,
        notes,
        fatal,
    }
}

/// Parse a single expression; every token up to `Eof` must belong to it
pub fn parse_expression(tokens: &[Token]) -> Result<Expr, ParseError> {
    let config = ParserConfig::default();
    on_parser_stack(config.max_depth, || {
        let mut state = ParserState::with_config(tokens, config.clone());
        let expr = state.parse_expression()?;
        if !state.at_end() {
            return Err(state.unexpected(vec![Expected::Token(TokenKind::Eof)]));
        }
        Ok(expr)
    })
}

/// Stack reserved for one nesting level (a handful of recursive frames,
/// sized for unoptimised builds)
const STACK_PER_LEVEL: usize = 64 * 1024;

/// Stack for everything outside the nested rules
const STACK_BASE: usize = 1024 * 1024;

/// Stack size that lets `max_depth` levels nest before `NestingTooDeep`
pub(crate) fn parser_stack_size(max_depth: usize) -> usize {
    max_depth
        .saturating_mul(STACK_PER_LEVEL)
        .saturating_add(STACK_BASE)
}

/// Run `parse` on a worker thread whose stack fits `max_depth` levels
///
/// The caller's stack (2 MiB for spawned threads and the test harness) is
/// not enough for the default depth. If the worker cannot be started the
/// parse runs on the caller's stack instead.
fn on_parser_stack<T, F>(
    max_depth: usize,
    parse: F,
) -> T
where
    T: Send,
    F: Fn() -> T + Sync,
{
    let parse = &parse;
    thread::scope(|scope| {
        let worker = thread::Builder::new()
            .name("kumir-parser".to_string())
            .stack_size(parser_stack_size(max_depth))
            .spawn_scoped(scope, move || parse());
        match worker {
            Ok(handle) => match handle.join() {
                Ok(value) => value,
                Err(payload) => panic::resume_unwind(payload),
            },
            Err(err) => {
                tracing::warn!("parser thread not started ({}); parsing on the current stack", err);
                parse()
            }
        }
    })
}
