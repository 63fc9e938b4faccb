//! Plain-text diagnostic renderer
//!
//! ```text
//! error[P0001]: expected expression, found `*`
//!  --> broken.kum:3:8
//!   |
//! 3 |   y := * 2
//!   |        ^
//! ```

use std::fmt::Write;

use crate::util::diagnostic::{Diagnostic, Severity};
use crate::util::span::{SourceFile, Span};

/// Renderer configuration
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    /// Wrap the severity label in ANSI colour sequences
    pub use_colors: bool,
    /// Quote the spanned source lines under the location
    pub show_source: bool,
    pub show_help: bool,
    /// Character used to underline the span
    pub marker: char,
    /// Quoted lines per diagnostic; longer spans are cut with `...`
    pub max_lines: usize,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            use_colors: true,
            show_source: true,
            show_help: true,
            marker: '^',
            max_lines: 4,
        }
    }
}

/// Text renderer
#[derive(Debug, Clone, Default)]
pub struct TextEmitter {
    config: EmitterConfig,
}

impl TextEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer without ANSI colours, for logs and tests
    pub fn plain() -> Self {
        Self::with_config(EmitterConfig {
            use_colors: false,
            ..EmitterConfig::default()
        })
    }

    pub fn with_config(config: EmitterConfig) -> Self {
        Self { config }
    }

    /// Render a diagnostic without source context
    pub fn render(
        &self,
        diagnostic: &Diagnostic,
    ) -> String {
        self.render_with_source(diagnostic, None)
    }

    /// Render a diagnostic, quoting `source_file` when the span points into it
    pub fn render_with_source(
        &self,
        diagnostic: &Diagnostic,
        source_file: Option<&SourceFile>,
    ) -> String {
        let mut out = String::new();
        let label = self.paint(diagnostic.severity, &diagnostic.severity.to_string());
        let _ = writeln!(out, "{}[{}]: {}", label, diagnostic.code, diagnostic.message);

        let span = diagnostic.span.filter(|span| !span.is_dummy());
        let gutter = span.map_or(0, |span| digits(self.last_quoted_line(span)));

        if let Some(span) = span {
            let name = source_file.map_or("<input>", |file| file.name.as_str());
            let _ = writeln!(
                out,
                "{:gutter$}--> {}:{}:{}",
                "",
                name,
                span.start.line,
                span.start.column
            );
            if let (true, Some(file)) = (self.config.show_source, source_file) {
                self.quote(&mut out, span, file, gutter);
            }
        }

        if let (true, Some(help)) = (self.config.show_help, &diagnostic.help) {
            let _ = writeln!(out, "{:gutter$} = help: {}", "", help);
        }

        out
    }

    /// Render a batch of diagnostics, separated by blank lines
    pub fn render_all<'a>(
        &self,
        diagnostics: impl IntoIterator<Item = &'a Diagnostic>,
        source_file: Option<&SourceFile>,
    ) -> String {
        diagnostics
            .into_iter()
            .map(|d| self.render_with_source(d, source_file))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn last_quoted_line(
        &self,
        span: Span,
    ) -> usize {
        let end = span.end.line.max(span.start.line);
        end.min(span.start.line + self.config.max_lines.max(1) - 1)
    }

    /// Source lines of `span` with a marker row under each
    fn quote(
        &self,
        out: &mut String,
        span: Span,
        file: &SourceFile,
        gutter: usize,
    ) {
        let last = self.last_quoted_line(span);
        let _ = writeln!(out, "{:gutter$} |", "");

        for line_num in span.start.line..=last {
            let Some(text) = file.line_text(line_num) else {
                break;
            };
            let _ = writeln!(out, "{:>gutter$} | {}", line_num, text);

            let from = if line_num == span.start.line {
                span.start.column.max(1)
            } else {
                1
            };
            let to = if line_num == span.end.line {
                span.end.column
            } else {
                text.chars().count() + 1
            };
            let width = to.saturating_sub(from).max(1);
            let marker = self.config.marker.to_string().repeat(width);
            let _ = writeln!(out, "{:gutter$} | {:pad$}{}", "", "", marker, pad = from - 1);
        }

        if last < span.end.line {
            let _ = writeln!(out, "{:gutter$} | ...", "");
        }
    }

    fn paint(
        &self,
        severity: Severity,
        text: &str,
    ) -> String {
        if !self.config.use_colors {
            return text.to_string();
        }
        let code = match severity {
            Severity::Error => 31,
            Severity::Warning => 33,
            Severity::Info => 34,
            Severity::Hint => 36,
        };
        format!("\x1b[1;{}m{}\x1b[0m", code, text)
    }
}

fn digits(mut n: usize) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
