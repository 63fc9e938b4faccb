//! Rendering front-end errors against their source

use kumir_syntax::util::diagnostic::{Severity, TextEmitter};
use kumir_syntax::util::span::SourceFile;
use kumir_syntax::{FrontendError, SourceParser};

fn render(name: &str, source: &str) -> String {
    let err = SourceParser::new().parse(source).unwrap_err();
    let file = SourceFile::new(name, source);
    TextEmitter::plain().render_all(&err.to_diagnostics(), Some(&file))
}

#[test]
fn test_parse_error_points_at_token() {
    let text = render("broken.kum", "алг a\nнач\n  y := * 2\nкон\n");
    assert!(text.starts_with("error[P0001]: expected "), "{}", text);
    assert!(text.contains(" --> broken.kum:3:8\n"), "{}", text);
    assert!(text.contains("\n3 |   y := * 2\n  |        ^\n"), "{}", text);
}

#[test]
fn test_lex_error_is_rendered() {
    let text = render("lex.kum", "алг a\nнач\n  x := $\nкон\n");
    assert!(text.starts_with("error[L0001]:"), "{}", text);
    assert!(text.contains(" --> lex.kum:3:8\n"), "{}", text);
}

#[test]
fn test_missing_delimiter_has_help() {
    let text = render("paren.kum", "алг a\nнач\n  x := (1 + 2\nкон\n");
    assert!(text.contains("[P0002]"), "{}", text);
    assert!(text.contains("  = help: insert "), "{}", text);
}

#[test]
fn test_every_error_is_rendered() {
    let source = "алг a\nнач\n  x := )\n  y := 1\n  z := )\nкон\n";
    let err = SourceParser::new().parse(source).unwrap_err();
    let diagnostics = err.to_diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|d| d.severity == Severity::Error));

    let file = SourceFile::new("two.kum", source);
    let text = TextEmitter::plain().render_all(&diagnostics, Some(&file));
    assert!(text.contains(" --> two.kum:3:"), "{}", text);
    assert!(text.contains(" --> two.kum:5:"), "{}", text);
}

#[test]
fn test_notes_follow_errors() {
    let outcome = SourceParser::new()
        .parse_outcome("алг a\nнач\n  f(1)\nкон\n")
        .unwrap();
    assert!(!outcome.is_partial());
    let diagnostics = outcome.to_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Info);

    let text = TextEmitter::plain().render(&diagnostics[0]);
    assert!(text.starts_with("info[P0004]:"), "{}", text);
}

#[test]
fn test_io_error_has_no_diagnostics() {
    let err = kumir_syntax::parse_file(std::path::Path::new("/no/such/dir/a.kum")).unwrap_err();
    assert!(matches!(err, FrontendError::Io(_)));
    assert!(err.to_diagnostics().is_empty());
}
