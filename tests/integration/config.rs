//! Configuration files driving the parser

use std::fs;
use std::path::PathBuf;

use kumir_syntax::util::config::{load_config, SyntaxConfig};
use kumir_syntax::util::logger::{self, LogLevel};
use kumir_syntax::{parse_source_with, FrontendError, SourceParser};
use tempfile::TempDir;

fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const DEEP: &str = "алг a\nнач\n  x := ((((((((((1))))))))))\nкон\n";

#[test]
fn test_depth_limit_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_test_file(&temp_dir, "kumir.toml", "[parser]\nmax_depth = 8\n");
    let config = load_config(&path).unwrap();
    assert_eq!(config.parser.max_depth, 8);

    match parse_source_with(DEEP, &config).unwrap_err() {
        FrontendError::Parse(failure) => assert!(failure.fatal),
        other => panic!("expected parse failure, got {:?}", other),
    }
    assert!(parse_source_with(DEEP, &SyntaxConfig::default()).is_ok());
}

#[test]
fn test_recover_off_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_test_file(&temp_dir, "kumir.toml", "[parser]\nrecover = false\n");
    let config = load_config(&path).unwrap();

    let source = "алг a\nнач\n  x := )\n  y := )\nкон\n";
    match parse_source_with(source, &config).unwrap_err() {
        FrontendError::Parse(failure) => assert_eq!(failure.diagnostics.len(), 1),
        other => panic!("expected parse failure, got {:?}", other),
    }
    match parse_source_with(source, &SyntaxConfig::default()).unwrap_err() {
        FrontendError::Parse(failure) => assert_eq!(failure.diagnostics.len(), 2),
        other => panic!("expected parse failure, got {:?}", other),
    }
}

#[test]
fn test_notes_can_be_switched_off() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_test_file(
        &temp_dir,
        "kumir.toml",
        "[parser]\nrecord_notes = false\n\n[log]\nlevel = \"warn\"\n",
    );
    let config = load_config(&path).unwrap();
    assert_eq!(config.log.level, LogLevel::Warn);
    logger::init_with_level(config.log.level);

    let outcome = SourceParser::with_config(config.parser)
        .parse_outcome("алг a\nнач\n  f(1)\nкон\n")
        .unwrap();
    assert!(outcome.notes.is_empty());
}

#[test]
fn test_source_file_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_test_file(&temp_dir, "main.kum", "алг главный\nнач\n  вывод 1, нс\nкон\n");
    let program = kumir_syntax::parse_file(&path).unwrap();
    assert_eq!(program.algorithms().count(), 1);
}

#[test]
fn test_absent_config_is_default() {
    let temp_dir = TempDir::new().unwrap();
    let config = load_config(&temp_dir.path().join("kumir.toml")).unwrap();
    assert_eq!(config, SyntaxConfig::default());
}
