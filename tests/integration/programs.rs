//! Whole-program tests over the `.kum` fixtures

use std::fs;
use std::path::{Path, PathBuf};

use kumir_syntax::frontend::parser::ast::*;
use kumir_syntax::{parse_file, parse_source, print_program, FrontendError, ParseError, Program};
use walkdir::WalkDir;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn fixture(name: &str) -> Program {
    let path = fixtures_dir().join(name);
    parse_file(&path).unwrap_or_else(|err| panic!("{}: {}", path.display(), err))
}

fn algorithm_names(program: &Program) -> Vec<String> {
    program.algorithms().map(|alg| alg.header.name.text()).collect()
}

#[test]
fn test_every_fixture_parses_and_prints_stably() {
    let mut seen = 0;
    for entry in WalkDir::new(fixtures_dir()).sort_by_file_name() {
        let entry = entry.unwrap();
        if entry.path().extension().map_or(true, |ext| ext != "kum") {
            continue;
        }
        seen += 1;

        let source = fs::read_to_string(entry.path()).unwrap();
        let program = parse_source(&source)
            .unwrap_or_else(|err| panic!("{}: {}", entry.path().display(), err));
        let printed = print_program(&program);
        let reparsed = parse_source(&printed)
            .unwrap_or_else(|err| panic!("{} (printed): {}\n{}", entry.path().display(), err, printed));
        assert_eq!(print_program(&reparsed), printed, "{}", entry.path().display());
        assert_eq!(algorithm_names(&reparsed), algorithm_names(&program));
    }
    assert_eq!(seen, 5);
}

#[test]
fn test_hello() {
    let program = fixture("hello.kum");
    assert_eq!(algorithm_names(&program), vec!["привет"]);
    let alg = program.algorithms().next().unwrap();
    assert!(alg.header.params.is_none());
    match &alg.body[0].kind {
        StmtKind::Io { direction, args } => {
            assert_eq!(*direction, IoDirection::Output);
            assert_eq!(args.len(), 2);
        }
        other => panic!("expected output, got {:?}", other),
    }
}

#[test]
fn test_average() {
    let program = fixture("average.kum");
    let alg = program.algorithms().next().unwrap();
    assert_eq!(alg.header.name.text(), "среднее значение");
    assert_eq!(
        alg.header.return_type,
        Some(TypeSpecifier::Basic {
            ty: BasicType::Real,
            table: false,
        })
    );

    let params = alg.header.params.as_ref().unwrap();
    assert_eq!(params.len(), 2);
    let table = params.get(1).unwrap();
    assert_eq!(table.ty, TypeSpecifier::Array(ArrayType::Real));
    assert!(table.vars.first.bounds.is_some());

    assert_eq!(alg.pre_conditions().count(), 1);
    assert_eq!(alg.body.len(), 4);
    assert!(matches!(
        alg.body[2].kind,
        StmtKind::Loop {
            spec: LoopSpecifier::CountedFor { .. },
            ..
        }
    ));
    let echo: Vec<&str> = alg.end_name.as_ref().unwrap().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(echo, vec!["среднее", "значение"]);
}

#[test]
fn test_robot() {
    let program = fixture("robot.kum");
    assert!(matches!(
        program.items[0].kind,
        GlobalItemKind::Import(ModuleRef::Name(ref name)) if name.name == "Робот"
    ));
    let alg = program.algorithms().next().unwrap();
    assert_eq!(alg.header.name.text(), "обход поля");
    assert_eq!(alg.body.len(), 3);
    match &alg.body[0].kind {
        StmtKind::Loop {
            spec: LoopSpecifier::Times(_),
            body,
            ..
        } => {
            assert!(matches!(
                body[0].kind,
                StmtKind::Loop {
                    spec: LoopSpecifier::While(_),
                    ..
                }
            ));
            assert!(matches!(body[1].kind, StmtKind::ProcedureCall { .. }));
        }
        other => panic!("expected counted loop, got {:?}", other),
    }
    assert!(matches!(
        alg.body[1].kind,
        StmtKind::Loop {
            spec: LoopSpecifier::Infinite,
            end_condition: Some(_),
            ..
        }
    ));
    assert!(matches!(alg.body[2].kind, StmtKind::Assertion(_)));
}

#[test]
fn test_modules() {
    let program = fixture("modules.kum");
    assert_eq!(program.items.len(), 3);
    assert!(matches!(
        program.items[2].kind,
        GlobalItemKind::Assignment { ref target, .. } if target.name == "заголовок"
    ));

    assert_eq!(program.modules.len(), 3);
    match &program.modules[0] {
        ModuleDef::Explicit { name, end_name, body, .. } => {
            assert_eq!(name.name, "Математика");
            assert_eq!(end_name.as_ref().unwrap().name, "Математика");
            assert_eq!(body.len(), 3);
            assert!(matches!(body[0], ModuleItem::Global(_)));
        }
        other => panic!("expected explicit module, got {:?}", other),
    }
    assert!(matches!(program.modules[1], ModuleDef::Explicit { end_name: None, .. }));
    assert!(matches!(program.modules[2], ModuleDef::Implicit { .. }));

    assert_eq!(
        algorithm_names(&program),
        vec!["факториал", "чётное", "показать", "главный"]
    );
    let even = program.algorithms().nth(1).unwrap();
    assert_eq!(
        even.header.return_type,
        Some(TypeSpecifier::Basic {
            ty: BasicType::Bool,
            table: false,
        })
    );
}

#[test]
fn test_arrays() {
    let program = fixture("arrays.kum");
    let alg = program.algorithms().next().unwrap();
    assert_eq!(alg.declarations().count(), 4);
    assert_eq!(alg.body.len(), 9);

    match &alg.body[1].kind {
        StmtKind::Assignment {
            target: LValue::Indexed { .. },
            ..
        } => {}
        other => panic!("expected indexed assignment, got {:?}", other),
    }
    match &alg.body[2].kind {
        StmtKind::Switch { cases, else_branch } => {
            assert_eq!(cases.len(), 2);
            assert!(else_branch.is_some());
        }
        other => panic!("expected switch, got {:?}", other),
    }
    let actors: Vec<TypeSpecifier> = alg.body[4..8]
        .iter()
        .filter_map(|stmt| match &stmt.kind {
            StmtKind::VarDecl(decl) => Some(decl.ty),
            _ => None,
        })
        .collect();
    assert_eq!(
        actors,
        vec![
            TypeSpecifier::Actor(ActorType::Color),
            TypeSpecifier::Actor(ActorType::Complex),
            TypeSpecifier::Actor(ActorType::File),
            TypeSpecifier::Actor(ActorType::Scancode),
        ]
    );
    assert!(matches!(alg.body[8].kind, StmtKind::Exit));
}

#[test]
fn test_deep_nesting_on_a_small_thread() {
    let worker = std::thread::Builder::new()
        .stack_size(256 * 1024)
        .spawn(|| {
            let n = 1000;
            let source = format!("алг a\nнач\n{}{}кон\n", "нц\n".repeat(n), "кц\n".repeat(n));
            parse_source(&source)
        })
        .unwrap();

    match worker.join().unwrap() {
        Err(FrontendError::Parse(failure)) => {
            assert!(failure.fatal);
            assert!(matches!(
                failure.diagnostics.last(),
                Some(ParseError::NestingTooDeep { .. })
            ));
        }
        other => panic!("expected depth failure, got {:?}", other.map(|p| p.modules.len())),
    }
}
