//! # kumir-syntax 性能基准测试
//!
//! 使用 Criterion.rs 进行性能基准测试。
//!
//! ## 基准测试分组
//! - `lexer`: 词法分析
//! - `parser`: 语法分析（含错误恢复）
//! - `printer`: 语法树打印
//!
//! ## 使用方法
//! ```bash
//! cargo bench          # 运行所有
//! cargo bench parser   # 只运行语法分析
//! ```

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kumir_syntax::{parse, print_program, tokenize};

/// `n` algorithms, each with a loop, a branch and a switch
fn generated_program(n: usize) -> String {
    let mut source = String::from("использовать Робот\nцел N = 100\n\n");
    for i in 0..n {
        source.push_str(&format!(
            "алг цел обработка_{i}(арг цел x, арг целтаб t[1:N])\n\
             \x20 дано x >= 0\n\
             нач\n\
             \x20 цел k, s = 0\n\
             \x20 нц для k от 1 до N шаг 2\n\
             \x20   s := s + t[k] * (x - k) ** 2\n\
             \x20 кц\n\
             \x20 если s > 0 и не (s = x) то\n\
             \x20   вывод \"сумма: \", s:8, нс\n\
             \x20 иначе\n\
             \x20   вправо\n\
             \x20 все\n\
             \x20 выбор\n\
             \x20   при s < 10: знач := s\n\
             \x20   иначе знач := -s\n\
             \x20 все\n\
             кон обработка_{i}\n\n"
        ));
    }
    source
}

/// Same program with one broken statement per algorithm
fn broken_program(n: usize) -> String {
    generated_program(n).replace("s := s + t[k]", "s := ) + t[k]")
}

// ============================================================================
// Lexer
// ============================================================================

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");
    for n in [10, 100] {
        let source = generated_program(n);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("tokenize", n), &source, |b, source| {
            b.iter(|| tokenize(black_box(source)))
        });
    }
    group.finish();
}

// ============================================================================
// Parser
// ============================================================================

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");
    for n in [10, 100] {
        let Ok(tokens) = tokenize(&generated_program(n)) else {
            return;
        };
        group.throughput(Throughput::Elements(tokens.len() as u64));
        group.bench_with_input(BenchmarkId::new("valid", n), &tokens, |b, tokens| {
            b.iter(|| parse(black_box(tokens)))
        });
    }

    if let Ok(tokens) = tokenize(&broken_program(100)) {
        group.bench_function("recovering/100", |b| b.iter(|| parse(black_box(&tokens))));
    }
    group.finish();
}

// ============================================================================
// Printer
// ============================================================================

fn bench_print(c: &mut Criterion) {
    let Ok(tokens) = tokenize(&generated_program(100)) else {
        return;
    };
    let Ok(program) = parse(&tokens) else {
        return;
    };
    c.bench_function("printer/100", |b| b.iter(|| print_program(black_box(&program))));
}

// ============================================================================
// Criterion Groups
// ============================================================================

criterion_group!(
    name = lexer;
    config = Criterion::default().sample_size(50);
    targets = bench_tokenize
);

criterion_group!(
    name = parser;
    config = Criterion::default().sample_size(30);
    targets = bench_parse
);

criterion_group!(
    name = printer;
    config = Criterion::default().sample_size(50);
    targets = bench_print
);

criterion_main!(lexer, parser, printer);
