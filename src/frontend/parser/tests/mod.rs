//! Parser tests module
//!
//! - state: 游标、回溯、深度限制
//! - expressions: 优先级与结合性
//! - declarations: 类型与变量声明
//! - statements: 语句
//! - algorithms: 算法头与算法体
//! - modules: 模块与程序
//! - recovery: 错误恢复
//! - round_trip: 打印与重新解析


use crate::frontend::lexer::{tokenize, Token};
use crate::frontend::parser::ast::*;
use crate::frontend::parser::{parse, parse_expression, parse_with_config, print_expression, ParseOutcome};
use crate::util::config::ParserConfig;
use crate::util::span::Span;

/// Parse a program that must be error-free
pub(crate) fn program(source: &str) -> Program {
    let tokens = tokenize(source).unwrap();
    match parse(&tokens) {
        Ok(program) => program,
        Err(failure) => panic!("unexpected parse failure for {:?}: {}", source, failure),
    }
}

/// Parse with the default configuration and keep every diagnostic
pub(crate) fn outcome(source: &str) -> ParseOutcome {
    outcome_with(source, &ParserConfig::default())
}

pub(crate) fn outcome_with(
    source: &str,
    config: &ParserConfig,
) -> ParseOutcome {
    let tokens = tokenize(source).unwrap();
    parse_with_config(&tokens, config)
}

pub(crate) fn expr(source: &str) -> Expr {
    let tokens = tokenize(source).unwrap();
    parse_expression(&tokens).unwrap()
}

/// Wrap `statements` in a one-algorithm program
pub(crate) fn in_algorithm(statements: &str) -> String {
    format!("алг тест\nнач\n{}\nкон\n", statements)
}

/// Body of the only algorithm of an error-free program
pub(crate) fn body(statements: &str) -> Vec<Stmt> {
    let program = program(&in_algorithm(statements));
    let alg = program.algorithms().next().unwrap();
    alg.body.clone()
}

/// The only algorithm of an error-free program
pub(crate) fn algorithm(source: &str) -> AlgorithmDef {
    let program = program(source);
    assert_eq!(program.algorithms().count(), 1);
    let alg = program.algorithms().next().unwrap().clone();
    alg
}

/// Fully parenthesised prefix form of an expression
pub(crate) fn sexp(expr: &Expr) -> String {
    let list = |items: &NonEmpty<Expr>| items.iter().map(sexp).collect::<Vec<_>>().join(" ");
    match &expr.kind {
        ExprKind::Binary { op, lhs, rhs } => format!("({} {} {})", op.as_str(), sexp(lhs), sexp(rhs)),
        ExprKind::Unary { op, operand } => format!("({} {})", op.as_str(), sexp(operand)),
        ExprKind::Parenthesized(inner) => format!("<{}>", sexp(inner)),
        ExprKind::Index { target, indices } => format!("(index {} {})", sexp(target), list(indices)),
        ExprKind::Call { callee, args: None } => format!("(call {})", sexp(callee)),
        ExprKind::Call {
            callee,
            args: Some(args),
        } => format!("(call {} {})", sexp(callee), list(args)),
        _ => print_expression(expr),
    }
}

/// Syntax tree with every span and `;` flag cleared, for comparing parses by structure alone
pub(crate) fn shape_of(program: &Program) -> Program {
    let mut program = program.clone();
    program.erase_layout();
    program
}

trait EraseLayout {
    fn erase_layout(&mut self);
}

fn blank(span: &mut Span) {
    *span = Span::default();
}

impl<T: EraseLayout> EraseLayout for NonEmpty<T> {
    fn erase_layout(&mut self) {
        self.first.erase_layout();
        self.rest.erase_layout();
    }
}

impl<T: EraseLayout> EraseLayout for Vec<T> {
    fn erase_layout(&mut self) {
        self.iter_mut().for_each(EraseLayout::erase_layout);
    }
}

impl<T: EraseLayout> EraseLayout for Option<T> {
    fn erase_layout(&mut self) {
        if let Some(inner) = self {
            inner.erase_layout();
        }
    }
}

impl EraseLayout for Ident {
    fn erase_layout(&mut self) {
        blank(&mut self.span);
    }
}

impl EraseLayout for Token {
    fn erase_layout(&mut self) {
        blank(&mut self.span);
    }
}

impl EraseLayout for Expr {
    fn erase_layout(&mut self) {
        blank(&mut self.span);
        match &mut self.kind {
            ExprKind::Parenthesized(inner) | ExprKind::Unary { operand: inner, .. } => inner.erase_layout(),
            ExprKind::Binary { lhs, rhs, .. } => {
                lhs.erase_layout();
                rhs.erase_layout();
            }
            ExprKind::Index { target, indices } => {
                target.erase_layout();
                indices.erase_layout();
            }
            ExprKind::Call { callee, args } => {
                callee.erase_layout();
                args.erase_layout();
            }
            ExprKind::ArrayLiteral(items) => items.erase_layout(),
            ExprKind::Int(_)
            | ExprKind::Real(_)
            | ExprKind::Str(_)
            | ExprKind::Char(_)
            | ExprKind::Bool(_)
            | ExprKind::Color(_)
            | ExprKind::Newline
            | ExprKind::Identifier(_)
            | ExprKind::ReturnValue => {}
        }
    }
}

impl EraseLayout for LValue {
    fn erase_layout(&mut self) {
        match self {
            LValue::Plain(name) => name.erase_layout(),
            LValue::Indexed { name, indices, span } => {
                name.erase_layout();
                indices.erase_layout();
                blank(span);
            }
            LValue::ReturnValue(span) => blank(span),
        }
    }
}

impl EraseLayout for ArrayBounds {
    fn erase_layout(&mut self) {
        self.lower.erase_layout();
        self.upper.erase_layout();
    }
}

impl EraseLayout for VarItem {
    fn erase_layout(&mut self) {
        self.name.erase_layout();
        self.bounds.erase_layout();
        self.init.erase_layout();
        blank(&mut self.span);
    }
}

impl EraseLayout for VarDecl {
    fn erase_layout(&mut self) {
        self.vars.erase_layout();
        blank(&mut self.span);
    }
}

impl EraseLayout for ParamDecl {
    fn erase_layout(&mut self) {
        self.vars.erase_layout();
        blank(&mut self.span);
    }
}

impl EraseLayout for IoArgument {
    fn erase_layout(&mut self) {
        self.value.erase_layout();
        self.width.erase_layout();
        self.precision.erase_layout();
        blank(&mut self.span);
    }
}

impl EraseLayout for CaseBlock {
    fn erase_layout(&mut self) {
        self.condition.erase_layout();
        self.body.erase_layout();
        blank(&mut self.span);
    }
}

impl EraseLayout for LoopSpecifier {
    fn erase_layout(&mut self) {
        match self {
            LoopSpecifier::CountedFor { var, from, to, step } => {
                var.erase_layout();
                from.erase_layout();
                to.erase_layout();
                step.erase_layout();
            }
            LoopSpecifier::While(cond) | LoopSpecifier::Times(cond) => cond.erase_layout(),
            LoopSpecifier::Infinite => {}
        }
    }
}

impl EraseLayout for Stmt {
    fn erase_layout(&mut self) {
        self.terminated = false;
        blank(&mut self.span);
        match &mut self.kind {
            StmtKind::VarDecl(decl) => decl.erase_layout(),
            StmtKind::Assignment { target, value } => {
                target.erase_layout();
                value.erase_layout();
            }
            StmtKind::Io { args, .. } => args.erase_layout(),
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                condition.erase_layout();
                then_branch.erase_layout();
                else_branch.erase_layout();
            }
            StmtKind::Switch { cases, else_branch } => {
                cases.erase_layout();
                else_branch.erase_layout();
            }
            StmtKind::Loop {
                spec,
                body,
                end_condition,
            } => {
                spec.erase_layout();
                body.erase_layout();
                end_condition.erase_layout();
            }
            StmtKind::Assertion(cond) => cond.erase_layout(),
            StmtKind::ProcedureCall { call } => call.erase_layout(),
            StmtKind::Exit | StmtKind::Pause | StmtKind::Stop | StmtKind::Empty => {}
        }
    }
}

impl EraseLayout for Prologue {
    fn erase_layout(&mut self) {
        match self {
            Prologue::Pre(cond) | Prologue::Post(cond) => cond.erase_layout(),
            Prologue::Decl(decl) => decl.erase_layout(),
        }
    }
}

impl EraseLayout for AlgorithmDef {
    fn erase_layout(&mut self) {
        let header = &mut self.header;
        header.name.tokens.erase_layout();
        blank(&mut header.name.span);
        header.params.erase_layout();
        header.terminated = false;
        blank(&mut header.span);

        self.prologue.erase_layout();
        self.body.erase_layout();
        self.end_name.erase_layout();
        self.terminated = false;
        blank(&mut self.span);
    }
}

impl EraseLayout for GlobalItem {
    fn erase_layout(&mut self) {
        match &mut self.kind {
            GlobalItemKind::Import(ModuleRef::Name(name)) => name.erase_layout(),
            GlobalItemKind::Import(ModuleRef::Path { span, .. }) => blank(span),
            GlobalItemKind::Declaration(decl) => decl.erase_layout(),
            GlobalItemKind::Assignment { target, value } => {
                target.erase_layout();
                value.erase_layout();
            }
        }
        self.terminated = false;
        blank(&mut self.span);
    }
}

impl EraseLayout for ModuleItem {
    fn erase_layout(&mut self) {
        match self {
            ModuleItem::Global(item) => item.erase_layout(),
            ModuleItem::Algorithm(alg) => alg.erase_layout(),
        }
    }
}

impl EraseLayout for ModuleDef {
    fn erase_layout(&mut self) {
        match self {
            ModuleDef::Explicit {
                name,
                body,
                end_name,
                span,
            } => {
                name.erase_layout();
                body.erase_layout();
                end_name.erase_layout();
                blank(span);
            }
            ModuleDef::Implicit { body, span } => {
                body.erase_layout();
                blank(span);
            }
        }
    }
}

impl EraseLayout for Program {
    fn erase_layout(&mut self) {
        self.items.erase_layout();
        self.modules.erase_layout();
        blank(&mut self.span);
    }
}
