//! Canonical source printer
//!
//! Prints a tree back as KuMir source. Parsing the output gives a tree that
//! prints to the same text: every statement is followed by `;`, keywords
//! use their canonical spelling, and parentheses appear only where the tree
//! has a `Parenthesized` node.

use crate::frontend::parser::ast::*;

/// Print a whole program
pub fn print_program(program: &Program) -> String {
    let mut printer = SourcePrinter::new();
    printer.print(program)
}

/// Print a single expression on one line
pub fn print_expression(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr);
    out
}

/// Keyword text of a type specifier
pub fn type_text(ty: &TypeSpecifier) -> &'static str {
    match ty {
        TypeSpecifier::Basic { ty, table } => match (ty, table) {
            (BasicType::Int, false) => "цел",
            (BasicType::Real, false) => "вещ",
            (BasicType::Bool, false) => "лог",
            (BasicType::Char, false) => "сим",
            (BasicType::String, false) => "лит",
            (BasicType::Int, true) => "цел таб",
            (BasicType::Real, true) => "вещ таб",
            (BasicType::Bool, true) => "лог таб",
            (BasicType::Char, true) => "сим таб",
            (BasicType::String, true) => "лит таб",
        },
        TypeSpecifier::Array(ty) => match ty {
            ArrayType::Int => "целтаб",
            ArrayType::Real => "вещтаб",
            ArrayType::Char => "симтаб",
            ArrayType::String => "литтаб",
            ArrayType::Bool => "логтаб",
        },
        TypeSpecifier::Actor(ty) => match ty {
            ActorType::Complex => "компл",
            ActorType::Color => "цвет",
            ActorType::Scancode => "сканкод",
            ActorType::File => "файл",
        },
    }
}

fn write_list<'a, T: 'a>(
    out: &mut String,
    items: impl IntoIterator<Item = &'a T>,
    mut write: impl FnMut(&mut String, &T),
) {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write(out, item);
    }
}

fn write_expr(
    out: &mut String,
    expr: &Expr,
) {
    match &expr.kind {
        ExprKind::Int(n) => out.push_str(&n.to_string()),
        ExprKind::Real(r) => out.push_str(&format!("{:?}", r)),
        ExprKind::Str(s) => {
            out.push('"');
            out.push_str(&s.replace('"', "\"\""));
            out.push('"');
        }
        ExprKind::Char(c) => {
            out.push('\'');
            if *c == '\'' {
                out.push_str("''");
            } else {
                out.push(*c);
            }
            out.push('\'');
        }
        ExprKind::Bool(b) => out.push_str(if *b { "да" } else { "нет" }),
        ExprKind::Color(color) => out.push_str(color.as_str()),
        ExprKind::Newline => out.push_str("нс"),
        ExprKind::Identifier(name) => out.push_str(name),
        ExprKind::ReturnValue => out.push_str("знач"),
        ExprKind::Parenthesized(inner) => {
            out.push('(');
            write_expr(out, inner);
            out.push(')');
        }
        ExprKind::ArrayLiteral(items) => {
            out.push('{');
            if let Some(items) = items {
                write_list(out, items, write_expr);
            }
            out.push('}');
        }
        ExprKind::Unary { op, operand } => {
            out.push_str(op.as_str());
            if *op == UnOp::Not {
                out.push(' ');
            }
            write_expr(out, operand);
        }
        ExprKind::Binary { op, lhs, rhs } => {
            write_expr(out, lhs);
            out.push(' ');
            out.push_str(op.as_str());
            out.push(' ');
            write_expr(out, rhs);
        }
        ExprKind::Index { target, indices } => {
            write_expr(out, target);
            out.push('[');
            write_list(out, indices, write_expr);
            out.push(']');
        }
        ExprKind::Call { callee, args } => {
            write_expr(out, callee);
            out.push('(');
            if let Some(args) = args {
                write_list(out, args, write_expr);
            }
            out.push(')');
        }
    }
}

fn write_var_item(
    out: &mut String,
    item: &VarItem,
) {
    out.push_str(&item.name.name);
    if let Some(bounds) = &item.bounds {
        out.push('[');
        write_list(out, bounds, |out, b: &ArrayBounds| {
            write_expr(out, &b.lower);
            out.push(':');
            write_expr(out, &b.upper);
        });
        out.push(']');
    }
    if let Some(init) = &item.init {
        out.push_str(" = ");
        write_expr(out, init);
    }
}

fn var_decl_text(decl: &VarDecl) -> String {
    let mut out = type_text(&decl.ty).to_string();
    out.push(' ');
    write_list(&mut out, &decl.vars, write_var_item);
    out
}

fn lvalue_text(target: &LValue) -> String {
    match target {
        LValue::Plain(ident) => ident.name.clone(),
        LValue::Indexed { name, indices, .. } => {
            let mut out = name.name.clone();
            out.push('[');
            write_list(&mut out, indices, write_expr);
            out.push(']');
            out
        }
        LValue::ReturnValue(_) => "знач".to_string(),
    }
}

/// Indenting source printer
pub struct SourcePrinter {
    indent_level: usize,
    output: String,
}

impl Default for SourcePrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl SourcePrinter {
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            output: String::new(),
        }
    }

    pub fn print(
        &mut self,
        program: &Program,
    ) -> String {
        self.output.clear();
        for item in &program.items {
            self.global_item(item);
        }
        for module in &program.modules {
            self.module(module);
        }
        self.output.clone()
    }

    fn indent(&mut self) {
        self.indent_level += 2;
    }

    fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(2);
    }

    fn writeln(
        &mut self,
        s: &str,
    ) {
        for _ in 0..self.indent_level {
            self.output.push(' ');
        }
        self.output.push_str(s);
        self.output.push('\n');
    }

    fn module(
        &mut self,
        module: &ModuleDef,
    ) {
        match module {
            ModuleDef::Explicit {
                name, body, end_name, ..
            } => {
                self.writeln(&format!("модуль {}", name.name));
                self.indent();
                self.module_body(body);
                self.dedent();
                match end_name {
                    Some(end) => self.writeln(&format!("конец_модуля {}", end.name)),
                    None => self.writeln("конец_модуля"),
                }
            }
            ModuleDef::Implicit { body, .. } => self.module_body(body),
        }
    }

    fn module_body(
        &mut self,
        body: &[ModuleItem],
    ) {
        for item in body {
            match item {
                ModuleItem::Global(item) => self.global_item(item),
                ModuleItem::Algorithm(alg) => self.algorithm(alg),
            }
        }
    }

    fn global_item(
        &mut self,
        item: &GlobalItem,
    ) {
        let line = match &item.kind {
            GlobalItemKind::Import(ModuleRef::Name(name)) => format!("использовать {}", name.name),
            GlobalItemKind::Import(ModuleRef::Path { path, .. }) => {
                format!("использовать \"{}\"", path.replace('"', "\"\""))
            }
            GlobalItemKind::Declaration(decl) => var_decl_text(decl),
            GlobalItemKind::Assignment { target, value } => {
                format!("{} := {}", target.name, print_expression(value))
            }
        };
        self.writeln(&line);
    }

    fn algorithm(
        &mut self,
        alg: &AlgorithmDef,
    ) {
        let header = &alg.header;
        let mut line = String::from("алг ");
        if let Some(ty) = &header.return_type {
            line.push_str(type_text(ty));
            line.push(' ');
        }
        line.push_str(&header.name.text());
        if let Some(params) = &header.params {
            line.push('(');
            write_list(&mut line, params, |out, param: &ParamDecl| {
                match param.mode {
                    Some(ParamMode::In) => out.push_str("арг "),
                    Some(ParamMode::Out) => out.push_str("рез "),
                    Some(ParamMode::InOut) => out.push_str("аргрез "),
                    None => {}
                }
                out.push_str(type_text(&param.ty));
                out.push(' ');
                write_list(out, &param.vars, write_var_item);
            });
            line.push(')');
        }
        self.writeln(&line);

        self.indent();
        for clause in &alg.prologue {
            let line = match clause {
                Prologue::Pre(cond) => format!("дано {}", print_expression(cond)),
                Prologue::Post(cond) => format!("надо {}", print_expression(cond)),
                Prologue::Decl(decl) => var_decl_text(decl),
            };
            self.writeln(&line);
        }
        self.dedent();

        self.writeln("нач");
        self.indent();
        self.statements(&alg.body);
        self.dedent();

        match &alg.end_name {
            Some(names) => {
                let names: Vec<&str> = names.iter().map(|n| n.name.as_str()).collect();
                self.writeln(&format!("кон {}", names.join(" ")));
            }
            None => self.writeln("кон"),
        }
    }

    fn statements(
        &mut self,
        stmts: &[Stmt],
    ) {
        for stmt in stmts {
            self.statement(stmt);
        }
    }

    fn block(
        &mut self,
        stmts: &[Stmt],
    ) {
        self.indent();
        self.statements(stmts);
        self.dedent();
    }

    fn statement(
        &mut self,
        stmt: &Stmt,
    ) {
        match &stmt.kind {
            StmtKind::Empty => self.writeln(";"),
            StmtKind::VarDecl(decl) => self.writeln(&format!("{};", var_decl_text(decl))),
            StmtKind::Assignment { target, value } => {
                self.writeln(&format!("{} := {};", lvalue_text(target), print_expression(value)))
            }
            StmtKind::Io { direction, args } => {
                let mut line = String::from(match direction {
                    IoDirection::Input => "ввод ",
                    IoDirection::Output => "вывод ",
                });
                write_list(&mut line, args, |out, arg: &IoArgument| {
                    write_expr(out, &arg.value);
                    if let Some(width) = &arg.width {
                        out.push(':');
                        write_expr(out, width);
                    }
                    if let Some(precision) = &arg.precision {
                        out.push(':');
                        write_expr(out, precision);
                    }
                });
                line.push(';');
                self.writeln(&line);
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.writeln(&format!("если {} то", print_expression(condition)));
                self.block(then_branch);
                if let Some(else_branch) = else_branch {
                    self.writeln("иначе");
                    self.block(else_branch);
                }
                self.writeln("все;");
            }
            StmtKind::Switch { cases, else_branch } => {
                self.writeln("выбор");
                self.indent();
                for case in cases {
                    self.writeln(&format!("при {}:", print_expression(&case.condition)));
                    self.block(&case.body);
                }
                if let Some(else_branch) = else_branch {
                    self.writeln("иначе");
                    self.block(else_branch);
                }
                self.dedent();
                self.writeln("все;");
            }
            StmtKind::Loop {
                spec,
                body,
                end_condition,
            } => {
                let head = match spec {
                    LoopSpecifier::CountedFor { var, from, to, step } => {
                        let mut head = format!(
                            "нц для {} от {} до {}",
                            var.name,
                            print_expression(from),
                            print_expression(to)
                        );
                        if let Some(step) = step {
                            head.push_str(&format!(" шаг {}", print_expression(step)));
                        }
                        head
                    }
                    LoopSpecifier::While(cond) => format!("нц пока {}", print_expression(cond)),
                    LoopSpecifier::Times(count) => format!("нц {} раз", print_expression(count)),
                    LoopSpecifier::Infinite => "нц".to_string(),
                };
                self.writeln(&head);
                self.block(body);
                match end_condition {
                    Some(cond) => self.writeln(&format!("кц_при {};", print_expression(cond))),
                    None => self.writeln("кц;"),
                }
            }
            StmtKind::Exit => self.writeln("выход;"),
            StmtKind::Pause => self.writeln("пауза;"),
            StmtKind::Stop => self.writeln("стоп;"),
            StmtKind::Assertion(cond) => self.writeln(&format!("утв {};", print_expression(cond))),
            StmtKind::ProcedureCall { call } => self.writeln(&format!("{};", print_expression(call))),
        }
    }
}
