//! Abstract Syntax Tree types

pub use crate::frontend::lexer::tokens::Color;
use crate::frontend::lexer::tokens::Token;
use crate::util::span::Span;

/// A list with at least one element
///
/// Optional lists are `Option<NonEmpty<T>>`; an empty `Vec` never stands in
/// for an absent list. The head is boxed so `Expr` can hold lists of `Expr`.
#[derive(Debug, Clone, PartialEq)]
pub struct NonEmpty<T> {
    pub first: Box<T>,
    pub rest: Vec<T>,
}

impl<T> NonEmpty<T> {
    pub fn new(first: T) -> Self {
        Self {
            first: Box::new(first),
            rest: Vec::new(),
        }
    }

    /// Build from a vector; `None` when it is empty
    pub fn from_vec(items: Vec<T>) -> Option<Self> {
        let mut iter = items.into_iter();
        let first = iter.next()?;
        Some(Self {
            first: Box::new(first),
            rest: iter.collect(),
        })
    }

    pub fn push(
        &mut self,
        item: T,
    ) {
        self.rest.push(item);
    }

    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(
        &self,
        index: usize,
    ) -> Option<&T> {
        match index {
            0 => Some(&*self.first),
            n => self.rest.get(n - 1),
        }
    }

    pub fn last(&self) -> &T {
        self.rest.last().unwrap_or(&*self.first)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.into_iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        let mut items = Vec::with_capacity(1 + self.rest.len());
        items.push(*self.first);
        items.extend(self.rest);
        items
    }
}

impl<'a, T> IntoIterator for &'a NonEmpty<T> {
    type Item = &'a T;
    type IntoIter = std::iter::Chain<std::iter::Once<&'a T>, std::slice::Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(&*self.first).chain(self.rest.iter())
    }
}

/// Identifier with its location
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(
        name: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

// ============================================================================
// Expressions
// ============================================================================

/// Binary operators, loosest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Or => "или",
            BinOp::And => "и",
            BinOp::Eq => "=",
            BinOp::Ne => "<>",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Pow => "**",
        }
    }
}

/// Prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnOp {
    Plus,
    Neg,
    Not,
}

impl UnOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnOp::Plus => "+",
            UnOp::Neg => "-",
            UnOp::Not => "не",
        }
    }
}

/// Expression
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(
        kind: ExprKind,
        span: Span,
    ) -> Self {
        Self { kind, span }
    }
}

/// Expression kind
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Int(i64),
    Real(f64),
    Str(String),
    Char(char),
    Bool(bool),
    Color(Color),
    /// `нс`
    Newline,
    Identifier(String),
    /// `знач`
    ReturnValue,
    Parenthesized(Box<Expr>),
    /// `{…}`; `{}` is `None`
    ArrayLiteral(Option<NonEmpty<Expr>>),
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Index {
        target: Box<Expr>,
        indices: NonEmpty<Expr>,
    },
    /// `f()` has `args = None`
    Call {
        callee: Box<Expr>,
        args: Option<NonEmpty<Expr>>,
    },
}

/// Assignment target
#[derive(Debug, Clone, PartialEq)]
pub enum LValue {
    Plain(Ident),
    Indexed {
        name: Ident,
        indices: NonEmpty<Expr>,
        span: Span,
    },
    /// `знач`
    ReturnValue(Span),
}

impl LValue {
    pub fn span(&self) -> Span {
        match self {
            LValue::Plain(ident) => ident.span,
            LValue::Indexed { span, .. } => *span,
            LValue::ReturnValue(span) => *span,
        }
    }
}

// ============================================================================
// Types and declarations
// ============================================================================

/// Scalar types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicType {
    Int,
    Real,
    Bool,
    Char,
    String,
}

/// Fixed-size array types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayType {
    Int,
    Real,
    Char,
    String,
    Bool,
}

/// Opaque device types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorType {
    Complex,
    Color,
    Scancode,
    File,
}

/// Type specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeSpecifier {
    /// `цел`, `цел таб`, …
    Basic { ty: BasicType, table: bool },
    Array(ArrayType),
    Actor(ActorType),
}

/// Inclusive `lower:upper` bound pair
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayBounds {
    pub lower: Expr,
    pub upper: Expr,
}

/// One declared name
#[derive(Debug, Clone, PartialEq)]
pub struct VarItem {
    pub name: Ident,
    pub bounds: Option<NonEmpty<ArrayBounds>>,
    pub init: Option<Expr>,
    pub span: Span,
}

/// `тип a, b[1:n], c = 0`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub ty: TypeSpecifier,
    pub vars: NonEmpty<VarItem>,
    pub span: Span,
}

/// Parameter passing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamMode {
    /// `арг`
    In,
    /// `рез`
    Out,
    /// `аргрез`
    InOut,
}

/// Parameter group in an algorithm header
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    /// Marker as written; `None` means the default
    pub mode: Option<ParamMode>,
    pub ty: TypeSpecifier,
    pub vars: NonEmpty<VarItem>,
    pub span: Span,
}

impl ParamDecl {
    /// Passing mode with the default applied
    pub fn effective_mode(&self) -> ParamMode {
        self.mode.unwrap_or(ParamMode::In)
    }
}

// ============================================================================
// Statements
// ============================================================================

/// Statement
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    /// An explicit `;` followed the statement
    pub terminated: bool,
    pub span: Span,
}

/// Input or output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IoDirection {
    Input,
    Output,
}

/// `value:width:precision`
#[derive(Debug, Clone, PartialEq)]
pub struct IoArgument {
    pub value: Expr,
    pub width: Option<Expr>,
    pub precision: Option<Expr>,
    pub span: Span,
}

/// `при cond: …`
#[derive(Debug, Clone, PartialEq)]
pub struct CaseBlock {
    pub condition: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// Loop head
#[derive(Debug, Clone, PartialEq)]
pub enum LoopSpecifier {
    CountedFor {
        var: Ident,
        from: Expr,
        to: Expr,
        step: Option<Expr>,
    },
    While(Expr),
    Times(Expr),
    Infinite,
}

/// Statement kind
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    VarDecl(VarDecl),
    Assignment {
        target: LValue,
        value: Expr,
    },
    Io {
        direction: IoDirection,
        args: NonEmpty<IoArgument>,
    },
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
    },
    Switch {
        cases: NonEmpty<CaseBlock>,
        else_branch: Option<Vec<Stmt>>,
    },
    Loop {
        spec: LoopSpecifier,
        body: Vec<Stmt>,
        /// `кц_при cond`
        end_condition: Option<Expr>,
    },
    Exit,
    Pause,
    Stop,
    Assertion(Expr),
    /// Bare expression used as a statement
    ProcedureCall {
        call: Expr,
    },
    Empty,
}

// ============================================================================
// Algorithms
// ============================================================================

/// Free-form algorithm name: the raw tokens between the header keyword
/// (or return type) and the first boundary token
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmName {
    pub tokens: NonEmpty<Token>,
    pub span: Span,
}

impl AlgorithmName {
    /// Name text, words separated by single spaces
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// `алг [тип] имя [(параметры)]`
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmHeader {
    pub return_type: Option<TypeSpecifier>,
    pub name: AlgorithmName,
    /// `()` and a missing list are both `None`
    pub params: Option<NonEmpty<ParamDecl>>,
    pub terminated: bool,
    pub span: Span,
}

/// Clause between the header and `нач`, in source order
#[derive(Debug, Clone, PartialEq)]
pub enum Prologue {
    /// `дано cond`
    Pre(Expr),
    /// `надо cond`
    Post(Expr),
    Decl(VarDecl),
}

/// Algorithm definition
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmDef {
    pub header: AlgorithmHeader,
    pub prologue: Vec<Prologue>,
    pub body: Vec<Stmt>,
    /// Identifiers after `кон`; not checked against the header name
    pub end_name: Option<NonEmpty<Ident>>,
    pub terminated: bool,
    pub span: Span,
}

impl AlgorithmDef {
    pub fn pre_conditions(&self) -> impl Iterator<Item = &Expr> {
        self.prologue.iter().filter_map(|p| match p {
            Prologue::Pre(expr) => Some(expr),
            _ => None,
        })
    }

    pub fn post_conditions(&self) -> impl Iterator<Item = &Expr> {
        self.prologue.iter().filter_map(|p| match p {
            Prologue::Post(expr) => Some(expr),
            _ => None,
        })
    }

    pub fn declarations(&self) -> impl Iterator<Item = &VarDecl> {
        self.prologue.iter().filter_map(|p| match p {
            Prologue::Decl(decl) => Some(decl),
            _ => None,
        })
    }
}

// ============================================================================
// Modules and program
// ============================================================================

/// Target of `использовать`
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleRef {
    Name(Ident),
    Path { path: String, span: Span },
}

/// Global item kind
#[derive(Debug, Clone, PartialEq)]
pub enum GlobalItemKind {
    Import(ModuleRef),
    Declaration(VarDecl),
    Assignment { target: Ident, value: Expr },
}

/// Import, declaration or assignment outside any algorithm
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalItem {
    pub kind: GlobalItemKind,
    pub terminated: bool,
    pub span: Span,
}

/// Entry of a module body
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleItem {
    Global(GlobalItem),
    Algorithm(AlgorithmDef),
}

/// Module definition
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleDef {
    Explicit {
        name: Ident,
        body: Vec<ModuleItem>,
        /// Identifier after `конец_модуля`; not checked against `name`
        end_name: Option<Ident>,
        span: Span,
    },
    /// Items and algorithms with no `модуль` header
    Implicit { body: Vec<ModuleItem>, span: Span },
}

impl ModuleDef {
    pub fn body(&self) -> &[ModuleItem] {
        match self {
            ModuleDef::Explicit { body, .. } | ModuleDef::Implicit { body, .. } => body,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ModuleDef::Explicit { span, .. } | ModuleDef::Implicit { span, .. } => *span,
        }
    }

    pub fn algorithms(&self) -> impl Iterator<Item = &AlgorithmDef> {
        self.body().iter().filter_map(|item| match item {
            ModuleItem::Algorithm(alg) => Some(alg),
            ModuleItem::Global(_) => None,
        })
    }
}

/// Syntax tree root
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Global items before the first module
    pub items: Vec<GlobalItem>,
    /// At least one module on a successful parse
    pub modules: Vec<ModuleDef>,
    pub span: Span,
}

impl Program {
    pub fn algorithms(&self) -> impl Iterator<Item = &AlgorithmDef> {
        self.modules.iter().flat_map(|m| m.algorithms())
    }
}
