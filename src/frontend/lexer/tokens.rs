//! Token types

use std::fmt;

use crate::util::diagnostic::Diagnostic;
use crate::util::span::{Position, Span};

/// Lexer error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("unexpected character '{ch}' at {position}")]
    UnexpectedChar { ch: char, position: Position },
    #[error("unterminated string starting at {position}")]
    UnterminatedString { position: Position },
    #[error("character literal at {position} must hold exactly one character")]
    InvalidChar { position: Position },
    #[error("invalid number literal '{text}' at {position}")]
    InvalidNumber { text: String, position: Position },
}

impl LexError {
    /// Position the error was detected at
    pub fn position(&self) -> Position {
        match self {
            LexError::UnexpectedChar { position, .. }
            | LexError::UnterminatedString { position }
            | LexError::InvalidChar { position }
            | LexError::InvalidNumber { position, .. } => *position,
        }
    }

    /// Stable diagnostic code
    pub fn code(&self) -> &'static str {
        match self {
            LexError::UnexpectedChar { .. } => "L0001",
            LexError::UnterminatedString { .. } => "L0002",
            LexError::InvalidChar { .. } => "L0003",
            LexError::InvalidNumber { .. } => "L0004",
        }
    }
}

impl From<&LexError> for Diagnostic {
    fn from(error: &LexError) -> Self {
        let position = error.position();
        Diagnostic::error(error.code(), error.to_string(), Some(Span::new(position, position)))
    }
}

/// Named colour constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Transparent,
    White,
    Black,
    Gray,
    Violet,
    Blue,
    LightBlue,
    Green,
    Yellow,
    Orange,
    Red,
}

impl Color {
    pub const ALL: [Color; 11] = [
        Color::Transparent,
        Color::White,
        Color::Black,
        Color::Gray,
        Color::Violet,
        Color::Blue,
        Color::LightBlue,
        Color::Green,
        Color::Yellow,
        Color::Orange,
        Color::Red,
    ];

    /// Canonical source spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Transparent => "прозрачный",
            Color::White => "белый",
            Color::Black => "чёрный",
            Color::Gray => "серый",
            Color::Violet => "фиолетовый",
            Color::Blue => "синий",
            Color::LightBlue => "голубой",
            Color::Green => "зелёный",
            Color::Yellow => "жёлтый",
            Color::Orange => "оранжевый",
            Color::Red => "красный",
        }
    }
}

/// Token kind
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Structure
    KwModule,
    KwEndModule,
    KwAlg,
    KwBegin,
    KwEnd,
    KwPre,
    KwPost,
    KwAssert,
    KwImport,

    // Loops
    KwLoop,
    KwEndLoop,
    KwEndLoopCond,
    KwFor,
    KwWhile,
    KwTimes,
    KwFrom,
    KwTo,
    KwStep,

    // Branching
    KwIf,
    KwThen,
    KwElse,
    KwFi,
    KwSwitch,
    KwCase,

    // Simple statements
    KwInput,
    KwOutput,
    KwExit,
    KwPause,
    KwStop,
    KwNewline,

    // Logic
    KwNot,
    KwAnd,
    KwOr,

    // Parameter markers and return slot
    KwArg,
    KwRes,
    KwArgRes,
    KwReturnValue,

    // Basic types
    KwInt,
    KwReal,
    KwBool,
    KwChar,
    KwString,
    KwTable,

    // Actor types
    KwComplex,
    KwColor,
    KwScancode,
    KwFile,

    // Array types
    KwIntTable,
    KwRealTable,
    KwCharTable,
    KwStringTable,
    KwBoolTable,

    // Identifiers and literals
    Identifier(String),
    IntLiteral(i64),
    RealLiteral(f64),
    BoolLiteral(bool),
    CharLiteral(char),
    StringLiteral(String),
    ColorLiteral(Color),

    // Operators
    Assign,
    Power,
    Ge,
    Le,
    Ne,
    Plus,
    Minus,
    Star,
    Slash,
    Eq,
    Lt,
    Gt,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Semicolon,
    AtAt,
    At,

    // Special
    Eof,
}

impl TokenKind {
    /// Canonical spelling of a fixed-text token
    ///
    /// Returns `None` for identifiers, literals with payload and `Eof`.
    pub fn as_str(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::KwModule => "модуль",
            TokenKind::KwEndModule => "конец_модуля",
            TokenKind::KwAlg => "алг",
            TokenKind::KwBegin => "нач",
            TokenKind::KwEnd => "кон",
            TokenKind::KwPre => "дано",
            TokenKind::KwPost => "надо",
            TokenKind::KwAssert => "утв",
            TokenKind::KwImport => "использовать",
            TokenKind::KwLoop => "нц",
            TokenKind::KwEndLoop => "кц",
            TokenKind::KwEndLoopCond => "кц_при",
            TokenKind::KwFor => "для",
            TokenKind::KwWhile => "пока",
            TokenKind::KwTimes => "раз",
            TokenKind::KwFrom => "от",
            TokenKind::KwTo => "до",
            TokenKind::KwStep => "шаг",
            TokenKind::KwIf => "если",
            TokenKind::KwThen => "то",
            TokenKind::KwElse => "иначе",
            TokenKind::KwFi => "все",
            TokenKind::KwSwitch => "выбор",
            TokenKind::KwCase => "при",
            TokenKind::KwInput => "ввод",
            TokenKind::KwOutput => "вывод",
            TokenKind::KwExit => "выход",
            TokenKind::KwPause => "пауза",
            TokenKind::KwStop => "стоп",
            TokenKind::KwNewline => "нс",
            TokenKind::KwNot => "не",
            TokenKind::KwAnd => "и",
            TokenKind::KwOr => "или",
            TokenKind::KwArg => "арг",
            TokenKind::KwRes => "рез",
            TokenKind::KwArgRes => "аргрез",
            TokenKind::KwReturnValue => "знач",
            TokenKind::KwInt => "цел",
            TokenKind::KwReal => "вещ",
            TokenKind::KwBool => "лог",
            TokenKind::KwChar => "сим",
            TokenKind::KwString => "лит",
            TokenKind::KwTable => "таб",
            TokenKind::KwComplex => "компл",
            TokenKind::KwColor => "цвет",
            TokenKind::KwScancode => "сканкод",
            TokenKind::KwFile => "файл",
            TokenKind::KwIntTable => "целтаб",
            TokenKind::KwRealTable => "вещтаб",
            TokenKind::KwCharTable => "симтаб",
            TokenKind::KwStringTable => "литтаб",
            TokenKind::KwBoolTable => "логтаб",
            TokenKind::BoolLiteral(true) => "да",
            TokenKind::BoolLiteral(false) => "нет",
            TokenKind::ColorLiteral(color) => color.as_str(),
            TokenKind::Assign => ":=",
            TokenKind::Power => "**",
            TokenKind::Ge => ">=",
            TokenKind::Le => "<=",
            TokenKind::Ne => "<>",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Eq => "=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::AtAt => "@@",
            TokenKind::At => "@",
            TokenKind::Identifier(_)
            | TokenKind::IntLiteral(_)
            | TokenKind::RealLiteral(_)
            | TokenKind::CharLiteral(_)
            | TokenKind::StringLiteral(_)
            | TokenKind::Eof => return None,
        };
        Some(text)
    }

    /// Check whether this is a word keyword (including `да`/`нет` and colours)
    pub fn is_keyword(&self) -> bool {
        self.as_str()
            .and_then(|s| s.chars().next())
            .map(|c| c.is_alphabetic())
            .unwrap_or(false)
    }

    /// Scalar type keywords (`цел вещ лог сим лит`)
    pub fn is_basic_type(&self) -> bool {
        matches!(
            self,
            TokenKind::KwInt
                | TokenKind::KwReal
                | TokenKind::KwBool
                | TokenKind::KwChar
                | TokenKind::KwString
        )
    }

    /// Array type keywords (`целтаб вещтаб симтаб литтаб логтаб`)
    pub fn is_array_type(&self) -> bool {
        matches!(
            self,
            TokenKind::KwIntTable
                | TokenKind::KwRealTable
                | TokenKind::KwCharTable
                | TokenKind::KwStringTable
                | TokenKind::KwBoolTable
        )
    }

    /// Actor type keywords (`компл цвет сканкод файл`)
    pub fn is_actor_type(&self) -> bool {
        matches!(
            self,
            TokenKind::KwComplex | TokenKind::KwColor | TokenKind::KwScancode | TokenKind::KwFile
        )
    }

    /// Any token that can start a type specifier
    pub fn starts_type(&self) -> bool {
        self.is_basic_type() || self.is_array_type() || self.is_actor_type()
    }

    /// Human-readable description used in diagnostics
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Identifier(name) => format!("identifier `{}`", name),
            TokenKind::IntLiteral(n) => format!("integer `{}`", n),
            TokenKind::RealLiteral(r) => format!("real `{}`", r),
            TokenKind::CharLiteral(c) => format!("character '{}'", c),
            TokenKind::StringLiteral(s) => format!("string \"{}\"", s),
            TokenKind::Eof => "end of input".to_string(),
            other => match other.as_str() {
                Some(text) => format!("`{}`", text),
                None => format!("{:?}", other),
            },
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Token
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw lexeme as written in the source
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

impl From<TokenKind> for Token {
    fn from(kind: TokenKind) -> Self {
        let text = match &kind {
            TokenKind::Identifier(name) => name.clone(),
            TokenKind::IntLiteral(n) => n.to_string(),
            TokenKind::RealLiteral(r) => r.to_string(),
            TokenKind::CharLiteral(c) => format!("'{}'", c),
            TokenKind::StringLiteral(s) => format!("\"{}\"", s.replace('"', "\"\"")),
            other => other.as_str().unwrap_or_default().to_string(),
        };
        Token {
            kind,
            text,
            span: Span::dummy(),
        }
    }
}
