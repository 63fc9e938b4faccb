//! Keyword table
//!
//! Built once on first use; lookup is case-sensitive.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::tokens::{Color, TokenKind};

/// Keywords whose spelling is `TokenKind::as_str`
const KEYWORD_KINDS: &[TokenKind] = &[
    TokenKind::KwModule,
    TokenKind::KwEndModule,
    TokenKind::KwAlg,
    TokenKind::KwBegin,
    TokenKind::KwEnd,
    TokenKind::KwPre,
    TokenKind::KwPost,
    TokenKind::KwAssert,
    TokenKind::KwImport,
    TokenKind::KwLoop,
    TokenKind::KwEndLoop,
    TokenKind::KwEndLoopCond,
    TokenKind::KwFor,
    TokenKind::KwWhile,
    TokenKind::KwTimes,
    TokenKind::KwFrom,
    TokenKind::KwTo,
    TokenKind::KwStep,
    TokenKind::KwIf,
    TokenKind::KwThen,
    TokenKind::KwElse,
    TokenKind::KwFi,
    TokenKind::KwSwitch,
    TokenKind::KwCase,
    TokenKind::KwInput,
    TokenKind::KwOutput,
    TokenKind::KwExit,
    TokenKind::KwPause,
    TokenKind::KwStop,
    TokenKind::KwNewline,
    TokenKind::KwNot,
    TokenKind::KwAnd,
    TokenKind::KwOr,
    TokenKind::KwArg,
    TokenKind::KwRes,
    TokenKind::KwArgRes,
    TokenKind::KwReturnValue,
    TokenKind::KwInt,
    TokenKind::KwReal,
    TokenKind::KwBool,
    TokenKind::KwChar,
    TokenKind::KwString,
    TokenKind::KwTable,
    TokenKind::KwComplex,
    TokenKind::KwColor,
    TokenKind::KwScancode,
    TokenKind::KwFile,
    TokenKind::KwIntTable,
    TokenKind::KwRealTable,
    TokenKind::KwCharTable,
    TokenKind::KwStringTable,
    TokenKind::KwBoolTable,
    TokenKind::BoolLiteral(true),
    TokenKind::BoolLiteral(false),
];

/// Alternative spellings
const ALIASES: &[(&str, TokenKind)] = &[
    ("исп", TokenKind::KwModule),
    ("кон_исп", TokenKind::KwEndModule),
    ("черный", TokenKind::ColorLiteral(Color::Black)),
    ("зеленый", TokenKind::ColorLiteral(Color::Green)),
    ("желтый", TokenKind::ColorLiteral(Color::Yellow)),
];

/// Two-word forms joined when both words sit on one line
pub(crate) const COMPOUND_KEYWORDS: &[(&str, &str, TokenKind)] = &[
    ("кц", "при", TokenKind::KwEndLoopCond),
    ("конец", "модуля", TokenKind::KwEndModule),
];

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for kind in KEYWORD_KINDS {
        if let Some(text) = kind.as_str() {
            table.insert(text, kind.clone());
        }
    }
    for color in Color::ALL {
        table.insert(color.as_str(), TokenKind::ColorLiteral(color));
    }
    for (text, kind) in ALIASES {
        table.insert(*text, kind.clone());
    }
    table
});

/// Look up a word in the keyword table
pub fn keyword_from_str(word: &str) -> Option<TokenKind> {
    KEYWORDS.get(word).cloned()
}

/// Second word of a compound keyword starting with `first`, if any
pub(crate) fn compound_tail(first: &str) -> Option<(&'static str, TokenKind)> {
    COMPOUND_KEYWORDS
        .iter()
        .find(|(head, _, _)| *head == first)
        .map(|(_, tail, kind)| (*tail, kind.clone()))
}
