//! Lexer tests module
//!
//! - basic: 标识符、空白符、位置
//! - keywords: 关键字与复合关键字
//! - literals: 数字、字符串、字符、颜色
//! - operators: 运算符与分隔符
//! - comments: 注释
//! - errors: 错误处理

mod operators;

use crate::frontend::lexer::{tokenize, TokenKind};

/// Token kinds of `source`, without the trailing `Eof`
pub(crate) fn kinds(source: &str) -> Vec<TokenKind> {
    let mut tokens = tokenize(source).unwrap();
    assert_eq!(tokens.pop().map(|t| t.kind), Some(TokenKind::Eof));
    tokens.into_iter().map(|t| t.kind).collect()
}
