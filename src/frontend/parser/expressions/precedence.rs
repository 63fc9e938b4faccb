//! Binding powers
//!
//! Nine levels, loosest first: `или`, `и`, equality, relational, additive,
//! multiplicative, `**`, prefix operators, postfix `[…]`/`(…)`. Prefix and
//! postfix levels are handled structurally in `parse_unary`/`parse_postfix`;
//! only the binary levels need a table.

use crate::frontend::lexer::tokens::TokenKind;
use crate::frontend::parser::ast::{BinOp, UnOp};

pub const BP_LOWEST: u8 = 0;
pub const BP_OR: u8 = 1;
pub const BP_AND: u8 = 2;
pub const BP_EQUALITY: u8 = 3;
pub const BP_RELATIONAL: u8 = 4;
pub const BP_ADDITIVE: u8 = 5;
pub const BP_MULTIPLICATIVE: u8 = 6;
pub const BP_POWER: u8 = 7;

/// Associativity of a binary level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

/// Binary operator for `kind`, with its binding power and associativity
pub fn infix_binding(kind: &TokenKind) -> Option<(BinOp, u8, Assoc)> {
    let entry = match kind {
        TokenKind::KwOr => (BinOp::Or, BP_OR, Assoc::Left),
        TokenKind::KwAnd => (BinOp::And, BP_AND, Assoc::Left),
        TokenKind::Eq => (BinOp::Eq, BP_EQUALITY, Assoc::Left),
        TokenKind::Ne => (BinOp::Ne, BP_EQUALITY, Assoc::Left),
        TokenKind::Lt => (BinOp::Lt, BP_RELATIONAL, Assoc::Left),
        TokenKind::Gt => (BinOp::Gt, BP_RELATIONAL, Assoc::Left),
        TokenKind::Le => (BinOp::Le, BP_RELATIONAL, Assoc::Left),
        TokenKind::Ge => (BinOp::Ge, BP_RELATIONAL, Assoc::Left),
        TokenKind::Plus => (BinOp::Add, BP_ADDITIVE, Assoc::Left),
        TokenKind::Minus => (BinOp::Sub, BP_ADDITIVE, Assoc::Left),
        TokenKind::Star => (BinOp::Mul, BP_MULTIPLICATIVE, Assoc::Left),
        TokenKind::Slash => (BinOp::Div, BP_MULTIPLICATIVE, Assoc::Left),
        TokenKind::Power => (BinOp::Pow, BP_POWER, Assoc::Right),
        _ => return None,
    };
    Some(entry)
}

/// Binding power of an operator already in the tree
pub fn binding_power(op: BinOp) -> u8 {
    match op {
        BinOp::Or => BP_OR,
        BinOp::And => BP_AND,
        BinOp::Eq | BinOp::Ne => BP_EQUALITY,
        BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge => BP_RELATIONAL,
        BinOp::Add | BinOp::Sub => BP_ADDITIVE,
        BinOp::Mul | BinOp::Div => BP_MULTIPLICATIVE,
        BinOp::Pow => BP_POWER,
    }
}

/// Minimum binding power for the right operand
pub fn right_operand_bp(
    bp: u8,
    assoc: Assoc,
) -> u8 {
    match assoc {
        Assoc::Left => bp + 1,
        Assoc::Right => bp,
    }
}

/// Prefix operator for `kind`
pub fn prefix_op(kind: &TokenKind) -> Option<UnOp> {
    match kind {
        TokenKind::Plus => Some(UnOp::Plus),
        TokenKind::Minus => Some(UnOp::Neg),
        TokenKind::KwNot => Some(UnOp::Not),
        _ => None,
    }
}
