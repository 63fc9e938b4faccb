//! 运算符测试

use super::kinds;
use crate::frontend::lexer::TokenKind;

#[cfg(test)]
mod lexer_operators_tests {
    use super::*;

    #[test]
    fn test_two_char_operators() {
        assert_eq!(
            kinds(":= ** >= <= <> @@"),
            vec![
                TokenKind::Assign,
                TokenKind::Power,
                TokenKind::Ge,
                TokenKind::Le,
                TokenKind::Ne,
                TokenKind::AtAt,
            ]
        );
    }

    #[test]
    fn test_single_char_operators() {
        assert_eq!(
            kinds("+ - * / = < > @"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Eq,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::At,
            ]
        );
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(
            kinds("( ) [ ] { } , : ;"),
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Comma,
                TokenKind::Colon,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn test_no_spaces_needed() {
        assert_eq!(
            kinds("x:=a[1]**2"),
            vec![
                TokenKind::Identifier("x".to_string()),
                TokenKind::Assign,
                TokenKind::Identifier("a".to_string()),
                TokenKind::LBracket,
                TokenKind::IntLiteral(1),
                TokenKind::RBracket,
                TokenKind::Power,
                TokenKind::IntLiteral(2),
            ]
        );
    }
}
