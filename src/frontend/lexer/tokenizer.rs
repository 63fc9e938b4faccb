//! Tokenizer implementation
//! Main lexer structure and token generation logic

use std::iter::Peekable;
use std::str::Chars;

use super::keywords::{compound_tail, keyword_from_str};
use super::literals::{is_digit, is_identifier_char, is_identifier_start, scan_char, scan_number, scan_string};
use super::tokens::*;
use crate::util::span::{Position, Span};

/// Main lexer structure
pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<Chars<'a>>,
    offset: usize,
    line: usize,
    column: usize,
    start_offset: usize,
    start_line: usize,
    start_column: usize,
    pub error: Option<LexError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
            offset: 0,
            line: 1,
            column: 1,
            start_offset: 0,
            start_line: 1,
            start_column: 1,
            error: None,
        }
    }

    /// Get current position
    pub fn position(&self) -> Position {
        Position::with_offset(self.line, self.column, self.offset)
    }

    /// Get start position of current token
    pub fn start_position(&self) -> Position {
        Position::with_offset(self.start_line, self.start_column, self.start_offset)
    }

    /// Get span of current token
    pub fn span(&self) -> Span {
        Span::new(self.start_position(), self.position())
    }

    /// Advance to next character
    pub fn advance(&mut self) -> Option<char> {
        match self.chars.next() {
            Some('\n') => {
                self.offset += 1;
                self.line += 1;
                self.column = 1;
                Some('\n')
            }
            Some(c) => {
                self.offset += c.len_utf8();
                self.column += 1;
                Some(c)
            }
            None => None,
        }
    }

    /// Peek at next character
    pub fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    /// Peek at character after next
    pub fn peek_next(&self) -> Option<char> {
        self.lookahead(1)
    }

    /// Character `n` places ahead (0 is the next one)
    pub fn lookahead(
        &self,
        n: usize,
    ) -> Option<char> {
        self.chars.clone().nth(n)
    }

    /// Record an error; scanning stops at the next call
    pub fn fail(
        &mut self,
        error: LexError,
    ) {
        self.error = Some(error);
    }

    /// Skip whitespace and `|` / `#` line comments
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' | '\n' | '\u{feff}' => {
                    self.advance();
                }
                '|' | '#' => {
                    while let Some(&c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Generate next token
    pub fn next_token(&mut self) -> Option<Token> {
        if self.error.is_some() {
            return None;
        }

        self.skip_whitespace_and_comments();

        self.start_offset = self.offset;
        self.start_line = self.line;
        self.start_column = self.column;

        let c = self.advance()?;

        let kind = match c {
            c if is_identifier_start(c) => return self.scan_word(c),
            c if is_digit(c) => return scan_number(self, c),
            '"' => return scan_string(self),
            '\'' => return scan_char(self),
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '/' => TokenKind::Slash,
            '=' => TokenKind::Eq,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '*' => {
                if self.peek() == Some(&'*') {
                    self.advance();
                    TokenKind::Power
                } else {
                    TokenKind::Star
                }
            }
            ':' => {
                if self.peek() == Some(&'=') {
                    self.advance();
                    TokenKind::Assign
                } else {
                    TokenKind::Colon
                }
            }
            '<' => match self.peek() {
                Some(&'=') => {
                    self.advance();
                    TokenKind::Le
                }
                Some(&'>') => {
                    self.advance();
                    TokenKind::Ne
                }
                _ => TokenKind::Lt,
            },
            '>' => {
                if self.peek() == Some(&'=') {
                    self.advance();
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                }
            }
            '@' => {
                if self.peek() == Some(&'@') {
                    self.advance();
                    TokenKind::AtAt
                } else {
                    TokenKind::At
                }
            }
            c => {
                self.fail(LexError::UnexpectedChar {
                    ch: c,
                    position: self.start_position(),
                });
                return None;
            }
        };

        Some(self.make_token(kind))
    }

    /// Scan an identifier or keyword
    fn scan_word(
        &mut self,
        first_char: char,
    ) -> Option<Token> {
        let mut value = String::new();
        value.push(first_char);

        while let Some(&c) = self.peek() {
            if is_identifier_char(c) {
                value.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if let Some((tail, kind)) = compound_tail(&value) {
            if self.eat_same_line_word(tail) {
                return Some(self.make_token(kind));
            }
        }

        let kind = keyword_from_str(&value).unwrap_or(TokenKind::Identifier(value));
        Some(self.make_token(kind))
    }

    /// Consume `word` if it follows after spaces on the same line
    fn eat_same_line_word(
        &mut self,
        word: &str,
    ) -> bool {
        let mut lookahead = self.chars.clone();
        let mut gap = 0;
        while matches!(lookahead.peek(), Some(' ') | Some('\t')) {
            lookahead.next();
            gap += 1;
        }
        if gap == 0 {
            return false;
        }

        let mut matched = 0;
        for expected in word.chars() {
            if lookahead.next() != Some(expected) {
                return false;
            }
            matched += 1;
        }
        if lookahead.peek().map(|&c| is_identifier_char(c)).unwrap_or(false) {
            return false;
        }

        for _ in 0..gap + matched {
            self.advance();
        }
        true
    }

    /// Create token with current span and raw text
    pub fn make_token(
        &self,
        kind: TokenKind,
    ) -> Token {
        let text = self
            .source
            .get(self.start_offset..self.offset)
            .unwrap_or_default();
        Token::new(kind, text, self.span())
    }
}
