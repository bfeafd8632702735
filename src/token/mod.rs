//! Token model for Katha source text.
//!
//! A [`Token`] is a small, short-lived value: the lexer produces them on demand and the
//! parser consumes them with one-token lookahead. Only a node's originating literal (not the
//! token itself) is retained in the AST.

use std::fmt::{self, Display};

/// A 1-based (line, column) position within a source file.
pub type Position = (usize, usize);

/// The kind of a token, including every keyword, operator and delimiter Katha recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum TokenKind {
    Ident,
    Number,
    String,

    // keywords
    Let,
    If,
    Else,
    While,
    For,
    Function,
    Return,
    Class,
    Constructor,
    New,
    True,
    False,
    Null,
    And,
    Or,
    Not,
    Break,
    Continue,
    Throw,
    Try,
    Catch,
    Finally,
    Import,
    Export,
    As,
    Async,
    Await,

    // operators
    Assign,
    Eq,
    NotEq,
    Lt,
    Gt,
    Lte,
    Gte,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,
    Bang,
    PlusAssign,
    MinusAssign,
    AsteriskAssign,
    SlashAssign,

    // delimiters
    Comma,
    Semicolon,
    Colon,
    Dot,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    Illegal,
    Eof,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A single lexical token: its kind, the literal text it was read from, and its source
/// position (1-based line and column, pointing at the token's first character).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            literal: literal.into(),
            position,
        }
    }

    pub fn eof(position: Position) -> Self {
        Self::new(TokenKind::Eof, "", position)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' ({:?})", self.literal, self.kind)
    }
}
