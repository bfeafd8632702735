//! Lexer: UTF-8 source text to a token stream.
//!
//! Mirrors the teacher's `src/lexer/mod.rs` shape (a `Peekable<Chars>` cursor tracking
//! line/column by hand) but produces tokens one at a time via [`Lexer::next_token`] instead of
//! eagerly collecting a `Vec<Token>`, since the parser only ever needs one token of lookahead.

use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

use once_cell::sync::Lazy;

use crate::token::{Position, Token, TokenKind};

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    use TokenKind::*;
    HashMap::from([
        ("dhoro", Let),
        ("jodi", If),
        ("nahole", Else),
        ("jotokkhon", While),
        ("ghuriye", For),
        ("kaj", Function),
        ("ferao", Return),
        ("sreni", Class),
        ("shuru", Constructor),
        ("notun", New),
        ("sotti", True),
        ("mittha", False),
        ("khali", Null),
        ("ebong", And),
        ("ba", Or),
        ("na", Not),
        ("thamo", Break),
        ("chharo", Continue),
        ("felo", Throw),
        ("chesta", Try),
        ("dhoro_bhul", Catch),
        ("shesh", Finally),
        ("ano", Import),
        ("pathao", Export),
        ("hisabe", As),
        ("osinkrono", Async),
        ("opekha", Await),
    ])
});

/// Produces [`Token`]s from source text on demand.
pub struct Lexer<'a> {
    iterator: Peekable<Chars<'a>>,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            iterator: input.chars().peekable(),
            line: 1,
            col: 1,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.iterator.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let next = self.iterator.next();
        if let Some(c) = next {
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        next
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') => {
                    let mut lookahead = self.iterator.clone();
                    lookahead.next();
                    if lookahead.peek() == Some(&'/') {
                        while let Some(c) = self.peek() {
                            if c == '\n' {
                                break;
                            }
                            self.bump();
                        }
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
    }

    /// Produce the next token, or an end-of-input token once the source is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        let position = (self.line, self.col);

        let Some(c) = self.peek() else {
            return Token::eof(position);
        };

        match c {
            'a'..='z' | 'A'..='Z' | '_' => self.lex_identifier(position),
            '0'..='9' => self.lex_number(position),
            '"' | '\'' => self.lex_string(position, c),
            _ => self.lex_operator(position),
        }
    }

    fn lex_identifier(&mut self, position: Position) -> Token {
        let mut value = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                value.push(c);
                self.bump();
            } else {
                break;
            }
        }

        let kind = KEYWORDS.get(value.as_str()).copied().unwrap_or(TokenKind::Ident);
        Token::new(kind, value, position)
    }

    fn lex_number(&mut self, position: Position) -> Token {
        let mut value = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                value.push(c);
                self.bump();
            } else {
                break;
            }
        }

        if self.peek() == Some('.') {
            let mut lookahead = self.iterator.clone();
            lookahead.next();
            if matches!(lookahead.peek(), Some(c) if c.is_ascii_digit()) {
                value.push('.');
                self.bump();
                while let Some(c) = self.peek() {
                    if c.is_ascii_digit() {
                        value.push(c);
                        self.bump();
                    } else {
                        break;
                    }
                }
            }
        }

        Token::new(TokenKind::Number, value, position)
    }

    fn lex_string(&mut self, position: Position, delimiter: char) -> Token {
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                Some(c) if c == delimiter => {
                    return Token::new(TokenKind::String, value, position);
                }
                Some(c) => value.push(c),
                None => {
                    return Token::new(
                        TokenKind::Illegal,
                        format!("unterminated string starting with {value}"),
                        position,
                    );
                }
            }
        }
    }

    fn lex_operator(&mut self, position: Position) -> Token {
        let first = self.bump().expect("checked by caller");
        let second = self.peek();

        let two_char = second.map(|s| format!("{first}{s}"));

        macro_rules! two_then_one {
            ($($two:literal => $two_kind:ident),* ; $one:ident) => {{
                if let Some(pair) = &two_char {
                    match pair.as_str() {
                        $(
                            $two => {
                                self.bump();
                                return Token::new(TokenKind::$two_kind, pair.clone(), position);
                            }
                        )*
                        _ => {}
                    }
                }
                Token::new(TokenKind::$one, first.to_string(), position)
            }};
        }

        match first {
            '=' => two_then_one!("==" => Eq; Assign),
            '!' => two_then_one!("!=" => NotEq; Bang),
            '<' => two_then_one!("<=" => Lte; Lt),
            '>' => two_then_one!(">=" => Gte; Gt),
            '+' => two_then_one!("+=" => PlusAssign; Plus),
            '-' => two_then_one!("-=" => MinusAssign; Minus),
            '*' => two_then_one!("*=" => AsteriskAssign; Asterisk),
            '/' => two_then_one!("/=" => SlashAssign; Slash),
            '%' => Token::new(TokenKind::Percent, first.to_string(), position),
            ',' => Token::new(TokenKind::Comma, first.to_string(), position),
            ';' => Token::new(TokenKind::Semicolon, first.to_string(), position),
            ':' => Token::new(TokenKind::Colon, first.to_string(), position),
            '.' => Token::new(TokenKind::Dot, first.to_string(), position),
            '(' => Token::new(TokenKind::LParen, first.to_string(), position),
            ')' => Token::new(TokenKind::RParen, first.to_string(), position),
            '{' => Token::new(TokenKind::LBrace, first.to_string(), position),
            '}' => Token::new(TokenKind::RBrace, first.to_string(), position),
            '[' => Token::new(TokenKind::LBracket, first.to_string(), position),
            ']' => Token::new(TokenKind::RBracket, first.to_string(), position),
            other => Token::new(TokenKind::Illegal, other.to_string(), position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input);
        let mut out = vec![];
        loop {
            let tok = lexer.next_token();
            let done = tok.kind == TokenKind::Eof;
            out.push(tok.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn test_lex_keywords() {
        let input = "dhoro jodi nahole jotokkhon ghuriye kaj ferao sreni shuru notun sotti mittha khali ebong ba na thamo chharo felo chesta dhoro_bhul shesh ano pathao hisabe osinkrono opekha";
        use TokenKind::*;
        assert_eq!(
            kinds(input),
            vec![
                Let, If, Else, While, For, Function, Return, Class, Constructor, New, True,
                False, Null, And, Or, Not, Break, Continue, Throw, Try, Catch, Finally, Import,
                Export, As, Async, Await, Eof,
            ]
        );
    }

    #[test]
    fn test_lex_identifier_not_keyword() {
        let mut lexer = Lexer::new("letter");
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Ident);
        assert_eq!(tok.literal, "letter");
    }

    #[test]
    fn test_lex_number_integer_and_fraction() {
        let mut lexer = Lexer::new("1337 3.14");
        let first = lexer.next_token();
        assert_eq!(first.literal, "1337");
        let second = lexer.next_token();
        assert_eq!(second.literal, "3.14");
    }

    #[test]
    fn test_lex_trailing_dot_without_digit_is_two_tokens() {
        let mut lexer = Lexer::new("1.");
        let number = lexer.next_token();
        assert_eq!(number.kind, TokenKind::Number);
        assert_eq!(number.literal, "1");
        let dot = lexer.next_token();
        assert_eq!(dot.kind, TokenKind::Dot);
    }

    #[test]
    fn test_lex_strings_both_delimiters() {
        let mut lexer = Lexer::new(r#""hello" 'world'"#);
        let first = lexer.next_token();
        assert_eq!(first.kind, TokenKind::String);
        assert_eq!(first.literal, "hello");
        let second = lexer.next_token();
        assert_eq!(second.literal, "world");
    }

    #[test]
    fn test_lex_unterminated_string_is_illegal() {
        let mut lexer = Lexer::new(r#""oops"#);
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Illegal);
    }

    #[test]
    fn test_lex_two_char_operators() {
        use TokenKind::*;
        assert_eq!(
            kinds("= == != < > <= >= + - * / % ! += -= *= /="),
            vec![
                Assign, Eq, NotEq, Lt, Gt, Lte, Gte, Plus, Minus, Asterisk, Slash, Percent, Bang,
                PlusAssign, MinusAssign, AsteriskAssign, SlashAssign, Eof,
            ]
        );
    }

    #[test]
    fn test_lex_line_comment_to_end_of_line() {
        let mut lexer = Lexer::new("dhoro x = 1; // comment\nferao x;");
        let mut seen = vec![];
        loop {
            let tok = lexer.next_token();
            if tok.kind == TokenKind::Eof {
                break;
            }
            seen.push(tok.literal);
        }
        assert_eq!(seen, vec!["dhoro", "x", "=", "1", ";", "ferao", "x", ";"]);
    }

    #[test]
    fn test_lex_tracks_line_and_column() {
        let mut lexer = Lexer::new("dhoro x\n= 1;");
        let dhoro = lexer.next_token();
        assert_eq!(dhoro.position, (1, 1));
        let x = lexer.next_token();
        assert_eq!(x.position, (1, 7));
        let assign = lexer.next_token();
        assert_eq!(assign.position, (2, 1));
    }

    #[test]
    fn test_lex_illegal_character() {
        let mut lexer = Lexer::new("@");
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Illegal);
        assert_eq!(tok.literal, "@");
    }

    #[test]
    fn test_lexer_totality_terminates_with_single_eof() {
        let input = "dhoro x = notun Foo().bar[0] + 1 // trailing comment";
        let toks = kinds(input);
        assert_eq!(toks.last(), Some(&TokenKind::Eof));
        assert_eq!(toks.iter().filter(|k| **k == TokenKind::Eof).count(), 1);
    }
}
