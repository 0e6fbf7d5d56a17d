//! Turns HumanScript source text into a flat token sequence.
//!
//! The sequence always ends with exactly one terminal token: `EndOfFile` for
//! fully scanned input, or `Unknown` when scanning stopped at a character
//! the language does not use.

mod token;

pub use token::{keyword, Literal, Token, TokenKind};

use anyhow::Result;

use crate::errors::{CompileError, ErrorCategory};

/// Tokenize a whole source text.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Lexer::new(source).tokenize()
}

pub struct Lexer<'a> {
    source: &'a str,
    /// Byte offset of the next unread character
    pos: usize,
    line: usize,
    column: usize,
    diagnostics: Vec<String>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            column: 1,
            diagnostics: Vec::new(),
        }
    }

    /// Warnings recorded while scanning (out-of-range numeric literals).
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let terminal = token.kind.is_terminal();
            if token.kind == TokenKind::Unknown {
                log::debug!(
                    "stopping at unknown character '{}' on line {}",
                    token.text,
                    token.line
                );
            }
            tokens.push(token);
            if terminal {
                break;
            }
        }
        Ok(tokens)
    }

    // ── character cursor ───────────────────────────────────────────────

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        self.source[self.pos..].chars().nth(1)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() {
                self.advance();
            } else if c == '/' && self.peek_next() == Some('/') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn lex_error(&self, line: usize, message: String) -> anyhow::Error {
        CompileError::new(ErrorCategory::LexError, message)
            .at_line(line)
            .with_source(self.source)
            .into()
    }

    // ── token scanners ─────────────────────────────────────────────────

    fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments();

        let start = self.pos;
        let (line, column) = (self.line, self.column);

        let Some(c) = self.peek() else {
            return Ok(Token::new(TokenKind::EndOfFile, "", line, column));
        };

        if c.is_ascii_alphabetic() || c == '_' {
            return Ok(self.scan_identifier_or_keyword(start, line, column));
        }

        if c.is_ascii_digit() || (c == '.' && self.peek_next().is_some_and(|n| n.is_ascii_digit()))
        {
            return Ok(self.scan_number(start, line, column));
        }

        if c == '"' {
            return self.scan_string(start, line, column);
        }

        let followed_by_eq = self.peek_next() == Some('=');
        let (kind, width) = match c {
            ':' if followed_by_eq => (TokenKind::ColonEquals, 2),
            '?' if followed_by_eq => (TokenKind::QuestionEquals, 2),
            '+' => (TokenKind::Plus, 1),
            ';' => (TokenKind::Semicolon, 1),
            '(' => (TokenKind::LParen, 1),
            ')' => (TokenKind::RParen, 1),
            '{' => (TokenKind::LBrace, 1),
            '}' => (TokenKind::RBrace, 1),
            '<' => (TokenKind::Less, 1),
            '>' => (TokenKind::Greater, 1),
            '.' => (TokenKind::Dot, 1),
            '/' => (TokenKind::Slash, 1),
            _ => (TokenKind::Unknown, 1),
        };

        for _ in 0..width {
            self.advance();
        }
        Ok(Token::new(kind, &self.source[start..self.pos], line, column))
    }

    fn scan_identifier_or_keyword(&mut self, start: usize, line: usize, column: usize) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }
        let source = self.source;
        let text = &source[start..self.pos];

        match keyword(text) {
            Some(TokenKind::KwTrue) => {
                Token::new(TokenKind::KwTrue, text, line, column).with_literal(Literal::Bool(true))
            }
            Some(TokenKind::KwFalse) => Token::new(TokenKind::KwFalse, text, line, column)
                .with_literal(Literal::Bool(false)),
            Some(kind) => Token::new(kind, text, line, column),
            None => Token::new(TokenKind::Identifier, text, line, column),
        }
    }

    fn scan_number(&mut self, start: usize, line: usize, column: usize) -> Token {
        let mut is_double = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else if c == '.'
                && !is_double
                && self.peek_next().is_some_and(|n| n.is_ascii_digit())
            {
                is_double = true;
                self.advance();
            } else {
                break;
            }
        }
        let source = self.source;
        let text = &source[start..self.pos];

        if is_double {
            let value = match text.parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => {
                    self.warn(format!(
                        "line {}: floating-point literal '{}' is out of range, using 0.0",
                        line, text
                    ));
                    0.0
                }
            };
            return Token::new(TokenKind::DoubleLiteral, text, line, column)
                .with_literal(Literal::Double(value));
        }

        let literal = if let Ok(v) = text.parse::<i32>() {
            Literal::Int(v)
        } else if let Ok(v) = text.parse::<i64>() {
            Literal::Long(v)
        } else {
            self.warn(format!(
                "line {}: integer literal '{}' is out of range for lnumber, using 0",
                line, text
            ));
            Literal::Long(0)
        };
        Token::new(TokenKind::IntegerLiteral, text, line, column).with_literal(literal)
    }

    fn scan_string(&mut self, start: usize, line: usize, column: usize) -> Result<Token> {
        self.advance(); // opening quote

        let mut value = String::new();
        loop {
            match self.advance() {
                None => {
                    return Err(self.lex_error(line, "unterminated string literal".to_string()));
                }
                Some('"') => break,
                Some('\\') => match self.advance() {
                    None => {
                        return Err(
                            self.lex_error(line, "unterminated string literal".to_string())
                        );
                    }
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some(other) => value.push(other),
                },
                Some(c) => value.push(c),
            }
        }

        Ok(
            Token::new(TokenKind::StringLiteral, &self.source[start..self.pos], line, column)
                .with_literal(Literal::Str(value)),
        )
    }

    fn warn(&mut self, message: String) {
        log::warn!("{}", message);
        self.diagnostics.push(message);
    }
}
