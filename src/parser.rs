//! Recursive-descent parser for HumanScript.
//!
//! ```text
//! program     := use-decl* statement*
//! use-decl    := "use" "<" header-path ">" ";"
//! header-path := (identifier | "." | "/" | integer)+
//! statement   := var-decl | says-stmt | if-stmt
//! var-decl    := type-keyword identifier ":=" expression ";"
//! says-stmt   := "says" expression ";"
//! if-stmt     := "if" "(" expression ")" branch ("else" branch)?
//! branch      := block | statement
//! block       := "{" statement* "}"
//! expression  := comparison
//! comparison  := addition ("?=" addition)*
//! addition    := factor ("+" factor)*
//! factor      := INTEGER | DOUBLE | STRING | "true" | "false"
//!              | IDENTIFIER | "(" expression ")"
//! ```

use anyhow::Result;

use crate::ast::{BinOpKind, Expr, ExprKind, Program, Span, Stmt, StmtKind, Type, UseDecl};
use crate::errors::{CompileError, ErrorCategory};
use crate::lexer::{Literal, Token, TokenKind};

/// Parse a complete token sequence into a program.
pub fn parse(tokens: Vec<Token>) -> Result<Program> {
    Parser::new(tokens).parse_program()
}

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    /// Returned by `peek` once the sequence is exhausted
    eof: Token,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let (line, column) = tokens
            .last()
            .map(|t| (t.line, t.column))
            .unwrap_or((1, 1));
        Self {
            tokens,
            current: 0,
            eof: Token::new(TokenKind::EndOfFile, "", line, column),
        }
    }

    // ── token cursor ───────────────────────────────────────────────────

    fn peek(&self) -> &Token {
        self.tokens.get(self.current).unwrap_or(&self.eof)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.current < self.tokens.len() {
            self.current += 1;
        }
        token
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, kind: TokenKind, context: &str) -> Result<Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        Err(self.error_at_current(format!(
            "expected {} {}, found {}",
            kind,
            context,
            self.peek().describe()
        )))
    }

    fn error_at_current(&self, message: String) -> anyhow::Error {
        CompileError::new(ErrorCategory::ParseError, message)
            .at_line(self.peek().line)
            .into()
    }

    fn span_of(token: &Token) -> Span {
        Span::new(token.line, token.column)
    }

    // ── program structure ──────────────────────────────────────────────

    pub fn parse_program(mut self) -> Result<Program> {
        let mut program = Program::default();

        while self.check(TokenKind::KwUse) {
            program.uses.push(self.parse_use_declaration()?);
        }

        loop {
            let token = self.peek();
            match token.kind {
                TokenKind::EndOfFile => break,
                kind if kind.is_type_keyword() => {}
                TokenKind::KwSays | TokenKind::KwIf => {}
                TokenKind::Unknown => {
                    return Err(self.error_at_current(format!(
                        "encountered unknown character '{}' from the lexer",
                        token.text
                    )));
                }
                _ => {
                    return Err(self.error_at_current(format!(
                        "unexpected token {} at top level",
                        token.describe()
                    )));
                }
            }
            program.statements.push(self.parse_statement()?);
        }

        log::debug!(
            "parsed {} use declaration(s) and {} statement(s)",
            program.uses.len(),
            program.statements.len()
        );
        Ok(program)
    }

    fn parse_use_declaration(&mut self) -> Result<UseDecl> {
        let use_token = self.consume(TokenKind::KwUse, "to start a use declaration")?;
        self.consume(TokenKind::Less, "after `use`")?;
        let header = self.parse_header_path()?;
        self.consume(TokenKind::Greater, "after the header path")?;
        self.consume(TokenKind::Semicolon, "after a use declaration")?;
        Ok(UseDecl::new(header, Self::span_of(&use_token)))
    }

    fn parse_header_path(&mut self) -> Result<String> {
        let mut path = String::new();
        while !self.check(TokenKind::Greater) && !self.peek().kind.is_terminal() {
            match self.peek().kind {
                TokenKind::Identifier
                | TokenKind::Dot
                | TokenKind::Slash
                | TokenKind::IntegerLiteral => {
                    let part = self.advance();
                    path.push_str(&part.text);
                }
                _ => {
                    return Err(self.error_at_current(format!(
                        "invalid token {} inside use <...> path",
                        self.peek().describe()
                    )));
                }
            }
        }
        if path.is_empty() {
            return Err(self.error_at_current("empty path in use <...> declaration".to_string()));
        }
        Ok(path)
    }

    // ── statements ─────────────────────────────────────────────────────

    fn parse_statement(&mut self) -> Result<Stmt> {
        let kind = self.peek().kind;
        match kind {
            k if k.is_type_keyword() => self.parse_variable_declaration(),
            TokenKind::KwSays => self.parse_says_statement(),
            TokenKind::KwIf => self.parse_if_statement(),
            _ => Err(self.error_at_current(format!(
                "expected a statement, found {}",
                self.peek().describe()
            ))),
        }
    }

    fn parse_variable_declaration(&mut self) -> Result<Stmt> {
        let type_token = self.advance();
        let ty = match type_token.kind {
            TokenKind::KwNumber => Type::Number,
            TokenKind::KwLNumber => Type::LNumber,
            TokenKind::KwText => Type::Text,
            TokenKind::KwLogic => Type::Logic,
            TokenKind::KwRiel => Type::Riel,
            other => {
                return Err(CompileError::new(
                    ErrorCategory::ParseError,
                    format!("expected a type keyword, found {}", other),
                )
                .at_line(type_token.line)
                .into());
            }
        };

        let name = self
            .consume(TokenKind::Identifier, "after the type keyword")?
            .text;
        self.consume(TokenKind::ColonEquals, "after the variable name")?;
        let value = self.parse_expression()?;
        self.consume(TokenKind::Semicolon, "after a variable declaration")?;

        Ok(Stmt::new(
            StmtKind::VarDecl { ty, name, value },
            Self::span_of(&type_token),
        ))
    }

    fn parse_says_statement(&mut self) -> Result<Stmt> {
        let says_token = self.consume(TokenKind::KwSays, "to start a says statement")?;
        let expr = self.parse_expression()?;
        self.consume(TokenKind::Semicolon, "after a says statement")?;
        Ok(Stmt::new(StmtKind::Says(expr), Self::span_of(&says_token)))
    }

    fn parse_if_statement(&mut self) -> Result<Stmt> {
        let if_token = self.consume(TokenKind::KwIf, "to start an if statement")?;
        self.consume(TokenKind::LParen, "after `if`")?;
        let condition = self.parse_expression()?;
        self.consume(TokenKind::RParen, "after the if condition")?;

        let then_branch = Box::new(self.parse_branch()?);
        // The optional else is consumed here, so it binds to the nearest if.
        let else_branch = if self.match_kind(TokenKind::KwElse) {
            Some(Box::new(self.parse_branch()?))
        } else {
            None
        };

        Ok(Stmt::new(
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            },
            Self::span_of(&if_token),
        ))
    }

    fn parse_branch(&mut self) -> Result<Stmt> {
        if self.check(TokenKind::LBrace) {
            self.parse_block()
        } else {
            self.parse_statement()
        }
    }

    fn parse_block(&mut self) -> Result<Stmt> {
        let open = self.consume(TokenKind::LBrace, "to open a block")?;
        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.peek().kind.is_terminal() {
            statements.push(self.parse_statement()?);
        }
        self.consume(TokenKind::RBrace, "to close the block")?;
        Ok(Stmt::new(StmtKind::Block(statements), Self::span_of(&open)))
    }

    // ── expressions ────────────────────────────────────────────────────

    fn parse_expression(&mut self) -> Result<Expr> {
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr> {
        let mut left = self.parse_addition()?;
        while self.check(TokenKind::QuestionEquals) {
            let op_token = self.advance();
            let right = self.parse_addition()?;
            left = Expr::binary(BinOpKind::Eq, left, right, Self::span_of(&op_token));
        }
        Ok(left)
    }

    fn parse_addition(&mut self) -> Result<Expr> {
        let mut left = self.parse_factor()?;
        while self.check(TokenKind::Plus) {
            let op_token = self.advance();
            let right = self.parse_factor()?;
            left = Expr::binary(BinOpKind::Add, left, right, Self::span_of(&op_token));
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expr> {
        let token = self.peek().clone();
        let span = Self::span_of(&token);

        let kind = match (token.kind, &token.literal) {
            (TokenKind::IntegerLiteral, Some(Literal::Int(v))) => ExprKind::IntLiteral(i64::from(*v)),
            (TokenKind::IntegerLiteral, Some(Literal::Long(v))) => ExprKind::IntLiteral(*v),
            (TokenKind::DoubleLiteral, Some(Literal::Double(v))) => ExprKind::FloatLiteral(*v),
            (TokenKind::StringLiteral, Some(Literal::Str(s))) => ExprKind::StrLiteral(s.clone()),
            (TokenKind::KwTrue, _) => ExprKind::BoolLiteral(true),
            (TokenKind::KwFalse, _) => ExprKind::BoolLiteral(false),
            (TokenKind::Identifier, _) => ExprKind::Var(token.text.clone()),
            (TokenKind::LParen, _) => {
                self.advance();
                let expr = self.parse_expression()?;
                self.consume(TokenKind::RParen, "to close the grouped expression")?;
                return Ok(expr);
            }
            (
                TokenKind::IntegerLiteral | TokenKind::DoubleLiteral | TokenKind::StringLiteral,
                _,
            ) => {
                return Err(self.error_at_current(format!(
                    "literal token {} carries no value",
                    token.describe()
                )));
            }
            _ => {
                return Err(self.error_at_current(format!(
                    "expected an expression (literal, identifier or parentheses), found {}",
                    token.describe()
                )));
            }
        };

        self.advance();
        Ok(Expr::new(kind, span))
    }
}
