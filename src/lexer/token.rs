use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Type keywords
    KwNumber,
    KwLNumber,
    KwText,
    KwLogic,
    KwRiel,

    // Other keywords
    KwSays,
    KwTrue,
    KwFalse,
    KwUse,
    KwIf,
    KwElse,

    Identifier,

    // Literals
    IntegerLiteral,
    DoubleLiteral,
    StringLiteral,

    // Operators
    ColonEquals,
    QuestionEquals,
    Plus,

    // Punctuation
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Less,
    Greater,
    Dot,
    Slash,

    EndOfFile,
    Unknown,
}

impl TokenKind {
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::KwNumber
                | TokenKind::KwLNumber
                | TokenKind::KwText
                | TokenKind::KwLogic
                | TokenKind::KwRiel
        )
    }

    /// Either of the two tokens that end a token sequence.
    pub fn is_terminal(self) -> bool {
        matches!(self, TokenKind::EndOfFile | TokenKind::Unknown)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use TokenKind::*;

        match self {
            KwNumber => write!(f, "`number`"),
            KwLNumber => write!(f, "`lnumber`"),
            KwText => write!(f, "`text`"),
            KwLogic => write!(f, "`logic`"),
            KwRiel => write!(f, "`riel`"),
            KwSays => write!(f, "`says`"),
            KwTrue => write!(f, "`true`"),
            KwFalse => write!(f, "`false`"),
            KwUse => write!(f, "`use`"),
            KwIf => write!(f, "`if`"),
            KwElse => write!(f, "`else`"),
            Identifier => write!(f, "identifier"),
            IntegerLiteral => write!(f, "integer literal"),
            DoubleLiteral => write!(f, "floating-point literal"),
            StringLiteral => write!(f, "string literal"),
            ColonEquals => write!(f, "`:=`"),
            QuestionEquals => write!(f, "`?=`"),
            Plus => write!(f, "`+`"),
            Semicolon => write!(f, "`;`"),
            LParen => write!(f, "`(`"),
            RParen => write!(f, "`)`"),
            LBrace => write!(f, "`{{`"),
            RBrace => write!(f, "`}}`"),
            Less => write!(f, "`<`"),
            Greater => write!(f, "`>`"),
            Dot => write!(f, "`.`"),
            Slash => write!(f, "`/`"),
            EndOfFile => write!(f, "end of file"),
            Unknown => write!(f, "unknown character"),
        }
    }
}

/// Look up the keyword table; `None` means a plain identifier.
pub fn keyword(ident: &str) -> Option<TokenKind> {
    let kind = match ident {
        "number" => TokenKind::KwNumber,
        "lnumber" => TokenKind::KwLNumber,
        "text" => TokenKind::KwText,
        "logic" => TokenKind::KwLogic,
        "riel" => TokenKind::KwRiel,
        "says" => TokenKind::KwSays,
        "true" => TokenKind::KwTrue,
        "false" => TokenKind::KwFalse,
        "use" => TokenKind::KwUse,
        "if" => TokenKind::KwIf,
        "else" => TokenKind::KwElse,
        _ => return None,
    };
    Some(kind)
}

/// Decoded value carried by literal tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    Int(i32),
    Long(i64),
    Double(f64),
    Str(String),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source slice the token was scanned from.
    pub text: String,
    pub literal: Option<Literal>,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            literal: None,
            line,
            column,
        }
    }

    pub fn with_literal(mut self, literal: Literal) -> Self {
        self.literal = Some(literal);
        self
    }

    /// Short human-readable description used in parse errors.
    pub fn describe(&self) -> String {
        use TokenKind::*;

        match self.kind {
            Identifier | IntegerLiteral | DoubleLiteral | StringLiteral | Unknown => {
                format!("{} '{}'", self.kind, self.text)
            }
            _ => self.kind.to_string(),
        }
    }
}
