use serde::Serialize;

use super::types::Type;

/// Source location for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Expression with type annotation and source location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    /// Filled in by the semantic analyzer; `Unknown` until then.
    pub ty: Type,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self {
            kind,
            span,
            ty: Type::Unknown,
        }
    }

    pub fn binary(op: BinOpKind, left: Expr, right: Expr, span: Span) -> Self {
        Self::new(
            ExprKind::BinOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        )
    }

    pub fn is_str_literal(&self) -> bool {
        matches!(self.kind, ExprKind::StrLiteral(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExprKind {
    IntLiteral(i64),

    FloatLiteral(f64),

    StrLiteral(String),

    BoolLiteral(bool),

    /// Variable reference
    Var(String),

    BinOp {
        op: BinOpKind,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinOpKind {
    /// `+`: numeric addition or text concatenation
    Add,
    /// `?=`: equality test
    Eq,
}

impl std::fmt::Display for BinOpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinOpKind::Add => write!(f, "+"),
            BinOpKind::Eq => write!(f, "?="),
        }
    }
}

/// Format a float so the result always reads back as a floating-point literal.
pub fn format_float(value: f64) -> String {
    let mut s = value.to_string();
    if !s.contains(['.', 'e', 'E']) && value.is_finite() {
        s.push_str(".0");
    }
    s
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ExprKind::IntLiteral(v) => write!(f, "{}", v),
            ExprKind::FloatLiteral(v) => write!(f, "{}", format_float(*v)),
            ExprKind::StrLiteral(s) => {
                write!(f, "\"")?;
                for c in s.chars() {
                    match c {
                        '"' => write!(f, "\\\"")?,
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        '\t' => write!(f, "\\t")?,
                        other => write!(f, "{}", other)?,
                    }
                }
                write!(f, "\"")
            }
            ExprKind::BoolLiteral(b) => write!(f, "{}", b),
            ExprKind::Var(name) => write!(f, "{}", name),
            ExprKind::BinOp { op, left, right } => write!(f, "({} {} {})", left, op, right),
        }
    }
}
