mod expr;
mod stmt;
mod types;

pub use expr::{format_float, BinOpKind, Expr, ExprKind, Span};
pub use stmt::{Stmt, StmtKind};
pub use types::Type;

use serde::Serialize;

/// `use <header>;`, carried verbatim into the generated output as an `#include`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UseDecl {
    pub header: String,
    pub span: Span,
}

impl UseDecl {
    pub fn new(header: impl Into<String>, span: Span) -> Self {
        Self {
            header: header.into(),
            span,
        }
    }
}

impl std::fmt::Display for UseDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "use <{}>;", self.header)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Program {
    pub uses: Vec<UseDecl>,
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn is_empty(&self) -> bool {
        self.uses.is_empty() && self.statements.is_empty()
    }

    pub fn uses_header(&self, header: &str) -> bool {
        self.uses.iter().any(|u| u.header == header)
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for decl in &self.uses {
            writeln!(f, "{}", decl)?;
        }
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}
