use serde::Serialize;

use super::expr::{Expr, Span};
use super::types::Type;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn is_block(&self) -> bool {
        matches!(self.kind, StmtKind::Block(_))
    }

    /// Render as HumanScript source, nested `indent` levels deep.
    pub(crate) fn write_source(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        indent: usize,
    ) -> std::fmt::Result {
        let pad = "    ".repeat(indent);
        match &self.kind {
            StmtKind::VarDecl { ty, name, value } => {
                writeln!(f, "{}{} {} := {};", pad, ty, name, value)
            }
            StmtKind::Says(expr) => writeln!(f, "{}says {};", pad, expr),
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                writeln!(f, "{}if ({})", pad, condition)?;
                then_branch.write_branch(f, indent)?;
                if let Some(else_branch) = else_branch {
                    writeln!(f, "{}else", pad)?;
                    else_branch.write_branch(f, indent)?;
                }
                Ok(())
            }
            StmtKind::Block(stmts) => {
                writeln!(f, "{}{{", pad)?;
                for stmt in stmts {
                    stmt.write_source(f, indent + 1)?;
                }
                writeln!(f, "{}}}", pad)
            }
        }
    }

    fn write_branch(&self, f: &mut std::fmt::Formatter<'_>, indent: usize) -> std::fmt::Result {
        if self.is_block() {
            self.write_source(f, indent)
        } else {
            self.write_source(f, indent + 1)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StmtKind {
    /// `<type> name := value;`
    VarDecl {
        ty: Type,
        name: String,
        value: Expr,
    },

    /// `says expr;`
    Says(Expr),

    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    /// `{ ... }`; never opens a new scope
    Block(Vec<Stmt>),
}

impl std::fmt::Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write_source(f, 0)
    }
}
