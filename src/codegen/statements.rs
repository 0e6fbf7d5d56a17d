use anyhow::Result;

use crate::ast::{Stmt, StmtKind, Type};

use super::{cpp_type, Codegen};

impl Codegen {
    pub(super) fn emit_stmt(&mut self, stmt: &Stmt) -> Result<()> {
        match &stmt.kind {
            StmtKind::VarDecl { ty, name, value } => {
                let ty = cpp_type(*ty)?;
                let value = self.render_expr(value)?;
                self.line(format!("{} {} = {};", ty, name, value));
            }

            StmtKind::Says(expr) => {
                let code = self.render_expr(expr)?;
                let operand = match expr.ty {
                    Type::Text | Type::Number | Type::LNumber | Type::Riel | Type::Logic => code,
                    _ => format!("std::to_string({})", code),
                };
                self.line(format!("std::cout << ({}) << std::endl;", operand));
            }

            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let condition = self.render_expr(condition)?;
                self.line(format!("if ({}) {{", condition));
                self.emit_branch(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.line("} else {");
                    self.emit_branch(else_branch)?;
                }
                self.line("}");
            }

            StmtKind::Block(stmts) => {
                self.line("{");
                self.emit_nested(stmts)?;
                self.line("}");
            }
        }
        Ok(())
    }

    /// Emit the body of an if/else arm between braces the caller has opened.
    /// A block arm lends its braces; a bare statement gets synthesized ones.
    fn emit_branch(&mut self, branch: &Stmt) -> Result<()> {
        match &branch.kind {
            StmtKind::Block(stmts) => self.emit_nested(stmts),
            _ => self.emit_nested(std::slice::from_ref(branch)),
        }
    }

    fn emit_nested(&mut self, stmts: &[Stmt]) -> Result<()> {
        self.indent += 1;
        for stmt in stmts {
            self.emit_stmt(stmt)?;
        }
        self.indent -= 1;
        Ok(())
    }
}
