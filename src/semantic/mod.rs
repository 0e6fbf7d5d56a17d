//! Type checking over the parsed tree.
//!
//! The analyzer walks statements in document order against one flat symbol
//! table, writes the resolved type of every expression into its `ty` field,
//! and stops at the first error.

pub mod type_rules;

use anyhow::Result;

use crate::ast::{Expr, ExprKind, Program, Span, Stmt, StmtKind, Type};
use crate::errors::{CompileError, ErrorCategory};
use crate::symbol_table::SymbolTable;

use type_rules::{binop_result_type, binop_type_error_message, is_assignable};

pub struct SemanticAnalyzer {
    symbols: SymbolTable,
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
        }
    }

    /// Symbols declared by the most recent `analyze` run.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Analyze `program` and hand the annotated tree back.
    pub fn annotate(&mut self, mut program: Program) -> Result<Program> {
        self.analyze(&mut program)?;
        Ok(program)
    }

    /// Type-check `program`, annotating every expression in place.
    pub fn analyze(&mut self, program: &mut Program) -> Result<()> {
        self.symbols.clear();

        for decl in &program.uses {
            log::debug!("processing 'use <{}>;' declaration", decl.header);
        }

        for stmt in &mut program.statements {
            self.analyze_stmt(stmt)?;
        }

        Ok(())
    }

    fn semantic_error(span: Span, message: String) -> anyhow::Error {
        CompileError::new(ErrorCategory::SemanticError, message)
            .at_line(span.line)
            .into()
    }

    // ── statements ─────────────────────────────────────────────────────

    fn analyze_stmt(&mut self, stmt: &mut Stmt) -> Result<()> {
        let span = stmt.span;
        match &mut stmt.kind {
            StmtKind::VarDecl { ty, name, value } => {
                if self.symbols.contains(name) {
                    return Err(Self::semantic_error(
                        span,
                        format!("variable '{}' already declared", name),
                    ));
                }

                let value_ty = self.analyze_expr(value)?;
                if !is_assignable(*ty, value_ty) {
                    return Err(Self::semantic_error(
                        span,
                        format!(
                            "type mismatch in declaration of '{}': cannot assign `{}` to `{}`",
                            name, value_ty, ty
                        ),
                    ));
                }

                self.symbols.declare(name.clone(), *ty);
                log::debug!("declared variable '{}' of type {}", name, ty);
            }

            StmtKind::Says(expr) => {
                let ty = self.analyze_expr(expr)?;
                if !ty.is_value() {
                    return Err(Self::semantic_error(
                        span,
                        format!("'says' cannot print a value of type `{}`", ty),
                    ));
                }
                log::debug!("'says' statement with expression of type {}", ty);
            }

            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let condition_ty = self.analyze_expr(condition)?;
                if condition_ty != Type::Logic {
                    return Err(Self::semantic_error(
                        span,
                        format!("if condition must be `logic`, got `{}`", condition_ty),
                    ));
                }

                self.analyze_stmt(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.analyze_stmt(else_branch)?;
                }
            }

            StmtKind::Block(stmts) => {
                for stmt in stmts {
                    self.analyze_stmt(stmt)?;
                }
            }
        }

        Ok(())
    }

    // ── expressions ────────────────────────────────────────────────────

    fn analyze_expr(&mut self, expr: &mut Expr) -> Result<Type> {
        let span = expr.span;
        let inferred = match &mut expr.kind {
            // Integer literals fit wherever a `number` or an `lnumber` is expected.
            ExprKind::IntLiteral(_) => Type::LNumber,
            ExprKind::FloatLiteral(_) => Type::Riel,
            ExprKind::StrLiteral(_) => Type::Text,
            ExprKind::BoolLiteral(_) => Type::Logic,

            ExprKind::Var(name) => self.symbols.get_type(name).ok_or_else(|| {
                Self::semantic_error(
                    span,
                    format!("variable '{}' used before declaration", name),
                )
            })?,

            ExprKind::BinOp { op, left, right } => {
                let left_ty = self.analyze_expr(left)?;
                let right_ty = self.analyze_expr(right)?;

                let result = binop_result_type(*op, left_ty, right_ty);
                if result == Type::Unknown {
                    return Err(Self::semantic_error(
                        span,
                        binop_type_error_message(*op, left_ty, right_ty),
                    ));
                }
                result
            }
        };

        expr.ty = inferred;
        Ok(inferred)
    }
}
