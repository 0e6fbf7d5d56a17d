use anyhow::Result;

use crate::ast::{format_float, BinOpKind, Expr, ExprKind, Type};
use crate::semantic::type_rules::{lookup_binop, Coercion};

use super::{codegen_error, Codegen};

impl Codegen {
    pub(super) fn render_expr(&self, expr: &Expr) -> Result<String> {
        if expr.ty == Type::Unknown {
            return Err(codegen_error(format!(
                "expression `{}` has no resolved type",
                expr
            )));
        }

        let code = match &expr.kind {
            ExprKind::IntLiteral(v) => format!("{}LL", v),
            ExprKind::FloatLiteral(v) => format_float(*v),
            ExprKind::StrLiteral(s) => cpp_string_literal(s),
            ExprKind::BoolLiteral(b) => if *b { "true" } else { "false" }.to_string(),
            ExprKind::Var(name) => name.clone(),
            ExprKind::BinOp { op, left, right } => self.render_binop(*op, left, right)?,
        };
        Ok(code)
    }

    fn render_binop(&self, op: BinOpKind, left: &Expr, right: &Expr) -> Result<String> {
        let rule = lookup_binop(op, left.ty, right.ty).ok_or_else(|| {
            codegen_error(format!(
                "no lowering for `{}` between `{}` and `{}`",
                op, left.ty, right.ty
            ))
        })?;

        let mut left_code = self.render_expr(left)?;
        let mut right_code = self.render_expr(right)?;

        if rule.left_coercion == Coercion::ToText {
            left_code = format!("std::to_string({})", left_code);
        }
        if rule.right_coercion == Coercion::ToText {
            right_code = format!("std::to_string({})", right_code);
        }

        // Two bare C++ string literals would be combined as pointers.
        if left.is_str_literal() && right.is_str_literal() {
            left_code = format!("std::string({})", left_code);
        }

        let cpp_op = match op {
            BinOpKind::Add => "+",
            BinOpKind::Eq => "==",
        };
        Ok(format!("({} {} {})", left_code, cpp_op, right_code))
    }
}

/// Quote and escape a string for a C++ source file.
fn cpp_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
