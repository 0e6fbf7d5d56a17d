use crate::ast::{BinOpKind, Type};

/// Describes what conversion to apply to an operand before the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// No coercion needed; use the operand as-is.
    None,
    /// Stringify the operand so it can be concatenated to text.
    ToText,
}

/// Result of looking up a valid (BinOpKind, left_type, right_type) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinOpRule {
    pub left_coercion: Coercion,
    pub right_coercion: Coercion,
    pub result_type: Type,
}

impl BinOpRule {
    fn same(ty: Type) -> Self {
        Self {
            left_coercion: Coercion::None,
            right_coercion: Coercion::None,
            result_type: ty,
        }
    }

    fn stringify_left() -> Self {
        Self {
            left_coercion: Coercion::ToText,
            right_coercion: Coercion::None,
            result_type: Type::Text,
        }
    }

    fn stringify_right() -> Self {
        Self {
            left_coercion: Coercion::None,
            right_coercion: Coercion::ToText,
            result_type: Type::Text,
        }
    }
}

/// The more general of two numeric types (`riel` > `lnumber` > `number`).
pub fn widen(left: Type, right: Type) -> Type {
    if left.numeric_rank() >= right.numeric_rank() {
        left
    } else {
        right
    }
}

/// Look up the type rule for a binary operation.
/// Returns `None` if the (op, left, right) combination is invalid.
pub fn lookup_binop(op: BinOpKind, left: Type, right: Type) -> Option<BinOpRule> {
    use BinOpKind::*;
    use Type::*;

    match (op, left, right) {
        // ── `+`: numeric widening ────────────────────────────────────
        (Add, l, r) if l.is_numeric() && r.is_numeric() => Some(BinOpRule::same(widen(l, r))),

        // ── `+`: text concatenation, stringifying the non-text side ──
        (Add, Text, Text) => Some(BinOpRule::same(Text)),
        (Add, Text, r) if r.is_value() => Some(BinOpRule::stringify_right()),
        (Add, l, Text) if l.is_value() => Some(BinOpRule::stringify_left()),

        // ── `?=`: same type, or any numeric mix ──────────────────────
        (Eq, l, r) if l == r && l.is_value() => Some(BinOpRule::same(Logic)),
        (Eq, l, r) if l.is_numeric() && r.is_numeric() => Some(BinOpRule::same(Logic)),

        // ── Everything else: invalid ─────────────────────────────────
        _ => None,
    }
}

/// Result type of a binary operation, `Unknown` when the operands don't fit.
pub fn binop_result_type(op: BinOpKind, left: Type, right: Type) -> Type {
    lookup_binop(op, left, right)
        .map(|rule| rule.result_type)
        .unwrap_or(Type::Unknown)
}

/// Whether a value of type `value` may initialize a variable of type `target`.
pub fn is_assignable(target: Type, value: Type) -> bool {
    use Type::*;

    match (target, value) {
        (t, v) if t == v => true,
        (Number, LNumber) => true,
        (Riel, Number | LNumber) => true,
        _ => false,
    }
}

/// Generate a descriptive error message for an invalid BinOp type combination.
pub fn binop_type_error_message(op: BinOpKind, left: Type, right: Type) -> String {
    match op {
        BinOpKind::Add => format!(
            "invalid operands for binary operator `{}`: `{}` and `{}` (expected numbers or text)",
            op, left, right
        ),
        BinOpKind::Eq => format!(
            "invalid operands for binary operator `{}`: `{}` and `{}` (expected matching types)",
            op, left, right
        ),
    }
}
