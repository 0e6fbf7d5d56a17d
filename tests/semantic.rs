use humanscript::analyze_source;
use humanscript::ast::{BinOpKind, Expr, ExprKind, Program, Stmt, StmtKind, Type};
use humanscript::errors::compile_error;
use humanscript::lexer::tokenize;
use humanscript::parser::parse;
use humanscript::semantic::type_rules::{binop_result_type, is_assignable, lookup_binop, Coercion};
use humanscript::semantic::SemanticAnalyzer;
use humanscript::ErrorCategory;

fn analyze(source: &str) -> Program {
    analyze_source(source).expect("program should type-check")
}

fn semantic_error(source: &str) -> (String, Option<usize>) {
    let err = analyze_source(source).unwrap_err();
    let ce = compile_error(&err).expect("expected a CompileError");
    assert_eq!(ce.category, ErrorCategory::SemanticError, "{}", ce.message);
    (ce.message.clone(), ce.line)
}

fn says_type(source: &str) -> Type {
    let program = analyze(source);
    match &program.statements.last().unwrap().kind {
        StmtKind::Says(expr) => expr.ty,
        other => panic!("expected a says statement, got {:?}", other),
    }
}

/// Collect every expression type tag in document order.
fn type_tags(program: &Program) -> Vec<Type> {
    fn walk_expr(expr: &Expr, out: &mut Vec<Type>) {
        out.push(expr.ty);
        if let ExprKind::BinOp { left, right, .. } = &expr.kind {
            walk_expr(left, out);
            walk_expr(right, out);
        }
    }
    fn walk_stmt(stmt: &Stmt, out: &mut Vec<Type>) {
        match &stmt.kind {
            StmtKind::VarDecl { value, .. } => walk_expr(value, out),
            StmtKind::Says(expr) => walk_expr(expr, out),
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                walk_expr(condition, out);
                walk_stmt(then_branch, out);
                if let Some(else_branch) = else_branch {
                    walk_stmt(else_branch, out);
                }
            }
            StmtKind::Block(stmts) => stmts.iter().for_each(|s| walk_stmt(s, out)),
        }
    }

    let mut out = Vec::new();
    program.statements.iter().for_each(|s| walk_stmt(s, &mut out));
    out
}

#[test]
fn test_literal_types() {
    assert_eq!(says_type("says 1;"), Type::LNumber);
    assert_eq!(says_type("says 1.5;"), Type::Riel);
    assert_eq!(says_type("says \"s\";"), Type::Text);
    assert_eq!(says_type("says false;"), Type::Logic);
}

#[test]
fn test_assignability_is_not_symmetric() {
    analyze("riel x := 1;");

    let (message, _) = semantic_error("lnumber x := 1.5;");
    assert!(message.contains("type mismatch"), "{}", message);
    assert!(message.contains("`riel`"), "{}", message);
    assert!(message.contains("`lnumber`"), "{}", message);
}

#[test]
fn test_assignability_table() {
    use Type::*;

    let values = [Number, LNumber, Text, Logic, Riel];
    for target in values {
        for value in values {
            let expected = target == value
                || (target == Number && value == LNumber)
                || (target == Riel && matches!(value, Number | LNumber));
            assert_eq!(
                is_assignable(target, value),
                expected,
                "{} := {}",
                target,
                value
            );
        }
    }
    assert!(!is_assignable(LNumber, Number));
    assert!(!is_assignable(Text, Void));
}

#[test]
fn test_redeclaration_fails_regardless_of_type() {
    let (message, line) = semantic_error("number x := 1;\ntext x := \"again\";");
    assert!(message.contains("'x' already declared"), "{}", message);
    assert_eq!(line, Some(2));

    semantic_error("number x := 1; number x := 1;");
}

#[test]
fn test_use_before_declaration() {
    let (message, _) = semantic_error("says y;\nnumber y := 1;");
    assert!(message.contains("'y' used before declaration"), "{}", message);

    // The initializer is checked before the name is inserted.
    semantic_error("number z := z + 1;");
}

#[test]
fn test_comparison_of_integer_literals_is_logic() {
    assert_eq!(says_type("says (1 ?= 2);"), Type::Logic);
}

#[test]
fn test_mixed_text_concatenation() {
    let program = analyze("text greeting := \"Hi \" + 42;");
    let StmtKind::VarDecl { value, .. } = &program.statements[0].kind else {
        panic!("expected a declaration");
    };
    assert_eq!(value.ty, Type::Text);

    assert_eq!(says_type("says true + \"!\";"), Type::Text);
    assert_eq!(says_type("says \"pi \" + 3.14;"), Type::Text);
}

#[test]
fn test_logic_comparison_is_not_a_number() {
    let (message, _) = semantic_error("number a := true ?= false;");
    assert!(message.contains("cannot assign `logic` to `number`"), "{}", message);
}

#[test]
fn test_numeric_addition_widens() {
    let source = "number n := 1; riel r := 0.5;\nsays n + n;";
    assert_eq!(says_type(source), Type::Number);
    assert_eq!(says_type("number n := 1; says n + 2;"), Type::LNumber);
    assert_eq!(says_type("number n := 1; riel r := 0.5; says n + r;"), Type::Riel);
}

#[test]
fn test_invalid_operands() {
    let (message, _) = semantic_error("says true + 1;");
    assert!(
        message.contains("invalid operands for binary operator `+`"),
        "{}",
        message
    );
    assert!(message.contains("`logic` and `lnumber`"), "{}", message);

    let (message, _) = semantic_error("says \"1\" ?= 1;");
    assert!(message.contains("`?=`"), "{}", message);
    assert!(message.contains("`text` and `lnumber`"), "{}", message);
}

#[test]
fn test_if_condition_must_be_logic() {
    let (message, line) = semantic_error("says 0;\nif (1) says 2;");
    assert!(message.contains("must be `logic`"), "{}", message);
    assert!(message.contains("`lnumber`"), "{}", message);
    assert_eq!(line, Some(2));

    analyze("logic flag := true; if (flag) says 1;");
}

#[test]
fn test_declared_type_is_recorded() {
    let mut analyzer = SemanticAnalyzer::new();
    analyzer
        .annotate(parse(tokenize("number n := 5; riel r := n;").unwrap()).unwrap())
        .unwrap();

    assert_eq!(analyzer.symbols().get_type("n"), Some(Type::Number));
    assert_eq!(analyzer.symbols().get_type("r"), Some(Type::Riel));
    assert!(analyzer.symbols().get("r").unwrap().initialized);

    // `n` is a `number` now, not the literal's `lnumber`.
    let (message, _) = semantic_error("number n := 5; lnumber big := n;");
    assert!(message.contains("cannot assign `number` to `lnumber`"), "{}", message);
}

#[test]
fn test_blocks_share_one_flat_scope() {
    analyze("if (true) { number inner := 1; }\nsays inner;");
    analyze("if (true) number a := 1; else says a;");

    let (message, _) =
        semantic_error("if (true) { number x := 1; } else { number x := 2; }");
    assert!(message.contains("already declared"), "{}", message);
}

#[test]
fn test_analysis_is_idempotent() {
    let source = r#"
        number n := 3;
        text t := "n is " + n;
        if (n + 1 ?= 4.0) { says t + true; } else says n ?= 3;
    "#;
    let program = parse(tokenize(source).unwrap()).unwrap();

    let mut analyzer = SemanticAnalyzer::new();
    let first = analyzer.annotate(program.clone()).unwrap();
    // Re-running on an already annotated tree with the same analyzer resets its table.
    let second = analyzer.annotate(first.clone()).unwrap();
    let fresh = SemanticAnalyzer::new().annotate(program).unwrap();

    assert_eq!(type_tags(&first), type_tags(&second));
    assert_eq!(first, fresh);
    assert!(type_tags(&first).iter().all(|ty| *ty != Type::Unknown));
}

#[test]
fn test_binop_rules() {
    use BinOpKind::*;
    use Type::*;

    let rule = lookup_binop(Add, Text, Number).unwrap();
    assert_eq!(rule.left_coercion, Coercion::None);
    assert_eq!(rule.right_coercion, Coercion::ToText);

    let rule = lookup_binop(Add, Riel, Text).unwrap();
    assert_eq!(rule.left_coercion, Coercion::ToText);
    assert_eq!(rule.right_coercion, Coercion::None);

    let rule = lookup_binop(Add, Number, LNumber).unwrap();
    assert_eq!(rule.right_coercion, Coercion::None);
    assert_eq!(rule.result_type, LNumber);

    assert_eq!(binop_result_type(Eq, Riel, Number), Logic);
    assert_eq!(binop_result_type(Eq, Text, Text), Logic);
    assert_eq!(binop_result_type(Eq, Logic, Number), Unknown);
    assert_eq!(binop_result_type(Add, Logic, Logic), Unknown);
    assert_eq!(binop_result_type(Add, Text, Void), Unknown);
    assert_eq!(binop_result_type(Eq, Unknown, Unknown), Unknown);
}
