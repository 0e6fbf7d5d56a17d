use humanscript::ast::Type;
use humanscript::codegen::{self, cpp_type, plan_includes, scan_usage};
use humanscript::errors::compile_error;
use humanscript::lexer::tokenize;
use humanscript::parser::parse;
use humanscript::{analyze_source, compile_source, ErrorCategory};

fn compile(source: &str) -> String {
    compile_source(source).expect("program should compile")
}

/// The lines of `main`'s body, without indentation.
fn body_lines(cpp: &str) -> Vec<String> {
    cpp.lines()
        .skip_while(|l| *l != "int main() {")
        .skip(1)
        .map(|l| l.trim().to_string())
        .collect()
}

#[test]
fn test_empty_program() {
    assert_eq!(
        compile(""),
        "// Generated by HumanScript Compiler\n\nint main() {\n    return 0;\n}\n"
    );
}

#[test]
fn test_if_else_with_synthesized_braces() {
    let expected = r#"// Generated by HumanScript Compiler

#include <string> // Auto-included for text type or string operations
#include <iostream> // Auto-included for 'says'
#include <iomanip> // For std::boolalpha with 'says'

int main() {
    std::cout << std::boolalpha; // Print booleans as true/false
    if ((1LL == 1LL)) {
        std::cout << ("yes") << std::endl;
    } else {
        std::cout << ("no") << std::endl;
    }
    return 0;
}
"#;
    assert_eq!(compile(r#"if (1 ?= 1) says "yes"; else says "no";"#), expected);
}

#[test]
fn test_block_branches_reuse_their_braces() {
    let cpp = compile("logic f := false;\nif (f) { number a := 1; says a; }");
    let body = body_lines(&cpp);
    assert!(body.contains(&"if (f) {".to_string()));
    assert!(body.contains(&"int a = 1LL;".to_string()));
    assert_eq!(body.iter().filter(|l| *l == "}").count(), 2);
    assert!(cpp.contains("        int a = 1LL;\n"));
}

#[test]
fn test_nested_if_indentation() {
    let cpp = compile("if (true) if (false) says 1; else says 2;");
    let expected_tail = "    if (true) {
        if (false) {
            std::cout << (1LL) << std::endl;
        } else {
            std::cout << (2LL) << std::endl;
        }
    }
    return 0;
}
";
    assert!(cpp.ends_with(expected_tail), "{}", cpp);
}

#[test]
fn test_text_concatenation_stringifies_the_number() {
    let cpp = compile(r#"text greeting := "Hi " + 42;"#);
    assert!(cpp.contains(r#"std::string greeting = ("Hi " + std::to_string(42LL));"#));

    let cpp = compile(r#"logic b := true; says b + " done";"#);
    assert!(cpp.contains(r#"std::cout << ((std::to_string(b) + " done")) << std::endl;"#));
}

#[test]
fn test_numeric_addition_is_not_stringified() {
    let cpp = compile("riel r := 1 + 2.5;");
    assert!(cpp.contains("double r = (1LL + 2.5);"));
    assert!(!cpp.contains("to_string"));
}

#[test]
fn test_declaration_types() {
    let cpp = compile("number a := 1; lnumber b := 2; logic c := true; riel d := 3.0; text e := \"\";");
    let body = body_lines(&cpp);
    for expected in [
        "int a = 1LL;",
        "long long b = 2LL;",
        "bool c = true;",
        "double d = 3.0;",
        "std::string e = \"\";",
    ] {
        assert!(body.contains(&expected.to_string()), "missing {}", expected);
    }
}

#[test]
fn test_string_literals_are_reescaped() {
    let cpp = compile(r#"text t := "q\"\\\n\tend";"#);
    assert!(cpp.contains(r#"std::string t = "q\"\\\n\tend";"#), "{}", cpp);
}

#[test]
fn test_equality_lowers_to_double_equals() {
    let cpp = compile("number n := 1; logic same := n ?= 1.0;");
    assert!(cpp.contains("bool same = (n == 1.0);"));
}

#[test]
fn test_adjacent_string_literals_are_wrapped() {
    let cpp = compile(r#"says "a" + "b";"#);
    assert!(cpp.contains(r#"std::cout << ((std::string("a") + "b")) << std::endl;"#));

    let cpp = compile(r#"says "a" ?= "b";"#);
    assert!(cpp.contains(r#"(std::string("a") == "b")"#));
}

#[test]
fn test_text_without_printing_includes_only_string() {
    let cpp = compile(r#"text t := "x";"#);
    assert!(cpp.contains("#include <string> // Auto-included for text type or string operations\n"));
    assert!(!cpp.contains("iostream"));
    assert!(!cpp.contains("boolalpha"));
}

#[test]
fn test_explicit_includes_are_not_repeated() {
    let cpp = compile("use <iostream>;\nuse <cmath>;\nsays 1;");
    assert!(cpp.starts_with(
        "// Generated by HumanScript Compiler\n\n#include <iostream>\n#include <cmath>\n\n"
    ));
    assert_eq!(cpp.matches("#include <iostream>").count(), 1);
    assert!(cpp.contains("#include <iomanip> // For std::boolalpha with 'says'\n"));
    assert!(cpp.contains("#include <string> // For std::to_string with 'says'\n"));
    assert!(cpp.contains("std::cout << std::boolalpha;"));
}

#[test]
fn test_explicit_iostream_without_says_still_sets_boolalpha() {
    let cpp = compile("use <iostream>;\nnumber n := 1;");
    assert!(cpp.contains("    std::cout << std::boolalpha; // Print booleans as true/false\n"));
    assert!(!cpp.contains("iomanip"));
}

#[test]
fn test_usage_scan_reaches_nested_branches() {
    let program = analyze_source("if (true) { if (false) says \"deep\"; }").unwrap();
    let usage = scan_usage(&program);
    assert!(usage.prints);
    assert!(usage.text);

    let plan = plan_includes(&program);
    let headers: Vec<_> = plan.auto.iter().map(|inc| inc.header).collect();
    assert_eq!(headers, ["string", "iostream", "iomanip"]);
    assert!(plan.iostream);
}

#[test]
fn test_unannotated_tree_is_a_codegen_error() {
    let program = parse(tokenize("says 1;").unwrap()).unwrap();
    let err = codegen::generate(&program).unwrap_err();
    let ce = compile_error(&err).unwrap();

    assert_eq!(ce.category, ErrorCategory::CodegenError);
    assert!(ce
        .message
        .starts_with("unsupported construct for code generation"));
}

#[test]
fn test_cpp_type_mapping() {
    assert_eq!(cpp_type(Type::Number).unwrap(), "int");
    assert_eq!(cpp_type(Type::LNumber).unwrap(), "long long");
    assert_eq!(cpp_type(Type::Text).unwrap(), "std::string");
    assert_eq!(cpp_type(Type::Logic).unwrap(), "bool");
    assert_eq!(cpp_type(Type::Riel).unwrap(), "double");
    assert!(cpp_type(Type::Void).is_err());
    assert!(cpp_type(Type::Unknown).is_err());
}

#[test]
fn test_front_end_errors_surface_through_compile_source() {
    let err = compile_source("number x := 1;\nsays x + true;").unwrap_err();
    let ce = compile_error(&err).unwrap();
    assert_eq!(ce.category, ErrorCategory::SemanticError);
    assert_eq!(ce.line, Some(2));
    assert_eq!(ce.source_line.as_deref(), Some("says x + true;"));
}
