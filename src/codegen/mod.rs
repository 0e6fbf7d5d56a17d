//! Renders an analyzed program as a single C++17 translation unit.
//!
//! The generator trusts the `ty` annotations left by the semantic analyzer
//! and never re-checks the program; it only fails when it meets a tree the
//! analyzer could not have produced.

mod expressions;
pub mod includes;
mod statements;

use anyhow::Result;

use crate::ast::{Program, Type};
use crate::errors::{CompileError, ErrorCategory};

pub use includes::{plan_includes, scan_usage, AutoInclude, IncludePlan, Usage};

pub const BANNER: &str = "// Generated by HumanScript Compiler";

const INDENT: &str = "    ";

/// Generate C++ source for an analyzed program.
pub fn generate(program: &Program) -> Result<String> {
    Codegen::new().generate(program)
}

/// Map a HumanScript type to the C++ type used to declare it.
pub fn cpp_type(ty: Type) -> Result<&'static str> {
    match ty {
        Type::Number => Ok("int"),
        Type::LNumber => Ok("long long"),
        Type::Text => Ok("std::string"),
        Type::Logic => Ok("bool"),
        Type::Riel => Ok("double"),
        Type::Void | Type::Unknown => Err(codegen_error(format!(
            "cannot declare a variable of type `{}`",
            ty
        ))),
    }
}

fn codegen_error(message: String) -> anyhow::Error {
    CompileError::new(
        ErrorCategory::CodegenError,
        format!("unsupported construct for code generation: {}", message),
    )
    .into()
}

pub struct Codegen {
    output: String,
    indent: usize,
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}

impl Codegen {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    pub fn generate(mut self, program: &Program) -> Result<String> {
        self.line(BANNER);
        self.blank();

        for decl in &program.uses {
            self.line(format!("#include <{}>", decl.header));
        }
        if !program.uses.is_empty() {
            self.blank();
        }

        let plan = plan_includes(program);
        for inc in &plan.auto {
            self.line(format!("#include <{}> // {}", inc.header, inc.reason));
        }
        if !plan.auto.is_empty() {
            self.blank();
        }

        self.line("int main() {");
        self.indent += 1;
        if plan.iostream {
            self.line("std::cout << std::boolalpha; // Print booleans as true/false");
        }

        for stmt in &program.statements {
            self.emit_stmt(stmt)?;
        }

        self.line("return 0;");
        self.indent -= 1;
        self.line("}");

        Ok(self.output)
    }

    fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.indent {
            self.output.push_str(INDENT);
        }
        self.output.push_str(text.as_ref());
        self.output.push('\n');
    }

    fn blank(&mut self) {
        self.output.push('\n');
    }
}
