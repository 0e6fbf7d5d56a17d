pub mod ast;
pub mod codegen;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod parser;
pub mod semantic;
pub mod symbol_table;

pub use compiler::{analyze_source, compile_source};
pub use errors::{CompileError, ErrorCategory};
