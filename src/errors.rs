use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    LexError,
    ParseError,
    SemanticError,
    CodegenError,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::LexError => write!(f, "LexError"),
            ErrorCategory::ParseError => write!(f, "ParseError"),
            ErrorCategory::SemanticError => write!(f, "SemanticError"),
            ErrorCategory::CodegenError => write!(f, "CodegenError"),
        }
    }
}

/// A fatal compilation failure raised by one of the pipeline stages.
#[derive(Debug, Error)]
#[error("{category}: {message}")]
pub struct CompileError {
    pub category: ErrorCategory,
    pub message: String,
    pub line: Option<usize>,
    pub source_line: Option<String>,
}

impl CompileError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            line: None,
            source_line: None,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        // Line 0 marks nodes built without a source position.
        if line > 0 {
            self.line = Some(line);
        }
        self
    }

    /// Attach the text of the offending line, taken from the compiled source.
    pub fn with_source(mut self, source: &str) -> Self {
        self.attach_source(source);
        self
    }

    pub fn attach_source(&mut self, source: &str) {
        if let (Some(line), None) = (self.line, &self.source_line) {
            self.source_line = source.lines().nth(line - 1).map(String::from);
        }
    }
}

/// Find the `CompileError` carried by an `anyhow` error chain, if any.
pub fn compile_error(err: &anyhow::Error) -> Option<&CompileError> {
    err.chain().find_map(|e| e.downcast_ref::<CompileError>())
}

pub fn print_error(file: &Path, err: &anyhow::Error) {
    if let Some(ce) = compile_error(err) {
        print_compile_error(file, ce);
    } else {
        let message = err
            .chain()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(": ");
        eprintln!("error: {}", message);
        eprintln!("  --> {}", file.display());
    }
}

fn print_compile_error(file: &Path, ce: &CompileError) {
    let line_num = ce.line.map(|l| l.to_string()).unwrap_or_default();
    let pad = line_num.len();

    eprintln!("{}: {}", ce.category, ce.message);

    eprint!(" {:>pad$} --> ", "", pad = pad);
    match ce.line {
        Some(line) => eprintln!("{}:{}", file.display(), line),
        None => eprintln!("{}", file.display()),
    }

    if let Some(ref src) = ce.source_line {
        let trimmed = src.trim();
        if !trimmed.is_empty() {
            eprintln!(" {:>pad$} |", "", pad = pad);
            eprintln!(" {} |   {}", line_num, trimmed);
            eprintln!(" {:>pad$} |", "", pad = pad);
        }
    }
}
