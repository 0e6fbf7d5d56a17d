use crate::ast::Program;
use crate::codegen;
use crate::errors::{CompileError, ErrorCategory};
use crate::lexer::{self, Token, TokenKind};
use crate::parser;
use crate::semantic::SemanticAnalyzer;

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Native compilers tried, in order, when none is configured.
const CXX_CANDIDATES: &[&str] = &["clang++", "g++"];

// ── in-memory pipeline ─────────────────────────────────────────────────

/// Tokenize `source`, rejecting input that stopped at an unknown character.
pub fn lex(source: &str) -> Result<Vec<Token>> {
    let tokens = lexer::tokenize(source)?;
    if let Some(last) = tokens.last().filter(|t| t.kind == TokenKind::Unknown) {
        return Err(CompileError::new(
            ErrorCategory::LexError,
            format!("unexpected character '{}'", last.text),
        )
        .at_line(last.line)
        .with_source(source)
        .into());
    }
    Ok(tokens)
}

/// Run the front end: tokens, tree, annotated tree.
pub fn analyze_source(source: &str) -> Result<Program> {
    let result = lex(source)
        .and_then(parser::parse)
        .and_then(|program| SemanticAnalyzer::new().annotate(program));
    result.map_err(|e| with_source_line(e, source))
}

/// Translate HumanScript source text into C++ source text.
pub fn compile_source(source: &str) -> Result<String> {
    let program = analyze_source(source)?;
    codegen::generate(&program).map_err(|e| with_source_line(e, source))
}

fn with_source_line(mut err: anyhow::Error, source: &str) -> anyhow::Error {
    if let Some(ce) = err.downcast_mut::<CompileError>() {
        ce.attach_source(source);
    }
    err
}

// ── driver: files and the native toolchain ─────────────────────────────

pub struct Compiler {
    input: PathBuf,
    source: String,
}

impl Compiler {
    pub fn new(input: PathBuf) -> Result<Self> {
        let source = std::fs::read_to_string(&input)
            .with_context(|| format!("failed to read {}", input.display()))?;
        if source.is_empty() {
            log::warn!("input file {} is empty", input.display());
        }
        Ok(Self { input, source })
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> Result<Vec<Token>> {
        lex(&self.source)
    }

    pub fn program(&self) -> Result<Program> {
        analyze_source(&self.source)
    }

    pub fn generate(&self) -> Result<String> {
        log::info!("Compiling HumanScript file: {}", self.input.display());
        compile_source(&self.source)
    }

    /// `<stem>_hs_generated.cpp`, next to the input.
    pub fn default_cpp_path(&self) -> PathBuf {
        self.sibling_path(&format!("{}_hs_generated.cpp", self.stem()))
    }

    /// `<stem>_hs_executable`, next to the input.
    pub fn default_exe_path(&self) -> PathBuf {
        self.sibling_path(&format!(
            "{}_hs_executable{}",
            self.stem(),
            std::env::consts::EXE_SUFFIX
        ))
    }

    fn stem(&self) -> String {
        self.input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "out".to_string())
    }

    fn sibling_path(&self, file_name: &str) -> PathBuf {
        match self.input.parent() {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    /// Generate C++ and write it to `output`.
    pub fn write_cpp(&self, output: &Path) -> Result<()> {
        let code = self.generate()?;
        std::fs::write(output, code)
            .with_context(|| format!("failed to write {}", output.display()))?;
        log::info!("Generated C++ code written to: {}", output.display());
        Ok(())
    }
}

/// The first native C++ compiler on `PATH` that answers `--version`.
pub fn find_cxx() -> Option<String> {
    CXX_CANDIDATES
        .iter()
        .find(|cxx| {
            Command::new(cxx)
                .arg("--version")
                .output()
                .is_ok_and(|out| out.status.success())
        })
        .map(|cxx| cxx.to_string())
}

pub fn build_executable(cxx: &str, cpp_path: &Path, exe_path: &Path) -> Result<()> {
    log::info!(
        "Executing: {} -std=c++17 -O2 {} -o {}",
        cxx,
        cpp_path.display(),
        exe_path.display()
    );
    let output = Command::new(cxx)
        .arg("-std=c++17")
        .arg("-O2")
        .arg(cpp_path)
        .arg("-o")
        .arg(exe_path)
        .output()
        .with_context(|| format!("failed to run {}", cxx))?;

    if !output.status.success() {
        bail!(
            "C++ compilation failed ({}):\n{}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(())
}

pub fn run_executable(exe_path: &Path) -> Result<Output> {
    // A bare file name would otherwise be looked up on PATH.
    let exe_path = if exe_path.is_relative() && exe_path.parent() == Some(Path::new("")) {
        Path::new(".").join(exe_path)
    } else {
        exe_path.to_path_buf()
    };
    Command::new(&exe_path)
        .output()
        .with_context(|| format!("failed to run {}", exe_path.display()))
}
