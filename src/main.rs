use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use humanscript::compiler::{self, Compiler};
use humanscript::errors::print_error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hsc")]
#[command(about = "A HumanScript to C++ transpiler", long_about = None)]
struct Args {
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Where to write the generated C++ (default: <FILE stem>_hs_generated.cpp)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Where to put the executable built by --run (default: <FILE stem>_hs_executable)
    #[arg(long, value_name = "EXE")]
    exe: Option<PathBuf>,

    /// Compile the generated C++ with a native compiler and run it
    #[arg(long)]
    run: bool,

    /// What to produce
    #[arg(long, value_enum, default_value_t = Emit::Cpp)]
    emit: Emit,

    /// Native C++ compiler used by --run (default: clang++, then g++)
    #[arg(long, env = "HUMANSCRIPT_CXX", value_name = "CMD")]
    cxx: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Emit {
    /// Generated C++ source, written to --output
    Cpp,
    /// Token sequence as JSON on stdout
    Tokens,
    /// Analyzed syntax tree as JSON on stdout
    Ast,
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(&args) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            print_error(&args.input, &err);
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<i32> {
    let compiler = Compiler::new(args.input.clone())?;

    match args.emit {
        Emit::Tokens => {
            println!("{}", serde_json::to_string_pretty(&compiler.tokens()?)?);
            return Ok(0);
        }
        Emit::Ast => {
            println!("{}", serde_json::to_string_pretty(&compiler.program()?)?);
            return Ok(0);
        }
        Emit::Cpp => {}
    }

    let cpp_path = args
        .output
        .clone()
        .unwrap_or_else(|| compiler.default_cpp_path());
    compiler.write_cpp(&cpp_path)?;

    if !args.run {
        return Ok(0);
    }

    let cxx = match &args.cxx {
        Some(cxx) => cxx.clone(),
        None => compiler::find_cxx().context("no C++ compiler found (tried clang++ and g++)")?,
    };
    let exe_path = args
        .exe
        .clone()
        .unwrap_or_else(|| compiler.default_exe_path());

    compiler::build_executable(&cxx, &cpp_path, &exe_path)?;
    let output = compiler::run_executable(&exe_path)?;

    std::io::Write::write_all(&mut std::io::stdout(), &output.stdout)?;
    std::io::Write::write_all(&mut std::io::stderr(), &output.stderr)?;

    // Intermediate files the user did not name are temporary.
    let temporary = [
        (args.output.is_none(), &cpp_path),
        (args.exe.is_none(), &exe_path),
    ];
    for (_, path) in temporary.iter().filter(|(is_temp, _)| *is_temp) {
        if let Err(e) = std::fs::remove_file(path) {
            log::warn!("could not remove {}: {}", path.display(), e);
        }
    }

    Ok(output.status.code().unwrap_or(1))
}
