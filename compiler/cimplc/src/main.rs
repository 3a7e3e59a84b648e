//! Cimpl CLI

use std::process::ExitCode;

use cimpl_diagnostic::ColorMode;
use cimplc::commands::{check_file, run_file, EXIT_USAGE};

enum Command {
    Run,
    Check,
}

fn main() -> ExitCode {
    cimplc::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut color = ColorMode::Auto;
    let mut positional = Vec::new();
    for arg in &args {
        if let Some(value) = arg.strip_prefix("--color=") {
            let Some(mode) = ColorMode::parse(value) else {
                eprintln!("error: invalid color mode '{value}'");
                return usage();
            };
            color = mode;
        } else if arg == "-h" || arg == "--help" {
            print_usage();
            return ExitCode::SUCCESS;
        } else if arg.starts_with('-') {
            eprintln!("error: unknown option '{arg}'");
            return usage();
        } else {
            positional.push(arg.as_str());
        }
    }

    let (command, path) = match positional.as_slice() {
        ["run", path] => (Command::Run, *path),
        ["check", path] => (Command::Check, *path),
        [path] if *path != "run" && *path != "check" => (Command::Run, *path),
        _ => return usage(),
    };

    match command {
        Command::Run => run_file(path, color),
        Command::Check => check_file(path, color),
    }
}

fn usage() -> ExitCode {
    print_usage();
    ExitCode::from(EXIT_USAGE)
}

fn print_usage() {
    eprintln!("Usage: cimpl [run|check] <file> [--color=auto|always|never]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <file>     Check, compile and execute a program (default)");
    eprintln!("  check <file>   Report diagnostics without running");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  RUST_LOG         enable tracing output, e.g. RUST_LOG=cimpl_vm=trace");
    eprintln!("  CIMPL_LOG_TREE   draw tracing spans as a tree");
}
