//! Vigil CLI
//!
//! Parse, format, and evaluate alert expressions from the command line.

use std::io::BufRead;
use vigilc::commands::{cli_functions, format_expr, parse_expr, run_eval, EvalOptions};

fn main() {
    vigilc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: vigil parse <expr>");
                std::process::exit(1);
            }
            match parse_expr(&args[2]) {
                Ok(tree) => println!("{tree}"),
                Err(err) => {
                    eprintln!("error: {err}");
                    std::process::exit(1);
                }
            }
        }
        "fmt" => {
            if args.len() < 3 {
                eprintln!("Usage: vigil fmt <expr>...");
                std::process::exit(1);
            }
            let mut failed = false;
            for source in &args[2..] {
                match format_expr(source) {
                    Ok(text) => println!("{text}"),
                    Err(err) => {
                        eprintln!("error: {source}: {err}");
                        failed = true;
                    }
                }
            }
            if failed {
                std::process::exit(1);
            }
        }
        "eval" => {
            let mut options = EvalOptions::default();
            let mut sources = Vec::new();

            for arg in args.iter().skip(2) {
                if arg == "--json" {
                    options.json = true;
                } else if arg == "--timings" || arg == "-t" {
                    options.timings = true;
                } else if arg == "-" {
                    sources.extend(read_stdin_lines());
                } else if arg.starts_with("--") {
                    eprintln!("error: unknown option '{arg}'");
                    std::process::exit(1);
                } else {
                    sources.push(arg.clone());
                }
            }

            if sources.is_empty() {
                eprintln!("Usage: vigil eval [--json] [--timings] <expr>... | -");
                std::process::exit(1);
            }
            if !run_eval(&sources, &cli_functions(), options) {
                std::process::exit(1);
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("vigil {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

/// Non-blank lines from stdin, one expression each.
fn read_stdin_lines() -> Vec<String> {
    let stdin = std::io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        match line {
            Ok(line) if !line.trim().is_empty() => lines.push(line),
            Ok(_) => {}
            Err(err) => {
                eprintln!("error: reading stdin: {err}");
                std::process::exit(1);
            }
        }
    }
    lines
}

fn print_usage() {
    println!("Vigil alert-expression engine");
    println!();
    println!("Usage: vigil <command> [options]");
    println!();
    println!("Commands:");
    println!("  eval <expr>...       Evaluate expressions and print per-group results");
    println!("  parse <expr>         Parse and display the expression tree");
    println!("  fmt <expr>...        Print expressions in canonical form");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Eval options:");
    println!("  --json              Print one JSON object per expression");
    println!("  --timings, -t       Show timing steps");
    println!("  -                   Read expressions from stdin, one per line");
    println!();
    println!("Environment:");
    println!("  RUST_LOG            Log filter (e.g. vigil_eval=debug)");
    println!("  VIGIL_LOG_FORMAT    Set to 'tree' for an indented span tree");
    println!();
    println!("Examples:");
    println!("  vigil eval '1 + 2 * 3'");
    println!("  vigil eval --json '!(1 > 2)'");
    println!("  vigil fmt '((1+2))*-3'");
}
