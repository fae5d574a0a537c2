mod ast;
mod builtins;
mod driver;
mod environment;
mod error;
mod evaluator;
mod lexer;
mod object;
mod parser;
mod token;

use clap::Parser;
use environment::Environment;
use evaluator::eval_program;
use parser::parse;
use std::path::PathBuf;
use std::process::ExitCode;

/// A tree-walking interpreter for a small expression-oriented scripting language
#[derive(Parser, Debug)]
#[command(name = "monkey-interpreter")]
#[command(version)]
#[command(about = "Run a script, or start the interactive REPL with no arguments")]
struct CliArgs {
    /// Script file to execute (optional, if not provided starts the REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    match args.script {
        Some(path) => run_script(&path),
        None => {
            if let Err(err) = driver::run_repl() {
                eprintln!("{}", err);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
    }
}

fn run_script(path: &PathBuf) -> ExitCode {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("could not read {}: {}", path.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let (program, errors) = parse(&source);
    if !errors.is_empty() {
        eprintln!("Woops! We ran into some monkey business here!\nparser errors:");
        for err in &errors {
            eprintln!("\t{}", err);
        }
        return ExitCode::FAILURE;
    }

    let env = Environment::new();
    let result = eval_program(&program, &env);
    if let object::Object::Error(_) = &result {
        eprintln!("{}", result.inspect());
        return ExitCode::FAILURE;
    }
    if !matches!(result, object::Object::Null) {
        println!("{}", result.inspect());
    }
    ExitCode::SUCCESS
}
