// ABOUTME: Interactive REPL and one-shot embedding entry point
//
// Wraps lex→parse→eval into two surfaces: a persistent-environment
// interactive loop, and a stateless one-shot function suitable for
// calling from a host process.

use crate::environment::Environment;
use crate::evaluator::eval_program;
use crate::parser::parse;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::rc::Rc;

const PROMPT: &str = ">> ";
const PARSE_ERROR_BANNER: &str = "Woops! We ran into some monkey business here!\nparser errors:";

/// Runs `source` against a fresh environment and returns the rendered
/// output exactly as the interactive loop would have printed it for a
/// single line of input. Suitable for embedding in a host process.
pub fn run_source(source: &str) -> String {
    let env = Environment::new();
    render(source, &env)
}

fn render(line: &str, env: &Rc<Environment>) -> String {
    let (program, errors) = parse(line);
    if !errors.is_empty() {
        return render_parse_errors(&errors);
    }
    let result = eval_program(&program, env);
    if matches!(result, crate::object::Object::Null) {
        return String::new();
    }
    result.inspect()
}

fn render_parse_errors(errors: &[String]) -> String {
    let mut out = String::from(PARSE_ERROR_BANNER);
    out.push('\n');
    for err in errors {
        out.push('\t');
        out.push_str(err);
        out.push('\n');
    }
    out
}

/// Runs the interactive loop against stdin/stdout: prints `">> "`, reads a
/// line, evaluates it against an environment that persists across the
/// whole session, and prints the result. Returns once stdin closes.
pub fn run_repl() -> rustyline::Result<()> {
    let mut editor = DefaultEditor::new()?;
    let env = Environment::new();

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                editor.add_history_entry(line.as_str())?;
                let output = render(&line, &env);
                if !output.is_empty() {
                    println!("{}", output);
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        }
    }
    Ok(())
}
