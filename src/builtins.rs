// ABOUTME: Pure builtin functions: len, type, puts, first, last, rest, push
//
// `map` and `reduce` also belong to the builtin set but need to call back
// into the evaluator's own `apply_function`, so they live in `evaluator`
// alongside it. This module only handles the ones that are plain functions
// of their already-evaluated arguments.

use crate::error::EvalError;
use crate::object::{Builtin, Object};

/// Resolves `call(b, args)` for every builtin except `map`/`reduce`, which
/// `evaluator::apply_function` intercepts before reaching here.
pub fn call(b: Builtin, args: &[Object]) -> Result<Object, EvalError> {
    match b {
        Builtin::Len => builtin_len(args),
        Builtin::Type => builtin_type(args),
        Builtin::Puts => builtin_puts(args),
        Builtin::First => builtin_first(args),
        Builtin::Last => builtin_last(args),
        Builtin::Rest => builtin_rest(args),
        Builtin::Push => builtin_push(args),
        Builtin::Map | Builtin::Reduce => {
            unreachable!("{} is dispatched by the evaluator directly", b.name())
        }
    }
}

fn arity_error(got: usize, want: usize) -> EvalError {
    EvalError::WrongArgumentCount { got, want }
}

fn builtin_len(args: &[Object]) -> Result<Object, EvalError> {
    if args.len() != 1 {
        return Err(arity_error(args.len(), 1));
    }
    match &args[0] {
        Object::String(s) => Ok(Object::Integer(s.len() as i64)),
        Object::Array(items) => Ok(Object::Integer(items.len() as i64)),
        other => Err(EvalError::Builtin(format!(
            "argument to `len` not supported, got {}",
            other.type_name()
        ))),
    }
}

fn builtin_type(args: &[Object]) -> Result<Object, EvalError> {
    if args.len() != 1 {
        return Err(arity_error(args.len(), 1));
    }
    Ok(Object::Type(args[0].type_name().to_string()))
}

fn builtin_puts(args: &[Object]) -> Result<Object, EvalError> {
    for arg in args {
        println!("{}", arg.inspect());
    }
    Ok(Object::Null)
}

fn builtin_first(args: &[Object]) -> Result<Object, EvalError> {
    if args.len() != 1 {
        return Err(arity_error(args.len(), 1));
    }
    match &args[0] {
        Object::Array(items) => Ok(items.first().cloned().unwrap_or(Object::Null)),
        other => Err(EvalError::Builtin(format!(
            "argument to `first` must be ARRAY, got {}",
            other.type_name()
        ))),
    }
}

fn builtin_last(args: &[Object]) -> Result<Object, EvalError> {
    if args.len() != 1 {
        return Err(arity_error(args.len(), 1));
    }
    match &args[0] {
        Object::Array(items) => Ok(items.last().cloned().unwrap_or(Object::Null)),
        other => Err(EvalError::Builtin(format!(
            "argument to `last` must be ARRAY, got {}",
            other.type_name()
        ))),
    }
}

/// `rest` on an empty array returns a new empty array rather than an error
/// or null. The array is never shorter than "nothing left to drop".
fn builtin_rest(args: &[Object]) -> Result<Object, EvalError> {
    if args.len() != 1 {
        return Err(arity_error(args.len(), 1));
    }
    match &args[0] {
        Object::Array(items) if items.is_empty() => Ok(Object::Array(Vec::new())),
        Object::Array(items) => Ok(Object::Array(items[1..].to_vec())),
        other => Err(EvalError::Builtin(format!(
            "argument to `rest` must be ARRAY, got {}",
            other.type_name()
        ))),
    }
}

fn builtin_push(args: &[Object]) -> Result<Object, EvalError> {
    if args.len() != 2 {
        return Err(arity_error(args.len(), 2));
    }
    match &args[0] {
        Object::Array(items) => {
            let mut new_items = items.clone();
            new_items.push(args[1].clone());
            Ok(Object::Array(new_items))
        }
        other => Err(EvalError::Builtin(format!(
            "argument to `push` must be ARRAY, got {}",
            other.type_name()
        ))),
    }
}
