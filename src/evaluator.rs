// ABOUTME: Tree-walking evaluator: eval(node, env) -> Object, with return/error propagation

use crate::ast::{Expression, Program, Statement};
use crate::builtins;
use crate::environment::Environment;
use crate::error::EvalError;
use crate::object::{native_bool, Builtin, Function, Object, FALSE, NULL, TRUE};
use std::rc::Rc;

/// Evaluates a whole program. Unwraps a top-level `ReturnValue` and stops
/// at the first `Error`. Both are "unwrap at the boundary" points per the
/// return protocol (see `object` module docs).
pub fn eval_program(program: &Program, env: &Rc<Environment>) -> Object {
    let mut result = NULL;
    for stmt in &program.statements {
        result = eval_statement(stmt, env);
        match result {
            Object::ReturnValue(inner) => return *inner,
            Object::Error(_) => return result,
            _ => {}
        }
    }
    result
}

/// Evaluates a block's statements without unwrapping `ReturnValue`/`Error`
/// Unwrapping here would make `return` inside a nested `if` stop at the
/// innermost block rather than exiting the whole function.
fn eval_block_statement(statements: &[Statement], env: &Rc<Environment>) -> Object {
    let mut result = NULL;
    for stmt in statements {
        result = eval_statement(stmt, env);
        if matches!(result, Object::ReturnValue(_) | Object::Error(_)) {
            return result;
        }
    }
    result
}

fn eval_statement(stmt: &Statement, env: &Rc<Environment>) -> Object {
    match stmt {
        Statement::Let { name, value } => {
            let val = eval_expression(value, env);
            if is_error(&val) {
                return val;
            }
            env.set(name.clone(), val);
            NULL
        }
        Statement::Return { value } => {
            let val = eval_expression(value, env);
            if is_error(&val) {
                return val;
            }
            Object::ReturnValue(Box::new(val))
        }
        Statement::Expression { expr } => eval_expression(expr, env),
        Statement::Block { statements } => eval_block_statement(statements, env),
    }
}

fn eval_expression(expr: &Expression, env: &Rc<Environment>) -> Object {
    match expr {
        Expression::IntegerLiteral(value) => Object::Integer(*value),
        Expression::BooleanLiteral(value) => native_bool(*value),
        Expression::StringLiteral(value) => Object::String(value.clone()),
        Expression::ArrayLiteral(elements) => {
            let values = match eval_expressions(elements, env) {
                Ok(values) => values,
                Err(err) => return err,
            };
            Object::Array(values)
        }
        Expression::Identifier(name) => eval_identifier(name, env),
        Expression::Prefix { operator, right } => {
            let right_val = eval_expression(right, env);
            if is_error(&right_val) {
                return right_val;
            }
            eval_prefix_expression(operator, right_val)
        }
        Expression::Infix {
            left,
            operator,
            right,
        } => {
            let left_val = eval_expression(left, env);
            if is_error(&left_val) {
                return left_val;
            }
            let right_val = eval_expression(right, env);
            if is_error(&right_val) {
                return right_val;
            }
            eval_infix_expression(operator, left_val, right_val)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
        } => eval_if_expression(condition, consequence, alternative.as_deref(), env),
        Expression::Function { parameters, body } => Object::Function(Function {
            parameters: parameters.clone(),
            body: Rc::new(body_block(body)),
            env: env.clone(),
        }),
        Expression::Call {
            function,
            arguments,
        } => {
            let func = eval_expression(function, env);
            if is_error(&func) {
                return func;
            }
            let args = match eval_expressions(arguments, env) {
                Ok(args) => args,
                Err(err) => return err,
            };
            apply_function(func, args)
        }
        Expression::Index { left, index } => {
            let left_val = eval_expression(left, env);
            if is_error(&left_val) {
                return left_val;
            }
            let index_val = eval_expression(index, env);
            if is_error(&index_val) {
                return index_val;
            }
            eval_index_expression(left_val, index_val)
        }
    }
}

/// Function bodies are always `Statement::Block` as produced by the parser;
/// this just unwraps that invariant into an owned value for storage.
fn body_block(stmt: &Statement) -> Statement {
    stmt.clone()
}

fn eval_expressions(exprs: &[Expression], env: &Rc<Environment>) -> Result<Vec<Object>, Object> {
    let mut result = Vec::with_capacity(exprs.len());
    for expr in exprs {
        let val = eval_expression(expr, env);
        if is_error(&val) {
            return Err(val);
        }
        result.push(val);
    }
    Ok(result)
}

fn eval_identifier(name: &str, env: &Rc<Environment>) -> Object {
    if let Some(val) = env.get(name) {
        return val;
    }
    if let Some(b) = Builtin::lookup(name) {
        return Object::Builtin(b);
    }
    error_obj(EvalError::IdentifierNotFound(name.to_string()))
}

fn eval_prefix_expression(operator: &str, right: Object) -> Object {
    match operator {
        "!" => native_bool(!right.is_truthy()),
        "-" => match right {
            Object::Integer(n) => Object::Integer(-n),
            other => error_obj(EvalError::UnknownPrefixOperator {
                op: "-".to_string(),
                right: other.type_name().to_string(),
            }),
        },
        _ => error_obj(EvalError::UnknownPrefixOperator {
            op: operator.to_string(),
            right: right.type_name().to_string(),
        }),
    }
}

fn eval_infix_expression(operator: &str, left: Object, right: Object) -> Object {
    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Object::String(l), Object::String(r)) => eval_string_infix(operator, l, r),
        (Object::Boolean(l), Object::Boolean(r)) => match operator {
            "==" => native_bool(l == r),
            "!=" => native_bool(l != r),
            _ => unknown_infix(&left, operator, &right),
        },
        (Object::Null, Object::Null) => match operator {
            "==" => TRUE,
            "!=" => FALSE,
            _ => unknown_infix(&left, operator, &right),
        },
        _ if left.type_name() != right.type_name() => error_obj(EvalError::TypeMismatch {
            left: left.type_name().to_string(),
            op: operator.to_string(),
            right: right.type_name().to_string(),
        }),
        _ => unknown_infix(&left, operator, &right),
    }
}

fn unknown_infix(left: &Object, operator: &str, right: &Object) -> Object {
    error_obj(EvalError::UnknownInfixOperator {
        left: left.type_name().to_string(),
        op: operator.to_string(),
        right: right.type_name().to_string(),
    })
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Object {
    match operator {
        "+" => Object::Integer(left + right),
        "-" => Object::Integer(left - right),
        "*" => Object::Integer(left * right),
        "/" => {
            if right == 0 {
                error_obj(EvalError::DivisionByZero)
            } else {
                Object::Integer(left / right)
            }
        }
        "<" => native_bool(left < right),
        ">" => native_bool(left > right),
        "==" => native_bool(left == right),
        "!=" => native_bool(left != right),
        _ => error_obj(EvalError::UnknownInfixOperator {
            left: "INTEGER".to_string(),
            op: operator.to_string(),
            right: "INTEGER".to_string(),
        }),
    }
}

fn eval_string_infix(operator: &str, left: &str, right: &str) -> Object {
    match operator {
        "+" => Object::String(format!("{}{}", left, right)),
        "==" => native_bool(left == right),
        "!=" => native_bool(left != right),
        _ => error_obj(EvalError::UnknownInfixOperator {
            left: "STRING".to_string(),
            op: operator.to_string(),
            right: "STRING".to_string(),
        }),
    }
}

fn eval_if_expression(
    condition: &Expression,
    consequence: &Statement,
    alternative: Option<&Statement>,
    env: &Rc<Environment>,
) -> Object {
    let cond = eval_expression(condition, env);
    if is_error(&cond) {
        return cond;
    }
    if cond.is_truthy() {
        eval_statement(consequence, env)
    } else if let Some(alt) = alternative {
        eval_statement(alt, env)
    } else {
        NULL
    }
}

fn eval_index_expression(left: Object, index: Object) -> Object {
    match (&left, &index) {
        (Object::Array(items), Object::Integer(i)) => {
            if *i < 0 || (*i as usize) >= items.len() {
                NULL
            } else {
                items[*i as usize].clone()
            }
        }
        _ => error_obj(EvalError::IndexNotSupported(left.type_name().to_string())),
    }
}

/// Applies a callable object to already-evaluated arguments. This is the
/// one place `return` unwraps: a function call's body may `return` out of
/// any depth of nested blocks, and `apply` is where that wrapper is
/// stripped back down to a plain value.
pub fn apply_function(func: Object, args: Vec<Object>) -> Object {
    match func {
        Object::Function(function) => {
            if args.len() != function.parameters.len() {
                return error_obj(EvalError::WrongArgumentCount {
                    got: args.len(),
                    want: function.parameters.len(),
                });
            }
            let call_env = Environment::new_enclosed(function.env.clone());
            for (param, arg) in function.parameters.iter().zip(args.into_iter()) {
                call_env.set(param.clone(), arg);
            }
            let result = eval_statement(&function.body, &call_env);
            match result {
                Object::ReturnValue(inner) => *inner,
                other => other,
            }
        }
        Object::Builtin(Builtin::Map) => call_map(&args),
        Object::Builtin(Builtin::Reduce) => call_reduce(&args),
        Object::Builtin(b) => match builtins::call(b, &args) {
            Ok(val) => val,
            Err(err) => error_obj(err),
        },
        other => error_obj(EvalError::NotAFunction(other.type_name().to_string())),
    }
}

/// `map` and `reduce` call back into `apply_function`, so they're handled
/// here rather than in `builtins`, which only sees plain argument slices.
fn call_map(args: &[Object]) -> Object {
    if args.len() != 2 {
        return error_obj(EvalError::WrongArgumentCount {
            got: args.len(),
            want: 2,
        });
    }
    let (Object::Array(items), func) = (&args[0], args[1].clone()) else {
        return error_obj(EvalError::Builtin(format!(
            "argument to `map` must be ARRAY, got {}",
            args[0].type_name()
        )));
    };
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        let mapped = apply_function(func.clone(), vec![item.clone()]);
        if is_error(&mapped) {
            return mapped;
        }
        result.push(mapped);
    }
    Object::Array(result)
}

fn call_reduce(args: &[Object]) -> Object {
    if args.len() != 3 {
        return error_obj(EvalError::WrongArgumentCount {
            got: args.len(),
            want: 3,
        });
    }
    let (Object::Array(items), initial, func) = (&args[0], args[1].clone(), args[2].clone())
    else {
        return error_obj(EvalError::Builtin(format!(
            "argument to `reduce` must be ARRAY, got {}",
            args[0].type_name()
        )));
    };
    let mut acc = initial;
    for item in items {
        acc = apply_function(func.clone(), vec![acc, item.clone()]);
        if is_error(&acc) {
            return acc;
        }
    }
    acc
}

pub fn error_obj(err: EvalError) -> Object {
    Object::Error(err.to_string())
}

fn is_error(obj: &Object) -> bool {
    matches!(obj, Object::Error(_))
}
