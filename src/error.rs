// ABOUTME: Internal evaluation error types, rendered into Object::Error at the point they're raised

use thiserror::Error;

/// Errors the evaluator can raise. `Display` on each variant produces the
/// exact wording the language surfaces as `Object::Error` messages; the
/// evaluator never lets one of these escape as a Rust-level panic or
/// `Result::Err` past the point where it's wrapped into an object.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("type mismatch: {left} {op} {right}")]
    TypeMismatch {
        left: String,
        op: String,
        right: String,
    },

    #[error("unknown operator: {op}{right}")]
    UnknownPrefixOperator { op: String, right: String },

    #[error("unknown operator: {left} {op} {right}")]
    UnknownInfixOperator {
        left: String,
        op: String,
        right: String,
    },

    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),

    #[error("not a function: {0}")]
    NotAFunction(String),

    #[error("index operator not supported: {0}")]
    IndexNotSupported(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("wrong number of arguments. got={got}, want={want}")]
    WrongArgumentCount { got: usize, want: usize },

    #[error("{0}")]
    Builtin(String),
}
