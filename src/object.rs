// ABOUTME: Runtime value model: tagged objects with Inspect() rendering and stable type tags

use crate::ast::Statement;
use crate::environment::Environment;
use crate::error::EvalError;
use std::fmt;
use std::rc::Rc;

/// A builtin's native implementation. Kept as a plain function pointer per
/// function. The set is small and closed, so no trait object or registry
/// indirection is needed.
pub type BuiltinFn = fn(&[Object]) -> Result<Object, EvalError>;

/// Tags the closed set of builtin names. A plain function pointer can't
/// represent `map`/`reduce`, since they need to call back into the
/// evaluator's own `apply_function`, so every builtin is tagged here and
/// the evaluator dispatches on the tag, calling into `builtins::call` for
/// the ones that are pure functions of their arguments and handling
/// `map`/`reduce` itself where `apply_function` is in scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Len,
    Type,
    Puts,
    First,
    Last,
    Rest,
    Push,
    Map,
    Reduce,
}

impl Builtin {
    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Len => "len",
            Builtin::Type => "type",
            Builtin::Puts => "puts",
            Builtin::First => "first",
            Builtin::Last => "last",
            Builtin::Rest => "rest",
            Builtin::Push => "push",
            Builtin::Map => "map",
            Builtin::Reduce => "reduce",
        }
    }

    pub fn lookup(name: &str) -> Option<Builtin> {
        match name {
            "len" => Some(Builtin::Len),
            "type" => Some(Builtin::Type),
            "puts" => Some(Builtin::Puts),
            "first" => Some(Builtin::First),
            "last" => Some(Builtin::Last),
            "rest" => Some(Builtin::Rest),
            "push" => Some(Builtin::Push),
            "map" => Some(Builtin::Map),
            "reduce" => Some(Builtin::Reduce),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Function {
    pub parameters: Vec<String>,
    pub body: Rc<Statement>,
    pub env: Rc<Environment>,
}

/// A runtime value. `ReturnValue` and `Error` are internal bookkeeping
/// variants used only while evaluation unwinds. They never leak out to a
/// place the surface language can observe (see `evaluator` module).
#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Null,
    String(String),
    Array(Vec<Object>),
    Function(Function),
    Builtin(Builtin),
    ReturnValue(Box<Object>),
    Error(String),
    /// The result of the `type` builtin: a first-class handle on a type tag.
    Type(String),
}

pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);
pub const NULL: Object = Object::Null;

pub fn native_bool(b: bool) -> Object {
    if b {
        TRUE
    } else {
        FALSE
    }
}

impl Object {
    /// Stable textual type name, used in error messages and by `type`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::Null => "NULL",
            Object::String(_) => "STRING",
            Object::Array(_) => "ARRAY",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::ReturnValue(_) => "RETURN_VALUE",
            Object::Error(_) => "ERROR",
            Object::Type(_) => "TYPE",
        }
    }

    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }

    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(n) => write!(f, "{}", n),
            Object::Boolean(b) => write!(f, "{}", b),
            Object::Null => write!(f, "null"),
            Object::String(s) => write!(f, "{}", s),
            Object::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item.inspect())?;
                }
                write!(f, "]")
            }
            Object::Function(func) => {
                write!(f, "fn({}) {{ {} }}", func.parameters.join(", "), func.body)
            }
            Object::Builtin(b) => write!(f, "builtin function {}", b.name()),
            Object::ReturnValue(inner) => write!(f, "{}", inner.inspect()),
            Object::Error(msg) => write!(f, "ERROR: {}", msg),
            Object::Type(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_rules() {
        assert!(Object::Integer(0).is_truthy());
        assert!(!Object::Boolean(false).is_truthy());
        assert!(!Object::Null.is_truthy());
        assert!(Object::Boolean(true).is_truthy());
        assert!(Object::String(String::new()).is_truthy());
    }

    #[test]
    fn inspect_array_renders_elements() {
        let arr = Object::Array(vec![Object::Integer(1), Object::Integer(2)]);
        assert_eq!(arr.inspect(), "[1, 2]");
    }

    #[test]
    fn error_inspect_has_error_prefix() {
        let err = Object::Error("identifier not found: foobar".to_string());
        assert_eq!(err.inspect(), "ERROR: identifier not found: foobar");
    }

    #[test]
    fn null_inspect_is_lowercase() {
        assert_eq!(Object::Null.inspect(), "null");
    }

    #[test]
    fn type_tags_are_stable() {
        assert_eq!(Object::Integer(1).type_name(), "INTEGER");
        assert_eq!(Object::Boolean(true).type_name(), "BOOLEAN");
        assert_eq!(Object::Null.type_name(), "NULL");
        assert_eq!(Object::String("x".into()).type_name(), "STRING");
        assert_eq!(Object::Array(vec![]).type_name(), "ARRAY");
    }
}
