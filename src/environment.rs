// ABOUTME: Lexically scoped environment, a chained name-to-object mapping

use crate::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A scope frame. Holds a strong reference to its outer scope so that a
/// `Function` object capturing an inner environment keeps every enclosing
/// frame alive for as long as the function value itself is reachable.
/// this is what makes closures able to outlive the call that created them.
#[derive(Debug)]
pub struct Environment {
    store: RefCell<HashMap<String, Object>>,
    outer: Option<Rc<Environment>>,
}

impl Environment {
    /// An empty root environment, with no outer scope.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            store: RefCell::new(HashMap::new()),
            outer: None,
        })
    }

    /// A fresh inner scope enclosed by `outer`. Used both for function calls
    /// (enclosing the function's captured environment, not the caller's)
    /// and anywhere else a nested lexical scope is needed.
    pub fn new_enclosed(outer: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            store: RefCell::new(HashMap::new()),
            outer: Some(outer),
        })
    }

    /// Looks up `name` in this scope, then walks outward through enclosing
    /// scopes. Returns `None` if no scope in the chain binds it.
    pub fn get(&self, name: &str) -> Option<Object> {
        if let Some(value) = self.store.borrow().get(name) {
            return Some(value.clone());
        }
        match &self.outer {
            Some(outer) => outer.get(name),
            None => None,
        }
    }

    /// Binds `name` to `value` in this scope only. Assignment never
    /// reaches into an enclosing scope.
    pub fn set(&self, name: String, value: Object) -> Object {
        self.store.borrow_mut().insert(name, value.clone());
        value
    }
}
