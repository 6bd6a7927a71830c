//! Lexically scoped variable bindings.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::object::Object;

/// Shared handle to an [`Environment`]. Closures and child scopes hold one
/// of these to keep their defining scope alive.
pub type Env = Rc<RefCell<Environment>>;

/// A single scope: name → value bindings plus an optional enclosing scope.
#[derive(Debug, Default)]
pub struct Environment {
    store: BTreeMap<String, Rc<Object>>,
    outer: Option<Env>,
}

impl Environment {
    /// A fresh global scope.
    pub fn new() -> Env {
        Rc::new(RefCell::new(Self::default()))
    }

    /// A child scope of `outer`.
    pub fn new_enclosed(outer: &Env) -> Env {
        Rc::new(RefCell::new(Self {
            store: BTreeMap::new(),
            outer: Some(Rc::clone(outer)),
        }))
    }

    /// Look `name` up here, then in each enclosing scope in turn.
    pub fn get(&self, name: &str) -> Option<Rc<Object>> {
        match self.store.get(name) {
            Some(value) => Some(Rc::clone(value)),
            None => self.outer.as_ref().and_then(|outer| outer.borrow().get(name)),
        }
    }

    /// Bind `name` in this scope, replacing any existing local binding.
    /// Enclosing scopes are never touched.
    pub fn set(&mut self, name: impl Into<String>, value: Rc<Object>) -> Rc<Object> {
        self.store.insert(name.into(), Rc::clone(&value));
        value
    }

    /// Number of scopes from here to the global scope (global = 0).
    pub fn depth(&self) -> usize {
        match &self.outer {
            Some(outer) => 1 + outer.borrow().depth(),
            None => 0,
        }
    }
}
