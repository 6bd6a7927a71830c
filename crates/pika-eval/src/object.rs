//! Runtime values.

use std::fmt;
use std::io::Write;
use std::rc::Rc;

use pika_types::ast::{BlockStatement, Ident};

use crate::env::Env;
use crate::error::RuntimeError;

/// Type tag of an [`Object`], as it appears in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Integer,
    Boolean,
    String,
    Array,
    Function,
    Builtin,
    Null,
    Error,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Integer => "INTEGER",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::String => "STRING",
            ObjectType::Array => "ARRAY",
            ObjectType::Function => "FUNCTION",
            ObjectType::Builtin => "BUILTIN",
            ObjectType::Null => "NULL",
            ObjectType::Error => "ERROR",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A runtime value.
///
/// Values are shared through `Rc` and never mutated after construction.
/// `true`, `false` and `null` are per-thread singletons: obtain them with
/// [`Object::boolean`] and [`Object::null`] so identity comparison holds.
#[derive(Debug, PartialEq)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(String),
    Array(Vec<Rc<Object>>),
    Function(Function),
    Builtin(Builtin),
    Null,
    Error(RuntimeError),
}

thread_local! {
    static TRUE: Rc<Object> = Rc::new(Object::Boolean(true));
    static FALSE: Rc<Object> = Rc::new(Object::Boolean(false));
    static NULL: Rc<Object> = Rc::new(Object::Null);
}

impl Object {
    /// The shared `true` or `false` value.
    pub fn boolean(value: bool) -> Rc<Object> {
        if value {
            TRUE.with(Rc::clone)
        } else {
            FALSE.with(Rc::clone)
        }
    }

    /// The shared `null` value.
    pub fn null() -> Rc<Object> {
        NULL.with(Rc::clone)
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::String(_) => ObjectType::String,
            Object::Array(_) => ObjectType::Array,
            Object::Function(_) => ObjectType::Function,
            Object::Builtin(_) => ObjectType::Builtin,
            Object::Null => ObjectType::Null,
            Object::Error(_) => ObjectType::Error,
        }
    }

    /// Human-readable rendering, as printed by a REPL.
    pub fn inspect(&self) -> String {
        self.to_string()
    }

    /// Everything except `false` and `null` is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(n) => write!(f, "{n}"),
            Object::Boolean(b) => write!(f, "{b}"),
            Object::String(s) => f.write_str(s),
            Object::Array(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("]")
            }
            Object::Function(function) => write!(f, "{function}"),
            Object::Builtin(_) => f.write_str("builtin function"),
            Object::Null => f.write_str("null"),
            Object::Error(err) => write!(f, "ERROR: {err}"),
        }
    }
}

impl From<RuntimeError> for Object {
    fn from(err: RuntimeError) -> Self {
        Object::Error(err)
    }
}

// ── Functions ─────────────────────────────────────────────────────────────────

/// A user-defined function closed over the environment it was created in.
#[derive(Clone)]
pub struct Function {
    pub parameters: Vec<Ident>,
    pub body: Rc<BlockStatement>,
    pub env: Env,
}

// The captured environment may contain this very function.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body.to_string())
            .finish_non_exhaustive()
    }
}

/// Two functions are equal only if they come from the same literal
/// evaluated in the same scope.
impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body) && Rc::ptr_eq(&self.env, &other.env)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("fn(")?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ") {}", self.body)
    }
}

// ── Builtins ──────────────────────────────────────────────────────────────────

/// Native implementation of a builtin. Receives the evaluated arguments and
/// the evaluator's output sink.
pub type BuiltinFn = fn(&[Rc<Object>], &mut dyn Write) -> Result<Rc<Object>, RuntimeError>;

/// A host-provided function such as `len` or `push`.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Environment;

    #[test]
    fn test_singletons_are_shared() {
        assert!(Rc::ptr_eq(&Object::boolean(true), &Object::boolean(true)));
        assert!(Rc::ptr_eq(&Object::boolean(false), &Object::boolean(false)));
        assert!(Rc::ptr_eq(&Object::null(), &Object::null()));
        assert!(!Rc::ptr_eq(&Object::boolean(true), &Object::boolean(false)));
    }

    #[test]
    fn test_truthiness() {
        assert!(Object::Integer(0).is_truthy());
        assert!(Object::String(String::new()).is_truthy());
        assert!(Object::Array(Vec::new()).is_truthy());
        assert!(Object::Boolean(true).is_truthy());
        assert!(!Object::Boolean(false).is_truthy());
        assert!(!Object::Null.is_truthy());
    }

    #[test]
    fn test_inspect() {
        let array = Object::Array(vec![
            Rc::new(Object::Integer(1)),
            Rc::new(Object::String("two".into())),
            Object::null(),
        ]);
        assert_eq!(array.inspect(), "[1, two, null]");
        assert_eq!(Object::Boolean(false).inspect(), "false");
        assert_eq!(
            Object::Error(RuntimeError::DivisionByZero).inspect(),
            "ERROR: division by zero"
        );
    }

    #[test]
    fn test_function_inspect_and_debug() {
        let function = Function {
            parameters: vec![Ident::new("x"), Ident::new("y")],
            body: Rc::new(BlockStatement::default()),
            env: Environment::new(),
        };
        assert_eq!(Object::Function(function.clone()).inspect(), "fn(x, y) { }");

        // The environment can hold the function itself without Debug looping.
        function
            .env
            .borrow_mut()
            .set("self", Rc::new(Object::Function(function.clone())));
        assert!(format!("{function:?}").starts_with("Function"));
    }

    #[test]
    fn test_from_runtime_error() {
        let object: Object = RuntimeError::NotAFunction(ObjectType::Integer).into();
        assert!(object.is_error());
        assert_eq!(object.inspect(), "ERROR: not a function: INTEGER");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Object::Integer(1).object_type().to_string(), "INTEGER");
        assert_eq!(Object::Null.object_type().to_string(), "NULL");
        assert_eq!(ObjectType::Builtin.as_str(), "BUILTIN");
    }
}
