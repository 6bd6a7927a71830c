//! Runtime error types for the evaluator.

use pika_types::ast::{InfixOperator, PrefixOperator};
use thiserror::Error;

use crate::object::ObjectType;

/// A runtime failure. Carried inside [`crate::Object::Error`]; its `Display`
/// form is the error message shown after `ERROR: `.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A name bound nowhere in the environment chain nor the builtin table.
    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),

    /// A prefix operator applied to an operand type it does not support.
    #[error("unknown operator: {operator}{operand}")]
    UnknownPrefixOperator {
        operator: PrefixOperator,
        operand: ObjectType,
    },

    /// An infix operator applied to same-typed operands it does not support.
    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        left: ObjectType,
        operator: InfixOperator,
        right: ObjectType,
    },

    /// An infix operator applied to operands of different types.
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: ObjectType,
        operator: InfixOperator,
        right: ObjectType,
    },

    /// Integer division with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// Call syntax applied to something that is not callable.
    #[error("not a function: {0}")]
    NotAFunction(ObjectType),

    /// Argument count differs from the callee's arity.
    #[error("wrong number of arguments. got={got}, want={want}")]
    WrongArgumentCount { got: usize, want: usize },

    /// A builtin received an argument type it cannot handle.
    #[error("argument to `{builtin}` not supported, got {got}")]
    UnsupportedArgument {
        builtin: &'static str,
        got: ObjectType,
    },

    /// A builtin's sole argument has the wrong type.
    #[error("argument to `{builtin}` must be {expected}, got {got}")]
    InvalidArgument {
        builtin: &'static str,
        expected: ObjectType,
        got: ObjectType,
    },

    /// A builtin's first argument has the wrong type.
    #[error("first argument to `{builtin}` must be {expected}, got {got}")]
    InvalidFirstArgument {
        builtin: &'static str,
        expected: ObjectType,
        got: ObjectType,
    },

    /// Function calls nested deeper than the configured limit.
    #[error("maximum call depth of {0} exceeded")]
    CallDepthExceeded(usize),

    /// Writing to the output sink failed.
    #[error("output error: {0}")]
    Output(String),
}
