//! Pika tree-walking evaluator.
//!
//! Walks a parsed [`pika_types::ast::Program`] and produces runtime
//! [`Object`]s. Runtime failures are ordinary values ([`Object::Error`]),
//! never panics.

pub mod builtins;
mod config;
mod env;
mod error;
mod evaluator;
pub mod object;

pub use config::{ConfigError, EvalConfig, DEFAULT_MAX_CALL_DEPTH};
pub use env::{Env, Environment};
pub use error::RuntimeError;
pub use evaluator::{eval, Evaluator};
pub use object::{Builtin, Function, Object, ObjectType};
