//! Shared types for the Pika interpreter.
//!
//! This crate defines the AST produced by the parser and consumed by the
//! evaluator, together with its canonical source rendering.

pub mod ast;
