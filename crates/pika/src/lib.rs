//! Pika interpreter: orchestrates the full pipeline.
//!
//! ```text
//! Source → Lexer → Parser → Evaluator → Object
//! ```
//!
//! A [`Session`] owns one environment and evaluator, so bindings made by one
//! [`Session::run`] are visible to the next.

use std::io::Write;
use std::rc::Rc;

use serde::Serialize;

pub use pika_eval::{EvalConfig, Object, ObjectType, RuntimeError};
pub use pika_parser::ParseError;
pub use pika_types::ast::Program;

use pika_eval::{Env, Environment, Evaluator};
use pika_lexer::Lexer;
use pika_parser::Parser;

/// Parse `source` into a program, or return every syntax error found.
pub fn parse(source: &str) -> Result<Program, Vec<ParseError>> {
    let result = Parser::new(Lexer::new(source)).parse();
    if result.has_errors() {
        Err(result.errors)
    } else {
        Ok(result.program)
    }
}

/// Return the interpreter version string.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// ══════════════════════════════════════════════════════════════════════════════
// Session
// ══════════════════════════════════════════════════════════════════════════════

/// An interactive evaluation session.
pub struct Session {
    env: Env,
    evaluator: Evaluator,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A session with default configuration; `print` writes to stdout.
    pub fn new() -> Self {
        Self::with_config(EvalConfig::default())
    }

    pub fn with_config(config: EvalConfig) -> Self {
        Self {
            env: Environment::new(),
            evaluator: Evaluator::with_config(config),
        }
    }

    /// Redirect `print` output.
    pub fn with_output(mut self, output: Box<dyn Write>) -> Self {
        self.evaluator = self.evaluator.with_output(output);
        self
    }

    pub fn config(&self) -> &EvalConfig {
        self.evaluator.config()
    }

    /// The session's global environment.
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Parse and evaluate `source`. Nothing is evaluated if it has syntax
    /// errors.
    pub fn run(&mut self, source: &str) -> RunOutcome {
        match parse(source) {
            Ok(program) => {
                let value = self.evaluator.eval_program(&program, &self.env);
                tracing::debug!(
                    statements = program.statements.len(),
                    result = %value.object_type(),
                    "evaluated program"
                );
                RunOutcome::Value(value)
            }
            Err(errors) => {
                tracing::debug!(count = errors.len(), "rejected program with parse errors");
                RunOutcome::ParseErrors(errors)
            }
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Outcomes
// ══════════════════════════════════════════════════════════════════════════════

/// What a single [`Session::run`] produced.
#[derive(Debug)]
pub enum RunOutcome {
    /// The program ran. Runtime failures arrive here as [`Object::Error`].
    Value(Rc<Object>),
    /// The program did not parse.
    ParseErrors(Vec<ParseError>),
}

impl RunOutcome {
    /// The resulting value, if the program parsed.
    pub fn value(&self) -> Option<&Rc<Object>> {
        match self {
            RunOutcome::Value(value) => Some(value),
            RunOutcome::ParseErrors(_) => None,
        }
    }

    /// Parsed and evaluated without a runtime error.
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Value(value) if !value.is_error())
    }

    pub fn report(&self) -> RunReport {
        match self {
            RunOutcome::Value(value) => RunReport {
                success: !value.is_error(),
                output: Some(value.inspect()),
                errors: Vec::new(),
            },
            RunOutcome::ParseErrors(errors) => RunReport {
                success: false,
                output: None,
                errors: errors.iter().map(ToString::to_string).collect(),
            },
        }
    }
}

/// Serializable summary of a run.
///
/// ```json
/// { "success": true, "output": "15", "errors": [] }
/// ```
///
/// `output` is the inspected value (including `ERROR: ...` for runtime
/// failures) and is `null` when parsing failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub success: bool,
    pub output: Option<String>,
    pub errors: Vec<String>,
}

impl RunReport {
    /// Serialize to compact JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(
                r#"{{"success":false,"output":null,"errors":["serialization error: {e}"]}}"#
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ok() {
        let program = parse("let x = 1; x").unwrap();
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn test_parse_errors() {
        let errors = parse("let x 5;").unwrap_err();
        assert_eq!(
            errors[0].to_string(),
            "expected next token to be =, got INT instead"
        );
    }

    #[test]
    fn test_version() {
        assert_eq!(version(), "0.1.0");
    }
}
