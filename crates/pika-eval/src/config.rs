//! Evaluator configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Call depth allowed when no configuration says otherwise.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

/// Tunables for an [`crate::Evaluator`].
///
/// Missing fields take their defaults, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Maximum number of nested user-function calls. Exceeding it yields a
    /// runtime error instead of overflowing the host stack.
    pub max_call_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

/// A configuration document that could not be read.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid evaluator config: {0}")]
    Json(#[from] serde_json::Error),
}

impl EvalConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        assert_eq!(EvalConfig::default().max_call_depth, 1000);
    }

    #[test]
    fn test_from_json() {
        let config = EvalConfig::from_json(r#"{"max_call_depth": 64}"#).unwrap();
        assert_eq!(config.max_call_depth, 64);
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        assert_eq!(EvalConfig::from_json("{}").unwrap(), EvalConfig::default());
    }

    #[test]
    fn test_from_json_rejects_bad_types() {
        let err = EvalConfig::from_json(r#"{"max_call_depth": "deep"}"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid evaluator config:"));
    }
}
