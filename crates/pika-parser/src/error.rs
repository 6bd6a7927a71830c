//! Parser error types.

use pika_lexer::TokenKind;
use thiserror::Error;

/// A syntax error recorded while parsing.
///
/// The `Display` form is a single human-readable line with no control
/// characters, suitable for printing one error per line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The token after the current one was not the kind the grammar requires.
    #[error("expected next token to be {expected}, got {got} instead")]
    UnexpectedToken { expected: TokenKind, got: TokenKind },

    /// No expression can start with this token kind.
    #[error("no prefix parse function for {0} found")]
    NoPrefixParseFn(TokenKind),

    /// An integer literal that does not fit in 64 bits.
    #[error("could not parse {0:?} as an integer")]
    InvalidInteger(String),
}
