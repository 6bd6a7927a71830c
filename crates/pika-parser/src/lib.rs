//! Pika parser: converts a token stream into an AST.

mod error;
mod parse_expr;
mod parse_stmt;
mod parser;

pub use error::ParseError;
pub use parse_expr::Precedence;
pub use parser::{ParseResult, Parser};
