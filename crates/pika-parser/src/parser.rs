//! Core parser infrastructure: token cursor, handler registries, error
//! reporting.

use std::collections::HashMap;

use pika_lexer::{Lexer, Token, TokenKind};
use pika_types::ast::{Expression, Program};

use crate::error::ParseError;

/// Parses the expression starting at the current token.
pub(crate) type PrefixParseFn<'src> = fn(&mut Parser<'src>) -> Option<Expression>;

/// Folds the current (operator) token and what follows into `left`.
pub(crate) type InfixParseFn<'src> = fn(&mut Parser<'src>, Expression) -> Option<Expression>;

/// The Pika parser.
///
/// Pulls tokens from a [`Lexer`] with one token of lookahead and builds a
/// [`Program`]. Malformed input never aborts the parse: errors are collected
/// and parsing resumes at the next token.
pub struct Parser<'src> {
    /// Token source.
    lexer: Lexer<'src>,
    /// The token under examination.
    pub(crate) cur: Token,
    /// The token after `cur`.
    pub(crate) peek: Token,
    /// Collected errors.
    errors: Vec<ParseError>,
    /// Prefix handlers keyed by the kind of the token that starts the expression.
    pub(crate) prefix_fns: HashMap<TokenKind, PrefixParseFn<'src>>,
    /// Infix handlers keyed by the kind of the operator token.
    pub(crate) infix_fns: HashMap<TokenKind, InfixParseFn<'src>>,
}

/// Result of parsing.
pub struct ParseResult {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    /// Returns `true` if any syntax error was recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl<'src> Parser<'src> {
    /// Create a parser and pre-read the first two tokens.
    pub fn new(lexer: Lexer<'src>) -> Self {
        let mut parser = Self {
            lexer,
            cur: Token::eof(),
            peek: Token::eof(),
            errors: Vec::new(),
            prefix_fns: HashMap::new(),
            infix_fns: HashMap::new(),
        };
        parser.register_handlers();
        parser.next_token();
        parser.next_token();
        parser
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    /// Advance by one token.
    pub(crate) fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.cur = std::mem::replace(&mut self.peek, next);
    }

    pub(crate) fn cur_is(&self, kind: TokenKind) -> bool {
        self.cur.kind == kind
    }

    pub(crate) fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Advance only if the next token has the expected kind; otherwise record
    /// an error and leave the cursor where it is.
    pub(crate) fn expect_peek(&mut self, kind: TokenKind) -> Option<()> {
        if self.peek_is(kind) {
            self.next_token();
            Some(())
        } else {
            self.peek_error(kind);
            None
        }
    }

    // ── Error Reporting ───────────────────────────────────────────────────────

    /// All errors recorded so far.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub(crate) fn push_error(&mut self, error: ParseError) {
        tracing::debug!(%error, literal = %self.cur.literal, "parse error");
        self.errors.push(error);
    }

    fn peek_error(&mut self, expected: TokenKind) {
        self.push_error(ParseError::UnexpectedToken {
            expected,
            got: self.peek.kind,
        });
    }

    // ── Public API ────────────────────────────────────────────────────────────

    /// Parse statements until end of input.
    ///
    /// Statements that fail to parse are dropped; their errors are available
    /// from [`Parser::errors`].
    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();
        while !self.cur_is(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }
        Program::new(statements)
    }

    /// Parse the whole input, consuming the parser.
    pub fn parse(mut self) -> ParseResult {
        let program = self.parse_program();
        ParseResult {
            program,
            errors: self.errors,
        }
    }
}
