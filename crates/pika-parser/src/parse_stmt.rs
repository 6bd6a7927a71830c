//! Statement parsing.

use pika_lexer::TokenKind;
use pika_types::ast::*;

use crate::error::ParseError;
use crate::parse_expr::Precedence;
use crate::parser::Parser;

impl<'src> Parser<'src> {
    /// Parse a single statement starting at `cur`.
    pub(crate) fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// `let name = value [;]`
    fn parse_let_statement(&mut self) -> Option<Statement> {
        self.expect_peek(TokenKind::Ident)?;
        let name = Ident::new(self.cur.literal.clone());
        self.expect_peek(TokenKind::Assign)?;
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();
        Some(Statement::Let { name, value })
    }

    /// `return value [;]`
    fn parse_return_statement(&mut self) -> Option<Statement> {
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();
        Some(Statement::Return { value })
    }

    /// `expr [;]`
    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();
        Some(Statement::Expression(expr))
    }

    fn skip_semicolon(&mut self) {
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }
    }

    /// Parse `{ statements... }` with `cur` on the opening brace. On success
    /// `cur` is the closing brace.
    pub(crate) fn parse_block_statement(&mut self) -> Option<BlockStatement> {
        self.next_token();
        let mut statements = Vec::new();
        while !self.cur_is(TokenKind::RBrace) && !self.cur_is(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }

        if self.cur_is(TokenKind::Eof) {
            self.push_error(ParseError::UnexpectedToken {
                expected: TokenKind::RBrace,
                got: TokenKind::Eof,
            });
            return None;
        }
        Some(BlockStatement::new(statements))
    }
}
