//! Expression parsing (Pratt / operator precedence).
//!
//! Precedence (lowest → highest):
//! 1. `==`, `!=`
//! 2. `<`, `>`
//! 3. `+`, `-`
//! 4. `*`, `/`
//! 5. unary `!`, `-`
//! 6. `(` (call)
//!
//! All binary operators are left-associative.

use std::rc::Rc;

use pika_lexer::TokenKind;
use pika_stack::ensure_sufficient_stack;
use pika_types::ast::*;

use crate::error::ParseError;
use crate::parser::Parser;

/// Binding power of an operator token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    /// `==`, `!=`
    Equals,
    /// `<`, `>`
    LessGreater,
    /// `+`, `-`
    Sum,
    /// `*`, `/`
    Product,
    /// `!x`, `-x`
    Prefix,
    /// `f(x)`
    Call,
}

impl Precedence {
    /// The precedence of `kind` in infix position.
    pub fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
            TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
            TokenKind::LParen => Precedence::Call,
            _ => Precedence::Lowest,
        }
    }
}

fn infix_operator(kind: TokenKind) -> Option<InfixOperator> {
    Some(match kind {
        TokenKind::Eq => InfixOperator::Eq,
        TokenKind::NotEq => InfixOperator::NotEq,
        TokenKind::Lt => InfixOperator::Less,
        TokenKind::Gt => InfixOperator::Greater,
        TokenKind::Plus => InfixOperator::Add,
        TokenKind::Minus => InfixOperator::Sub,
        TokenKind::Asterisk => InfixOperator::Mul,
        TokenKind::Slash => InfixOperator::Div,
        _ => return None,
    })
}

impl<'src> Parser<'src> {
    // ══════════════════════════════════════════════════════════════════════════
    // Registries
    // ══════════════════════════════════════════════════════════════════════════

    pub(crate) fn register_handlers(&mut self) {
        self.prefix_fns.insert(TokenKind::Ident, Self::parse_identifier);
        self.prefix_fns.insert(TokenKind::Int, Self::parse_integer_literal);
        self.prefix_fns.insert(TokenKind::String, Self::parse_string_literal);
        self.prefix_fns.insert(TokenKind::True, Self::parse_boolean);
        self.prefix_fns.insert(TokenKind::False, Self::parse_boolean);
        self.prefix_fns.insert(TokenKind::Bang, Self::parse_prefix_expression);
        self.prefix_fns.insert(TokenKind::Minus, Self::parse_prefix_expression);
        self.prefix_fns.insert(TokenKind::LParen, Self::parse_grouped_expression);
        self.prefix_fns.insert(TokenKind::If, Self::parse_if_expression);
        self.prefix_fns.insert(TokenKind::Function, Self::parse_function_literal);
        self.prefix_fns.insert(TokenKind::LBracket, Self::parse_array_literal);

        for kind in [
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Asterisk,
            TokenKind::Slash,
            TokenKind::Eq,
            TokenKind::NotEq,
            TokenKind::Lt,
            TokenKind::Gt,
        ] {
            self.infix_fns.insert(kind, Self::parse_infix_expression);
        }
        self.infix_fns.insert(TokenKind::LParen, Self::parse_call_expression);
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Entry Point
    // ══════════════════════════════════════════════════════════════════════════

    /// Parse an expression whose operators all bind tighter than `precedence`.
    ///
    /// On entry `cur` is the first token of the expression; on exit it is the
    /// last token consumed.
    ///
    /// Each nested group, operand or argument re-enters here, so the stack is
    /// grown here and nesting depth is limited only by memory.
    pub(crate) fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        ensure_sufficient_stack(|| self.parse_expression_at(precedence))
    }

    fn parse_expression_at(&mut self, precedence: Precedence) -> Option<Expression> {
        let Some(prefix) = self.prefix_fns.get(&self.cur.kind).copied() else {
            self.push_error(ParseError::NoPrefixParseFn(self.cur.kind));
            return None;
        };
        let mut left = prefix(self)?;

        while !self.peek_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            let Some(infix) = self.infix_fns.get(&self.peek.kind).copied() else {
                return Some(left);
            };
            self.next_token();
            left = infix(self, left)?;
        }
        Some(left)
    }

    fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek.kind)
    }

    fn cur_precedence(&self) -> Precedence {
        Precedence::of(self.cur.kind)
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Prefix Handlers
    // ══════════════════════════════════════════════════════════════════════════

    fn parse_identifier(&mut self) -> Option<Expression> {
        Some(Expression::Identifier(Ident::new(self.cur.literal.clone())))
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        match self.cur.literal.parse::<i64>() {
            Ok(value) => Some(Expression::IntegerLiteral(value)),
            Err(_) => {
                let literal = self.cur.literal.clone();
                self.push_error(ParseError::InvalidInteger(literal));
                None
            }
        }
    }

    fn parse_string_literal(&mut self) -> Option<Expression> {
        Some(Expression::StringLiteral(self.cur.literal.clone()))
    }

    fn parse_boolean(&mut self) -> Option<Expression> {
        Some(Expression::Boolean(self.cur_is(TokenKind::True)))
    }

    /// `!x` or `-x`
    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let operator = match self.cur.kind {
            TokenKind::Bang => PrefixOperator::Not,
            TokenKind::Minus => PrefixOperator::Neg,
            _ => return None,
        };
        self.next_token();
        let operand = self.parse_expression(Precedence::Prefix)?;
        Some(Expression::Prefix {
            operator,
            operand: Box::new(operand),
        })
    }

    /// `( expr )`
    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let inner = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Some(inner)
    }

    /// `if (cond) { ... } [else { ... }]`
    fn parse_if_expression(&mut self) -> Option<Expression> {
        self.expect_peek(TokenKind::LParen)?;
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        self.expect_peek(TokenKind::LBrace)?;
        let consequence = self.parse_block_statement()?;

        let alternative = if self.peek_is(TokenKind::Else) {
            self.next_token();
            self.expect_peek(TokenKind::LBrace)?;
            Some(self.parse_block_statement()?)
        } else {
            None
        };

        Some(Expression::If(Box::new(IfExpression {
            condition,
            consequence,
            alternative,
        })))
    }

    /// `fn(params) { body }`
    fn parse_function_literal(&mut self) -> Option<Expression> {
        self.expect_peek(TokenKind::LParen)?;
        let parameters = self.parse_function_parameters()?;
        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_statement()?;
        Some(Expression::Function(FunctionLiteral {
            parameters,
            body: Rc::new(body),
        }))
    }

    /// Comma-separated identifiers up to and including `)`.
    fn parse_function_parameters(&mut self) -> Option<Vec<Ident>> {
        let mut parameters = Vec::new();
        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Some(parameters);
        }

        self.expect_peek(TokenKind::Ident)?;
        parameters.push(Ident::new(self.cur.literal.clone()));
        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.expect_peek(TokenKind::Ident)?;
            parameters.push(Ident::new(self.cur.literal.clone()));
        }

        self.expect_peek(TokenKind::RParen)?;
        Some(parameters)
    }

    /// `[elements...]`
    fn parse_array_literal(&mut self) -> Option<Expression> {
        let elements = self.parse_expression_list(TokenKind::RBracket)?;
        Some(Expression::ArrayLiteral(elements))
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Infix Handlers
    // ══════════════════════════════════════════════════════════════════════════

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let operator = infix_operator(self.cur.kind)?;
        let precedence = self.cur_precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;
        Some(Expression::Infix {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// `callee(args...)`. The `(` is the operator token.
    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let arguments = self.parse_expression_list(TokenKind::RParen)?;
        Some(Expression::Call {
            function: Box::new(function),
            arguments,
        })
    }

    /// Comma-separated expressions up to and including `end`. `cur` is the
    /// opening delimiter on entry.
    fn parse_expression_list(&mut self, end: TokenKind) -> Option<Vec<Expression>> {
        let mut list = Vec::new();
        if self.peek_is(end) {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);
        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(end)?;
        Some(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_order() {
        assert!(Precedence::Lowest < Precedence::Equals);
        assert!(Precedence::Equals < Precedence::LessGreater);
        assert!(Precedence::LessGreater < Precedence::Sum);
        assert!(Precedence::Sum < Precedence::Product);
        assert!(Precedence::Product < Precedence::Prefix);
        assert!(Precedence::Prefix < Precedence::Call);
    }

    #[test]
    fn test_precedence_of_tokens() {
        assert_eq!(Precedence::of(TokenKind::NotEq), Precedence::Equals);
        assert_eq!(Precedence::of(TokenKind::Gt), Precedence::LessGreater);
        assert_eq!(Precedence::of(TokenKind::Minus), Precedence::Sum);
        assert_eq!(Precedence::of(TokenKind::Slash), Precedence::Product);
        assert_eq!(Precedence::of(TokenKind::LParen), Precedence::Call);
        assert_eq!(Precedence::of(TokenKind::Semicolon), Precedence::Lowest);
        assert_eq!(Precedence::of(TokenKind::LBracket), Precedence::Lowest);
    }

    #[test]
    fn test_every_infix_token_has_an_operator() {
        for kind in [
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Asterisk,
            TokenKind::Slash,
            TokenKind::Eq,
            TokenKind::NotEq,
            TokenKind::Lt,
            TokenKind::Gt,
        ] {
            assert!(infix_operator(kind).is_some(), "{kind}");
        }
        assert_eq!(infix_operator(TokenKind::LParen), None);
    }
}
