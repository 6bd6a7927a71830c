//! Core Pika lexer: converts source text to a token stream.
//!
//! Features:
//! - One token per [`Lexer::next_token`] call, single-character lookahead
//! - `==` / `!=` recognised with a one-character peek
//! - Integer literals only (unary minus is left to the parser)
//! - String literals without escapes; an unterminated string runs to the end
//!   of input
//! - Never fails: unknown characters become [`TokenKind::Illegal`] tokens

use crate::token::{Token, TokenKind};

/// The Pika lexer.
///
/// Holds a cursor into the source text. Once the end of input is reached
/// every further call yields [`TokenKind::Eof`].
pub struct Lexer<'src> {
    /// The full source text.
    input: &'src str,
    /// Byte offset of `ch`.
    position: usize,
    /// Byte offset of the character after `ch`.
    read_position: usize,
    /// The byte under examination (`0` at end of input).
    ch: u8,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer positioned on the first character of `input`.
    pub fn new(input: &'src str) -> Self {
        let mut lexer = Self {
            input,
            position: 0,
            read_position: 0,
            ch: 0,
        };
        lexer.read_char();
        lexer
    }

    /// Scan and return the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let token = match self.ch {
            b'=' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    Token::new(TokenKind::Eq, "==")
                } else {
                    Token::new(TokenKind::Assign, "=")
                }
            }
            b'!' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    Token::new(TokenKind::NotEq, "!=")
                } else {
                    Token::new(TokenKind::Bang, "!")
                }
            }
            b'+' => self.single(TokenKind::Plus),
            b'-' => self.single(TokenKind::Minus),
            b'*' => self.single(TokenKind::Asterisk),
            b'/' => self.single(TokenKind::Slash),
            b'<' => self.single(TokenKind::Lt),
            b'>' => self.single(TokenKind::Gt),
            b',' => self.single(TokenKind::Comma),
            b';' => self.single(TokenKind::Semicolon),
            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b'{' => self.single(TokenKind::LBrace),
            b'}' => self.single(TokenKind::RBrace),
            b'[' => self.single(TokenKind::LBracket),
            b']' => self.single(TokenKind::RBracket),
            b'"' => Token::new(TokenKind::String, self.read_string()),

            // Identifiers, keywords and numbers consume their whole lexeme and
            // leave the cursor on the following character.
            ch if is_letter(ch) => {
                let literal = self.read_identifier();
                let kind = TokenKind::from_keyword(literal).unwrap_or(TokenKind::Ident);
                return Token::new(kind, literal);
            }
            ch if ch.is_ascii_digit() => {
                return Token::new(TokenKind::Int, self.read_number());
            }

            0 if self.at_end() => return Token::eof(),
            _ => return self.illegal(),
        };

        self.read_char();
        token
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn read_char(&mut self) {
        self.ch = self.input.as_bytes().get(self.read_position).copied().unwrap_or(0);
        self.position = self.read_position;
        if self.read_position < self.input.len() {
            self.read_position += 1;
        }
    }

    fn peek_char(&self) -> u8 {
        self.input.as_bytes().get(self.read_position).copied().unwrap_or(0)
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }

    fn single(&self, kind: TokenKind) -> Token {
        Token::new(kind, &self.input[self.position..self.read_position])
    }

    /// Emit the current character, which may span several bytes, as an
    /// ILLEGAL token and step past it.
    fn illegal(&mut self) -> Token {
        let ch = self.input[self.position..].chars().next().unwrap_or('\0');
        let end = self.position + ch.len_utf8();
        while self.position < end && !self.at_end() {
            self.read_char();
        }
        Token::new(TokenKind::Illegal, ch.to_string())
    }

    // ─────────────────────────────────────────────────────────────
    // Lexemes
    // ─────────────────────────────────────────────────────────────

    fn read_identifier(&mut self) -> &'src str {
        let start = self.position;
        while is_letter(self.ch) || self.ch.is_ascii_digit() {
            self.read_char();
        }
        &self.input[start..self.position]
    }

    fn read_number(&mut self) -> &'src str {
        let start = self.position;
        while self.ch.is_ascii_digit() {
            self.read_char();
        }
        &self.input[start..self.position]
    }

    /// Read string contents after the opening `"`, leaving the cursor on the
    /// closing quote (or at end of input when unterminated).
    fn read_string(&mut self) -> &'src str {
        let start = self.position + 1;
        loop {
            self.read_char();
            if self.ch == b'"' || self.at_end() {
                break;
            }
        }
        &self.input[start..self.position]
    }
}

/// Yields every token up to, but not including, [`TokenKind::Eof`].
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}
