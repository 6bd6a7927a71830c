//! Lexer tests.
//!
//! Covers: keywords, operators, two-character operators, literals,
//! whitespace handling, unterminated strings, illegal characters, and the
//! repeatable EOF token.

use pika_lexer::{Lexer, Token, TokenKind};
use pretty_assertions::assert_eq;

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

/// Lex source text and return (kind, literal) pairs, excluding the final Eof.
fn lex(source: &str) -> Vec<(TokenKind, String)> {
    Lexer::new(source).map(|t| (t.kind, t.literal)).collect()
}

/// Lex source text and return just the token kinds (excluding final Eof).
fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::new(source).map(|t| t.kind).collect()
}

fn tok(kind: TokenKind, literal: &str) -> (TokenKind, String) {
    (kind, literal.to_string())
}

// ─────────────────────────────────────────────────────────────────────
// Single tokens
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_single_character_tokens() {
    assert_eq!(
        kinds("=+-*/!<>(){}[],;"),
        vec![
            TokenKind::Assign,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Asterisk,
            TokenKind::Slash,
            TokenKind::Bang,
            TokenKind::Lt,
            TokenKind::Gt,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::LBracket,
            TokenKind::RBracket,
            TokenKind::Comma,
            TokenKind::Semicolon,
        ]
    );
}

#[test]
fn test_two_character_operators() {
    assert_eq!(
        lex("10 == 10; 10 != 9;"),
        vec![
            tok(TokenKind::Int, "10"),
            tok(TokenKind::Eq, "=="),
            tok(TokenKind::Int, "10"),
            tok(TokenKind::Semicolon, ";"),
            tok(TokenKind::Int, "10"),
            tok(TokenKind::NotEq, "!="),
            tok(TokenKind::Int, "9"),
            tok(TokenKind::Semicolon, ";"),
        ]
    );
}

#[test]
fn test_bang_and_assign_without_peek_match() {
    assert_eq!(
        lex("!= = ! =="),
        vec![
            tok(TokenKind::NotEq, "!="),
            tok(TokenKind::Assign, "="),
            tok(TokenKind::Bang, "!"),
            tok(TokenKind::Eq, "=="),
        ]
    );
}

#[test]
fn test_keywords() {
    let pairs = [
        ("fn", TokenKind::Function),
        ("let", TokenKind::Let),
        ("true", TokenKind::True),
        ("false", TokenKind::False),
        ("if", TokenKind::If),
        ("else", TokenKind::Else),
        ("return", TokenKind::Return),
    ];
    for (src, expected) in pairs {
        assert_eq!(lex(src), vec![tok(expected, src)], "keyword '{src}'");
    }
}

#[test]
fn test_identifiers() {
    assert_eq!(
        lex("foo _bar baz_1 letter fnord x2y"),
        vec![
            tok(TokenKind::Ident, "foo"),
            tok(TokenKind::Ident, "_bar"),
            tok(TokenKind::Ident, "baz_1"),
            tok(TokenKind::Ident, "letter"),
            tok(TokenKind::Ident, "fnord"),
            tok(TokenKind::Ident, "x2y"),
        ]
    );
}

#[test]
fn test_number_then_identifier() {
    // A digit run ends at the first non-digit.
    assert_eq!(
        lex("123abc"),
        vec![tok(TokenKind::Int, "123"), tok(TokenKind::Ident, "abc")]
    );
}

#[test]
fn test_negative_number_is_two_tokens() {
    assert_eq!(
        lex("-5"),
        vec![tok(TokenKind::Minus, "-"), tok(TokenKind::Int, "5")]
    );
}

// ─────────────────────────────────────────────────────────────────────
// Strings
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_string_literals() {
    assert_eq!(
        lex(r#""foobar" "foo bar" """#),
        vec![
            tok(TokenKind::String, "foobar"),
            tok(TokenKind::String, "foo bar"),
            tok(TokenKind::String, ""),
        ]
    );
}

#[test]
fn test_string_has_no_escapes() {
    assert_eq!(lex(r#""a\nb""#), vec![tok(TokenKind::String, r"a\nb")]);
}

#[test]
fn test_string_keeps_non_ascii_text() {
    assert_eq!(lex("\"héllo ✓\""), vec![tok(TokenKind::String, "héllo ✓")]);
}

#[test]
fn test_unterminated_string_runs_to_end_of_input() {
    let mut lexer = Lexer::new(r#"let s = "abc def"#);
    let tokens: Vec<Token> = (0..4).map(|_| lexer.next_token()).collect();
    assert_eq!(tokens[3], Token::new(TokenKind::String, "abc def"));
    assert_eq!(lexer.next_token(), Token::eof());
}

#[test]
fn test_lone_quote_at_end_is_empty_string() {
    assert_eq!(lex("\""), vec![tok(TokenKind::String, "")]);
}

// ─────────────────────────────────────────────────────────────────────
// Whitespace, illegal characters, EOF
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_all_whitespace_is_skipped() {
    assert_eq!(
        lex("  let\t\tx\r\n=\n\n  5 ;  "),
        vec![
            tok(TokenKind::Let, "let"),
            tok(TokenKind::Ident, "x"),
            tok(TokenKind::Assign, "="),
            tok(TokenKind::Int, "5"),
            tok(TokenKind::Semicolon, ";"),
        ]
    );
}

#[test]
fn test_illegal_characters() {
    assert_eq!(
        lex("a @ b # ~"),
        vec![
            tok(TokenKind::Ident, "a"),
            tok(TokenKind::Illegal, "@"),
            tok(TokenKind::Ident, "b"),
            tok(TokenKind::Illegal, "#"),
            tok(TokenKind::Illegal, "~"),
        ]
    );
}

#[test]
fn test_non_ascii_character_is_one_illegal_token() {
    assert_eq!(
        lex("x é y"),
        vec![
            tok(TokenKind::Ident, "x"),
            tok(TokenKind::Illegal, "é"),
            tok(TokenKind::Ident, "y"),
        ]
    );
}

#[test]
fn test_eof_repeats() {
    let mut lexer = Lexer::new("x");
    assert_eq!(lexer.next_token(), Token::new(TokenKind::Ident, "x"));
    for _ in 0..3 {
        assert_eq!(lexer.next_token(), Token::eof());
    }
}

#[test]
fn test_whitespace_only_input() {
    let mut lexer = Lexer::new(" \n\t ");
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

// ─────────────────────────────────────────────────────────────────────
// Full programs
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_full_program() {
    let input = r#"let five = 5;
let add = fn(x, y) {
  x + y;
};
let result = add(five, 10);
if (5 < 10) {
    return true;
} else {
    return false;
}
[1, 2];
"#;
    let expected = vec![
        tok(TokenKind::Let, "let"),
        tok(TokenKind::Ident, "five"),
        tok(TokenKind::Assign, "="),
        tok(TokenKind::Int, "5"),
        tok(TokenKind::Semicolon, ";"),
        tok(TokenKind::Let, "let"),
        tok(TokenKind::Ident, "add"),
        tok(TokenKind::Assign, "="),
        tok(TokenKind::Function, "fn"),
        tok(TokenKind::LParen, "("),
        tok(TokenKind::Ident, "x"),
        tok(TokenKind::Comma, ","),
        tok(TokenKind::Ident, "y"),
        tok(TokenKind::RParen, ")"),
        tok(TokenKind::LBrace, "{"),
        tok(TokenKind::Ident, "x"),
        tok(TokenKind::Plus, "+"),
        tok(TokenKind::Ident, "y"),
        tok(TokenKind::Semicolon, ";"),
        tok(TokenKind::RBrace, "}"),
        tok(TokenKind::Semicolon, ";"),
        tok(TokenKind::Let, "let"),
        tok(TokenKind::Ident, "result"),
        tok(TokenKind::Assign, "="),
        tok(TokenKind::Ident, "add"),
        tok(TokenKind::LParen, "("),
        tok(TokenKind::Ident, "five"),
        tok(TokenKind::Comma, ","),
        tok(TokenKind::Int, "10"),
        tok(TokenKind::RParen, ")"),
        tok(TokenKind::Semicolon, ";"),
        tok(TokenKind::If, "if"),
        tok(TokenKind::LParen, "("),
        tok(TokenKind::Int, "5"),
        tok(TokenKind::Lt, "<"),
        tok(TokenKind::Int, "10"),
        tok(TokenKind::RParen, ")"),
        tok(TokenKind::LBrace, "{"),
        tok(TokenKind::Return, "return"),
        tok(TokenKind::True, "true"),
        tok(TokenKind::Semicolon, ";"),
        tok(TokenKind::RBrace, "}"),
        tok(TokenKind::Else, "else"),
        tok(TokenKind::LBrace, "{"),
        tok(TokenKind::Return, "return"),
        tok(TokenKind::False, "false"),
        tok(TokenKind::Semicolon, ";"),
        tok(TokenKind::RBrace, "}"),
        tok(TokenKind::LBracket, "["),
        tok(TokenKind::Int, "1"),
        tok(TokenKind::Comma, ","),
        tok(TokenKind::Int, "2"),
        tok(TokenKind::RBracket, "]"),
        tok(TokenKind::Semicolon, ";"),
    ];
    assert_eq!(lex(input), expected);
}

#[test]
fn test_determinism_100_iterations() {
    let source = "let add = fn(a, b) { a + b }; add(1, 2) == 3";
    let first = lex(source);
    for i in 0..100 {
        assert_eq!(first, lex(source), "Determinism failure at iteration {i}");
    }
}
