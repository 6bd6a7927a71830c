//! AST node types for the Pika language.
//!
//! The tree is built once by the parser and never mutated afterwards.
//! Statements and expressions are closed enums so every consumer matches
//! exhaustively.
//!
//! Every node implements [`fmt::Display`] producing canonical source text:
//! prefix and infix expressions are fully parenthesised, statements are
//! terminated with `;`, and blocks are braced. Re-parsing that text yields a
//! structurally equal tree.

use std::fmt;
use std::rc::Rc;

// ══════════════════════════════════════════════════════════════════════════════
// Top Level
// ══════════════════════════════════════════════════════════════════════════════

/// A complete program: the ordered statements of one input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    /// Returns `true` if the program has no statements.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `let name = value;`
    Let { name: Ident, value: Expression },
    /// `return value;`
    Return { value: Expression },
    /// A bare expression, optionally followed by `;`.
    Expression(Expression),
}

/// `{ statements... }`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

impl BlockStatement {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Identifiers
// ══════════════════════════════════════════════════════════════════════════════

/// A bound or referenced name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: String,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

/// An expression node. Recursive variants are boxed.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    // ── Literals ──
    /// `foo`
    Identifier(Ident),
    /// `42`
    IntegerLiteral(i64),
    /// `"hello"`
    StringLiteral(String),
    /// `true` / `false`
    Boolean(bool),
    /// `[expr, ...]`
    ArrayLiteral(Vec<Expression>),

    // ── Operators ──
    /// `-x`, `!x`
    Prefix {
        operator: PrefixOperator,
        operand: Box<Expression>,
    },
    /// `a + b`, `a == b`, ...
    Infix {
        operator: InfixOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    // ── Control Flow ──
    /// `if (cond) { ... } [else { ... }]`
    If(Box<IfExpression>),

    // ── Functions ──
    /// `fn(params) { body }`
    Function(FunctionLiteral),
    /// `callee(args...)`
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
}

/// `if (condition) { consequence } else { alternative }`
#[derive(Debug, Clone, PartialEq)]
pub struct IfExpression {
    pub condition: Expression,
    pub consequence: BlockStatement,
    pub alternative: Option<BlockStatement>,
}

/// `fn(parameters) { body }`
///
/// The body is reference-counted: closures created from this literal share
/// it and may outlive the [`Program`] it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    pub parameters: Vec<Ident>,
    pub body: Rc<BlockStatement>,
}

// ── Operators ─────────────────────────────────────────────────────────────────

/// Unary prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixOperator {
    /// `!x`
    Not,
    /// `-x`
    Neg,
}

impl PrefixOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrefixOperator::Not => "!",
            PrefixOperator::Neg => "-",
        }
    }
}

/// Binary infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfixOperator {
    // Comparison
    Eq,
    NotEq,
    Less,
    Greater,
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
}

impl InfixOperator {
    /// Returns the operator symbol, as used in source and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfixOperator::Eq => "==",
            InfixOperator::NotEq => "!=",
            InfixOperator::Less => "<",
            InfixOperator::Greater => ">",
            InfixOperator::Add => "+",
            InfixOperator::Sub => "-",
            InfixOperator::Mul => "*",
            InfixOperator::Div => "/",
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Canonical rendering
// ══════════════════════════════════════════════════════════════════════════════

/// Writes `items` separated by `sep`.
fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.statements, " ")
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {name} = {value};"),
            Statement::Return { value } => write!(f, "return {value};"),
            Statement::Expression(expr) => write!(f, "{expr};"),
        }
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return f.write_str("{ }");
        }
        f.write_str("{ ")?;
        write_joined(f, &self.statements, " ")?;
        f.write_str(" }")
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{ident}"),
            Expression::IntegerLiteral(n) => write!(f, "{n}"),
            Expression::StringLiteral(s) => write!(f, "\"{s}\""),
            Expression::Boolean(b) => write!(f, "{b}"),
            Expression::ArrayLiteral(elements) => {
                f.write_str("[")?;
                write_joined(f, elements, ", ")?;
                f.write_str("]")
            }
            Expression::Prefix { operator, operand } => write!(f, "({operator}{operand})"),
            Expression::Infix {
                operator,
                left,
                right,
            } => write!(f, "({left} {operator} {right})"),
            Expression::If(if_expr) => write!(f, "{if_expr}"),
            Expression::Function(func) => write!(f, "{func}"),
            Expression::Call {
                function,
                arguments,
            } => {
                write!(f, "{function}(")?;
                write_joined(f, arguments, ", ")?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for IfExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if ({}) {}", self.condition, self.consequence)?;
        if let Some(alternative) = &self.alternative {
            write!(f, " else {alternative}")?;
        }
        Ok(())
    }
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("fn(")?;
        write_joined(f, &self.parameters, ", ")?;
        write!(f, ") {}", self.body)
    }
}
