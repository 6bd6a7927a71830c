//! Core expression and statement evaluator.

use std::io::{self, Write};
use std::rc::Rc;

use pika_stack::ensure_sufficient_stack;
use pika_types::ast::*;

use crate::builtins;
use crate::config::EvalConfig;
use crate::env::{Env, Environment};
use crate::error::RuntimeError;
use crate::object::{Function, Object, ObjectType};

/// Non-local exit from a statement sequence.
#[derive(Debug)]
enum Signal {
    /// `return` unwinding to the nearest function call or the program.
    Return(Rc<Object>),
    /// An [`Object::Error`] unwinding to the program.
    Error(Rc<Object>),
}

impl From<RuntimeError> for Signal {
    fn from(err: RuntimeError) -> Self {
        Signal::Error(Rc::new(err.into()))
    }
}

type Flow = Result<Rc<Object>, Signal>;

/// The tree-walking evaluator.
///
/// Holds what persists between programs besides bindings: configuration and
/// the sink that `print` writes to. Bindings live in the [`Env`] passed to
/// [`Evaluator::eval_program`].
pub struct Evaluator {
    config: EvalConfig,
    /// Current number of active user-function calls.
    depth: usize,
    output: Box<dyn Write>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// An evaluator with default configuration writing to stdout.
    pub fn new() -> Self {
        Self::with_config(EvalConfig::default())
    }

    pub fn with_config(config: EvalConfig) -> Self {
        Self {
            config,
            depth: 0,
            output: Box::new(io::stdout()),
        }
    }

    /// Redirect `print` output.
    pub fn with_output(mut self, output: Box<dyn Write>) -> Self {
        self.output = output;
        self
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Evaluate `program` in `env`.
    ///
    /// The result is the value of the last statement, the value of a
    /// top-level `return`, or the first runtime error.
    pub fn eval_program(&mut self, program: &Program, env: &Env) -> Rc<Object> {
        self.depth = 0;
        let result = match self.eval_statements(&program.statements, env) {
            Ok(value) | Err(Signal::Return(value)) | Err(Signal::Error(value)) => value,
        };
        if let Err(err) = self.output.flush() {
            tracing::debug!(%err, "failed to flush output");
        }
        result
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Statements
    // ══════════════════════════════════════════════════════════════════════════

    fn eval_statements(&mut self, statements: &[Statement], env: &Env) -> Flow {
        let mut result = Object::null();
        for stmt in statements {
            result = self.eval_statement(stmt, env)?;
        }
        Ok(result)
    }

    fn eval_block(&mut self, block: &BlockStatement, env: &Env) -> Flow {
        self.eval_statements(&block.statements, env)
    }

    fn eval_statement(&mut self, stmt: &Statement, env: &Env) -> Flow {
        match stmt {
            Statement::Let { name, value } => {
                let value = self.eval_expression(value, env)?;
                env.borrow_mut().set(name.name.as_str(), value);
                Ok(Object::null())
            }
            Statement::Return { value } => {
                let value = self.eval_expression(value, env)?;
                Err(Signal::Return(value))
            }
            Statement::Expression(expr) => self.eval_expression(expr, env),
        }
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Expressions
    // ══════════════════════════════════════════════════════════════════════════

    /// Every level of expression nesting passes through here, so this is
    /// where the stack is grown.
    fn eval_expression(&mut self, expr: &Expression, env: &Env) -> Flow {
        ensure_sufficient_stack(|| self.eval_expression_at(expr, env))
    }

    fn eval_expression_at(&mut self, expr: &Expression, env: &Env) -> Flow {
        match expr {
            Expression::Identifier(ident) => eval_identifier(ident, env),
            Expression::IntegerLiteral(n) => Ok(Rc::new(Object::Integer(*n))),
            Expression::StringLiteral(s) => Ok(Rc::new(Object::String(s.clone()))),
            Expression::Boolean(b) => Ok(Object::boolean(*b)),
            Expression::ArrayLiteral(elements) => {
                let elements = self.eval_expressions(elements, env)?;
                Ok(Rc::new(Object::Array(elements)))
            }
            Expression::Prefix { operator, operand } => {
                let operand = self.eval_expression(operand, env)?;
                eval_prefix(*operator, &operand)
            }
            Expression::Infix {
                operator,
                left,
                right,
            } => {
                let left = self.eval_expression(left, env)?;
                let right = self.eval_expression(right, env)?;
                eval_infix(*operator, &left, &right)
            }
            Expression::If(if_expr) => {
                let condition = self.eval_expression(&if_expr.condition, env)?;
                if condition.is_truthy() {
                    self.eval_block(&if_expr.consequence, env)
                } else if let Some(alternative) = &if_expr.alternative {
                    self.eval_block(alternative, env)
                } else {
                    Ok(Object::null())
                }
            }
            Expression::Function(literal) => Ok(Rc::new(Object::Function(Function {
                parameters: literal.parameters.clone(),
                body: Rc::clone(&literal.body),
                env: Rc::clone(env),
            }))),
            Expression::Call {
                function,
                arguments,
            } => {
                let callee = self.eval_expression(function, env)?;
                let args = self.eval_expressions(arguments, env)?;
                self.apply(&callee, args)
            }
        }
    }

    /// Evaluate left to right, stopping at the first error.
    fn eval_expressions(
        &mut self,
        exprs: &[Expression],
        env: &Env,
    ) -> Result<Vec<Rc<Object>>, Signal> {
        exprs.iter().map(|expr| self.eval_expression(expr, env)).collect()
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Calls
    // ══════════════════════════════════════════════════════════════════════════

    fn apply(&mut self, callee: &Object, args: Vec<Rc<Object>>) -> Flow {
        match callee {
            Object::Function(function) => self.apply_function(function, args),
            Object::Builtin(builtin) => Ok((builtin.func)(&args, &mut *self.output)?),
            other => Err(RuntimeError::NotAFunction(other.object_type()).into()),
        }
    }

    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(arity = args.len(), depth = self.depth, scope_depth = function.env.borrow().depth())
    )]
    fn apply_function(&mut self, function: &Function, args: Vec<Rc<Object>>) -> Flow {
        if args.len() != function.parameters.len() {
            return Err(RuntimeError::WrongArgumentCount {
                got: args.len(),
                want: function.parameters.len(),
            }
            .into());
        }
        if self.depth >= self.config.max_call_depth {
            tracing::debug!(limit = self.config.max_call_depth, "call depth limit reached");
            return Err(RuntimeError::CallDepthExceeded(self.config.max_call_depth).into());
        }

        let scope = Environment::new_enclosed(&function.env);
        {
            let mut scope = scope.borrow_mut();
            for (param, arg) in function.parameters.iter().zip(args) {
                scope.set(param.name.as_str(), arg);
            }
        }

        self.depth += 1;
        let result = self.eval_block(&function.body, &scope);
        self.depth -= 1;

        match result {
            Err(Signal::Return(value)) => Ok(value),
            other => other,
        }
    }
}

fn eval_identifier(ident: &Ident, env: &Env) -> Flow {
    let bound = env.borrow().get(&ident.name);
    if let Some(value) = bound {
        return Ok(value);
    }
    match builtins::lookup(&ident.name) {
        Some(builtin) => Ok(Rc::new(Object::Builtin(builtin))),
        None => Err(RuntimeError::IdentifierNotFound(ident.name.clone()).into()),
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Operators
// ══════════════════════════════════════════════════════════════════════════════

fn eval_prefix(operator: PrefixOperator, operand: &Rc<Object>) -> Flow {
    match (operator, operand.as_ref()) {
        (PrefixOperator::Not, _) => Ok(Object::boolean(!operand.is_truthy())),
        (PrefixOperator::Neg, Object::Integer(n)) => Ok(Rc::new(Object::Integer(n.wrapping_neg()))),
        (PrefixOperator::Neg, other) => Err(RuntimeError::UnknownPrefixOperator {
            operator,
            operand: other.object_type(),
        }
        .into()),
    }
}

fn eval_infix(operator: InfixOperator, left: &Rc<Object>, right: &Rc<Object>) -> Flow {
    match (left.as_ref(), right.as_ref()) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Object::String(l), Object::String(r)) => eval_string_infix(operator, l, r),
        (l, r) if l.object_type() != r.object_type() => Err(RuntimeError::TypeMismatch {
            left: l.object_type(),
            operator,
            right: r.object_type(),
        }
        .into()),
        (l, r) => match operator {
            InfixOperator::Eq => Ok(Object::boolean(Rc::ptr_eq(left, right))),
            InfixOperator::NotEq => Ok(Object::boolean(!Rc::ptr_eq(left, right))),
            _ => Err(RuntimeError::UnknownInfixOperator {
                left: l.object_type(),
                operator,
                right: r.object_type(),
            }
            .into()),
        },
    }
}

fn eval_integer_infix(operator: InfixOperator, l: i64, r: i64) -> Flow {
    let value = match operator {
        InfixOperator::Add => l.wrapping_add(r),
        InfixOperator::Sub => l.wrapping_sub(r),
        InfixOperator::Mul => l.wrapping_mul(r),
        InfixOperator::Div => {
            if r == 0 {
                return Err(RuntimeError::DivisionByZero.into());
            }
            l.wrapping_div(r)
        }
        InfixOperator::Less => return Ok(Object::boolean(l < r)),
        InfixOperator::Greater => return Ok(Object::boolean(l > r)),
        InfixOperator::Eq => return Ok(Object::boolean(l == r)),
        InfixOperator::NotEq => return Ok(Object::boolean(l != r)),
    };
    Ok(Rc::new(Object::Integer(value)))
}

fn eval_string_infix(operator: InfixOperator, l: &str, r: &str) -> Flow {
    match operator {
        InfixOperator::Add => Ok(Rc::new(Object::String(format!("{l}{r}")))),
        InfixOperator::Eq => Ok(Object::boolean(l == r)),
        InfixOperator::NotEq => Ok(Object::boolean(l != r)),
        _ => Err(RuntimeError::UnknownInfixOperator {
            left: ObjectType::String,
            operator,
            right: ObjectType::String,
        }
        .into()),
    }
}

/// Evaluate `program` in `env` with a default [`Evaluator`].
pub fn eval(program: &Program, env: &Env) -> Rc<Object> {
    Evaluator::new().eval_program(program, env)
}
