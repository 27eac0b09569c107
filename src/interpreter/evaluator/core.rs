use crate::{
    ast::{Expr, Line, Statement},
    error::EvalError,
    interpreter::{
        context::{Context, LineResult},
        value::core::Value,
    },
    rates::{cache::RateCache, lookup::RateLookup},
};

/// Result type used by the evaluator.
///
/// Evaluation functions return either a value or the [`EvalError`] that
/// stopped them. The error becomes a [`Value::Error`] at the line level.
pub type EvalResult<T> = Result<T, EvalError>;

/// Evaluates lines against a session.
///
/// The evaluator borrows the session [`Context`] it reads and updates and a
/// rate source it converts through. It holds no state of its own, so one
/// can be created per line.
///
/// ## Usage
///
/// ```
/// use std::sync::Arc;
///
/// use tally::{
///     interpreter::{context::Context, evaluator::core::Evaluator, parser::parse_line},
///     rates::cache::RateCache,
/// };
///
/// let rates = Arc::new(RateCache::empty());
/// let context = Context::new(Arc::clone(&rates));
/// let evaluator = Evaluator::new(&context, rates.as_ref());
///
/// let (line, _) = parse_line("2 + 3 * 4");
/// assert_eq!(evaluator.eval_line(&line).to_string(), "14");
///
/// let (line, _) = parse_line("* 2");
/// assert_eq!(evaluator.eval_line(&line).to_string(), "28");
/// ```
pub struct Evaluator<'a, R: RateLookup + ?Sized = RateCache> {
    pub(super) context: &'a Context,
    pub(super) rates:   &'a R,
}

impl<'a, R: RateLookup + ?Sized> Evaluator<'a, R> {
    /// Creates an evaluator over `context`, converting through `rates`.
    #[must_use]
    pub const fn new(context: &'a Context, rates: &'a R) -> Self {
        Self { context, rates }
    }

    /// The session this evaluator updates.
    #[must_use]
    pub const fn context(&self) -> &'a Context {
        self.context
    }

    /// Evaluates a parsed line and records it in the session.
    ///
    /// Every line is appended to the history. A continuation marks the
    /// most recent usable line as consumed before it is appended. The
    /// result becomes the previous value when it is neither empty nor an
    /// error.
    pub fn eval_line(&self, line: &Line) -> Value {
        let value = self.eval_statement(&line.statement);

        let mut result = LineResult::new(line.raw.clone(), value.clone());
        match &line.statement {
            Statement::Expression(Expr::Continuation { .. } | Expr::ConversionContinuation { .. }) => {
                result.continuation = true;
                self.context.mark_last_consumed();
            },
            Statement::Assignment { name, .. } => result.assigned = Some(name.clone()),
            _ => {},
        }

        self.context.add_line_result(result);
        self.context.set_previous(value.clone());

        value
    }

    /// Evaluates a statement without recording it.
    ///
    /// Assignments store their value unless it is an error; reserved names
    /// (`_`, `ans`, `total`) are never stored.
    pub fn eval_statement(&self, statement: &Statement) -> Value {
        match statement {
            Statement::Empty | Statement::Comment(_) => Value::Empty,
            Statement::Expression(expr) => self.evaluate(expr),
            Statement::Assignment { name, expr } => {
                let value = self.evaluate(expr);
                if !value.is_error() {
                    self.context.set_variable(name, value.clone());
                }
                value
            },
        }
    }

    /// Evaluates an expression, folding any failure into [`Value::Error`].
    pub fn evaluate(&self, expr: &Expr) -> Value {
        self.eval(expr).unwrap_or_else(Value::Error)
    }

    /// Evaluates an expression.
    ///
    /// Operands are evaluated left to right and the first error stops
    /// evaluation.
    pub fn eval(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::NumberLit { value, .. } => Ok(Value::Number(*value)),
            Expr::PercentLit { value, .. } => Ok(Value::Percentage(*value)),
            Expr::CurrencyLit { amount, currency, .. } => Ok(Value::currency(*amount, *currency)),
            Expr::UnitLit { amount, unit, .. } => Ok(Value::unit(*amount, *unit)),
            Expr::MetalLit { amount, metal, .. } => Ok(Value::metal(*amount, *metal)),
            Expr::CryptoLit { amount, crypto, .. } => Ok(Value::crypto(*amount, *crypto)),
            Expr::Identifier { name } => self.eval_identifier(name),
            Expr::Binary { left, op, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                self.apply(*op, &left, &right)
            },
            Expr::Unary { op, expr } => self.eval_unary(*op, expr),
            Expr::PercentOf { percent, value } => self.eval_percent_of(percent, value),
            Expr::Conversion { expr, target } => {
                let value = self.eval(expr)?;
                self.convert(&value, target)
            },
            Expr::Call { name, args } => self.eval_call(name, args),
            Expr::Group { expr } => self.eval(expr),
            Expr::Continuation { op, expr } => self.eval_continuation(*op, expr),
            Expr::ConversionContinuation { target } => self.eval_conversion_continuation(target),
        }
    }

    /// Resolves a name through the session.
    ///
    /// Unknown names are zero, or an error in strict mode.
    fn eval_identifier(&self, name: &str) -> EvalResult<Value> {
        match self.context.get_variable(name) {
            Some(value) => value.as_error().cloned().map_or(Ok(value), Err),
            None if self.context.is_strict() => Err(EvalError::undefined_variable(name)),
            None => Ok(Value::Number(0.0)),
        }
    }
}
