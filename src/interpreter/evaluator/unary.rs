use crate::{
    ast::{Expr, UnaryOperator},
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
    rates::lookup::RateLookup,
};

impl<R: RateLookup + ?Sized> Evaluator<'_, R> {
    /// Evaluates a prefix operator.
    ///
    /// `-` negates the amount and keeps the type; `+` changes nothing.
    pub(super) fn eval_unary(&self, op: UnaryOperator, expr: &Expr) -> EvalResult<Value> {
        let value = self.eval(expr)?;

        match op {
            UnaryOperator::Negate => Ok(value.negate()),
            UnaryOperator::Plus => Ok(value),
        }
    }

    /// Evaluates `PERCENT of VALUE`.
    ///
    /// The result keeps the value's type: `20% of $150` is `$30.00`. A left
    /// side that is not a percentage is read as a whole number of percent.
    pub(super) fn eval_percent_of(&self, percent: &Expr, value: &Expr) -> EvalResult<Value> {
        let percent = self.eval(percent)?;
        let value = self.eval(value)?;

        let fraction = match percent {
            Value::Percentage(p) => p,
            other => other.amount() / 100.0,
        };

        Ok(value.with_amount(value.amount() * fraction))
    }
}
