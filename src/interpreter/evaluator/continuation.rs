use crate::{
    ast::{BinaryOperator, Expr},
    error::EvalError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
    rates::lookup::RateLookup,
};

impl<R: RateLookup + ?Sized> Evaluator<'_, R> {
    /// Evaluates a line such as `+ 10` against the previous result.
    ///
    /// Without a previous result the operand is evaluated on its own.
    pub(super) fn eval_continuation(&self, op: BinaryOperator, expr: &Expr) -> EvalResult<Value> {
        if !self.context.has_previous() {
            return self.eval(expr);
        }

        let previous = self.context.previous();
        let right = self.eval(expr)?;
        self.apply(op, &previous, &right)
    }

    /// Evaluates a line such as `in EUR` against the previous result.
    pub(super) fn eval_conversion_continuation(&self, target: &str) -> EvalResult<Value> {
        if !self.context.has_previous() {
            return Err(EvalError::evaluation("no previous value to convert"));
        }

        self.convert(&self.context.previous(), target)
    }
}
