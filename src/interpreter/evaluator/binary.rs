use crate::{
    ast::BinaryOperator,
    error::EvalError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
    rates::lookup::RateLookup,
};

impl<R: RateLookup + ?Sized> Evaluator<'_, R> {
    /// Applies a binary operator to two evaluated operands.
    ///
    /// The result type depends on the operator:
    /// - `+`/`-` with a percentage on the right scale the left side:
    ///   `$100 + 15%` is `$115.00`.
    /// - `*` and `/` let a plain number or a percentage take the other
    ///   side's type: `2 * 5 km` is `10 km`, `$80 * 25%` is `$20.00`.
    ///   Two typed operands give a plain number.
    /// - `mod` and `^` always give a plain number: `5 km ^ 2` is `25`.
    /// - `+`/`-` keep a shared type, convert the right side into the left's
    ///   currency or unit when they differ, and otherwise fall back to a
    ///   plain number.
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    ///
    /// use tally::{
    ///     ast::BinaryOperator,
    ///     interpreter::{
    ///         context::Context, evaluator::core::Evaluator,
    ///         value::{core::Value, currency::Currency},
    ///     },
    ///     rates::cache::RateCache,
    /// };
    ///
    /// let rates = Arc::new(RateCache::empty());
    /// let context = Context::new(Arc::clone(&rates));
    /// let evaluator = Evaluator::new(&context, rates.as_ref());
    ///
    /// let price = Value::currency(100.0, Currency::usd());
    /// let tip = Value::Percentage(0.15);
    /// let total = evaluator.apply(BinaryOperator::Add, &price, &tip).unwrap();
    /// assert_eq!(total.to_string(), "$115.00");
    /// ```
    pub fn apply(&self, op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        for operand in [left, right] {
            if let Some(err) = operand.as_error() {
                return Err(err.clone());
            }
        }

        match op {
            BinaryOperator::Add | BinaryOperator::Sub if right.is_percentage() => {
                Ok(Self::apply_percentage(op, left, right.amount()))
            },
            BinaryOperator::Add | BinaryOperator::Sub => self.apply_additive(op, left, right),
            BinaryOperator::Mul | BinaryOperator::Div => {
                let result = Self::arithmetic(op, left.amount(), right.amount())?;
                Ok(scaled_type(left, right).with_amount(result))
            },
            BinaryOperator::Mod | BinaryOperator::Pow => {
                Self::arithmetic(op, left.amount(), right.amount()).map(Value::Number)
            },
        }
    }

    /// `base ± pct` is `base × (1 ± pct)`, in the base's type.
    fn apply_percentage(op: BinaryOperator, base: &Value, pct: f64) -> Value {
        let factor = if op == BinaryOperator::Add { 1.0 + pct } else { 1.0 - pct };
        base.with_amount(base.amount() * factor)
    }

    fn apply_additive(&self, op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        let combine = |l: f64, r: f64| if op == BinaryOperator::Add { l + r } else { l - r };

        if left.kind() == right.kind() && left.code() == right.code() {
            return Ok(left.with_amount(combine(left.amount(), right.amount())));
        }
        if left.is_number() {
            return Ok(right.with_amount(combine(left.amount(), right.amount())));
        }
        if right.is_number() {
            return Ok(left.with_amount(combine(left.amount(), right.amount())));
        }

        let converted = match (left, right) {
            (Value::WithUnit { unit: to, .. }, Value::WithUnit { amount, unit: from }) => {
                from.convert_to(*amount, to)
                    .ok_or_else(|| EvalError::type_mismatch("incompatible units"))?
            },
            (Value::Currency { currency: to, .. }, Value::Currency { amount, currency: from }) => {
                self.convert_amount(*amount, from.code, to.code)?
            },
            (Value::Crypto { crypto: to, .. }, Value::Crypto { amount, crypto: from }) => {
                self.convert_amount(*amount, from.code, to.code)?
            },
            (Value::Metal { metal: to, .. }, Value::Metal { amount, metal: from }) => {
                self.convert_amount(*amount, from.code, to.code)?
            },
            _ => return Ok(Value::Number(combine(left.amount(), right.amount()))),
        };

        Ok(left.with_amount(combine(left.amount(), converted)))
    }

    fn convert_amount(&self, amount: f64, from: &str, to: &str) -> EvalResult<f64> {
        self.rates
            .convert(amount, from, to)
            .ok_or_else(|| EvalError::conversion(format!("no exchange rate from {from} to {to}")))
    }

    /// Computes `l op r` on raw amounts, rejecting a zero divisor.
    pub(super) fn arithmetic(op: BinaryOperator, l: f64, r: f64) -> EvalResult<f64> {
        match op {
            BinaryOperator::Add => Ok(l + r),
            BinaryOperator::Sub => Ok(l - r),
            BinaryOperator::Mul => Ok(l * r),
            BinaryOperator::Div if r == 0.0 => Err(EvalError::DivisionByZero),
            BinaryOperator::Div => Ok(l / r),
            BinaryOperator::Mod if r == 0.0 => Err(EvalError::ModuloByZero),
            BinaryOperator::Mod => Ok(l % r),
            BinaryOperator::Pow => Ok(l.powf(r)),
        }
    }
}

/// Picks the operand whose type a scaling operation keeps.
///
/// A percentage scales whatever is on the other side. A plain number takes
/// the other side's type. Anything else is a plain number.
fn scaled_type<'v>(left: &'v Value, right: &'v Value) -> &'v Value {
    const PLAIN: &Value = &Value::Number(0.0);

    match (left, right) {
        (Value::Percentage(_), Value::Percentage(_)) => PLAIN,
        (_, Value::Percentage(_)) => left,
        (Value::Percentage(_), _) => right,
        (_, Value::Number(_)) => left,
        (Value::Number(_), _) => right,
        _ => PLAIN,
    }
}
