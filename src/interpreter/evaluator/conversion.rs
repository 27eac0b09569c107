use tracing::debug;

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::{core::Value, crypto::Crypto, currency::Currency, metal::Metal, unit::Unit},
    },
    rates::lookup::RateLookup,
};

impl<R: RateLookup + ?Sized> Evaluator<'_, R> {
    /// Converts a value into `target`.
    ///
    /// Measurements convert between units of the same type. Currency,
    /// crypto and metal values convert through the rate source. The error
    /// explains whether the target is known but unreachable, of the wrong
    /// kind, or not a target at all.
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    ///
    /// use tally::{
    ///     interpreter::{
    ///         context::Context, evaluator::core::Evaluator,
    ///         value::{core::Value, unit::Unit},
    ///     },
    ///     rates::cache::RateCache,
    /// };
    ///
    /// let rates = Arc::new(RateCache::empty());
    /// let context = Context::new(Arc::clone(&rates));
    /// let evaluator = Evaluator::new(&context, rates.as_ref());
    ///
    /// let km = Value::unit(5.0, Unit::lookup("km").unwrap());
    /// assert_eq!(evaluator.convert(&km, "m").unwrap().to_string(), "5000 m");
    ///
    /// let err = evaluator.convert(&km, "kg").unwrap_err();
    /// assert_eq!(err.to_string(), "cannot convert km to kg");
    /// ```
    pub fn convert(&self, value: &Value, target: &str) -> EvalResult<Value> {
        if let Value::WithUnit { amount, unit } = value
           && let Some(to) = Unit::lookup(target)
        {
            let converted = unit.convert_to(*amount, to).ok_or_else(|| {
                                EvalError::conversion(format!("cannot convert {} to {target}", unit.code))
                            })?;
            debug!(from = unit.code, to = to.code, amount, converted, "converted unit");
            return Ok(Value::unit(converted, to));
        }

        if let Some(converted) = self.rates.convert_value(value, target) {
            return Ok(converted);
        }

        let message = if Currency::lookup(target).is_some()
                         || Crypto::lookup(target).is_some()
                         || Metal::lookup(target).is_some()
        {
            format!("no rate available for conversion to {target}")
        } else if Unit::lookup(target).is_some() {
            format!("cannot convert to {target} (incompatible types)")
        } else {
            format!("unknown target: {target}")
        };

        Err(EvalError::conversion(message))
    }
}
