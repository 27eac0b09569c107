use crate::{interpreter::value::core::Value, rates::cache::RateCache};

/// The rate queries the evaluator needs.
///
/// The evaluator depends on this trait rather than on [`RateCache`], so a
/// session can be evaluated against any rate source.
pub trait RateLookup {
    /// The rate from one code to another, if one is known.
    fn get_rate(&self, from: &str, to: &str) -> Option<f64>;

    /// Converts `amount` of `from` into `to`.
    fn convert(&self, amount: f64, from: &str, to: &str) -> Option<f64> {
        self.get_rate(from, to).map(|rate| amount * rate)
    }

    /// Converts a currency, crypto or metal value into `target`.
    fn convert_value(&self, value: &Value, target: &str) -> Option<Value>;
}

impl RateLookup for RateCache {
    fn get_rate(&self, from: &str, to: &str) -> Option<f64> {
        Self::get_rate(self, from, to)
    }

    fn convert(&self, amount: f64, from: &str, to: &str) -> Option<f64> {
        Self::convert(self, amount, from, to)
    }

    fn convert_value(&self, value: &Value, target: &str) -> Option<Value> {
        Self::convert_value(self, value, target)
    }
}
