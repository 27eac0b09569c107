use std::{collections::HashMap, sync::Arc};

use tracing::{debug, info, warn};

use crate::{
    config::EngineConfig,
    error::{CacheError, ConfigError, EvalError, FetchError},
    interpreter::{
        context::{Context, LineResult, Snapshot},
        evaluator::core::Evaluator,
        parser::parse_line,
        value::core::Value,
    },
    rates::{
        cache::RateCache,
        provider::{RateCategory, RateProvider},
    },
};

/// The calculator.
///
/// An engine owns one session and evaluates lines against it. Variables,
/// the previous result and the line history carry over from one call to
/// the next. Rates live in a [`RateCache`] shared with every clone.
///
/// # Example
/// ```
/// use tally::engine::Engine;
///
/// let engine = Engine::new();
///
/// assert_eq!(engine.eval("price = $100").to_string(), "$100.00");
/// assert_eq!(engine.eval("price + 15%").to_string(), "$115.00");
/// assert_eq!(engine.eval("20% of 150").to_string(), "30");
/// assert_eq!(engine.eval("5 km * 2").to_string(), "10 km");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    context: Context,
}

impl Engine {
    /// Creates an engine with default settings and the built-in fallback
    /// rates. Nothing is read from disk.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine over an existing rate cache.
    #[must_use]
    pub fn with_rate_cache(rates: Arc<RateCache>) -> Self {
        Self { context: Context::new(rates) }
    }

    /// Creates an engine from configuration.
    pub fn with_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let engine = Self::with_rate_cache(Arc::new(config.rate_cache()));
        engine.set_precision(i64::from(config.precision))?;
        engine.set_strict(config.strict);
        Ok(engine)
    }

    /// Evaluates one line and records it in the session.
    ///
    /// Blank lines and comment lines give [`Value::Empty`] and are not
    /// recorded. A line that does not parse gives an error carrying the
    /// first parser message and is not recorded either.
    ///
    /// # Example
    /// ```
    /// use tally::engine::Engine;
    ///
    /// let engine = Engine::new();
    /// assert!(engine.eval("# groceries").is_empty());
    /// assert_eq!(engine.eval("(1 + 2").to_string(), "Error: expected ')' after expression");
    /// assert!(engine.lines().is_empty());
    /// ```
    pub fn eval(&self, line: &str) -> Value {
        Self::eval_in(&self.context, line)
    }

    /// Evaluates a line on a copy of the session. Nothing is recorded.
    #[must_use]
    pub fn eval_preview(&self, line: &str) -> Value {
        Self::eval_in(&self.context.clone(), line)
    }

    /// Evaluates every line of `source`, in order.
    pub fn eval_lines(&self, source: &str) -> Vec<Value> {
        source.split('\n').map(|line| self.eval(line)).collect()
    }

    /// Evaluates one line on a fresh engine.
    #[must_use]
    pub fn quick_eval(line: &str) -> Value {
        Self::new().eval(line)
    }

    fn eval_in(context: &Context, line: &str) -> Value {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            return Value::Empty;
        }

        let (parsed, errors) = parse_line(line);
        if let Some(first) = errors.first() {
            debug!(line, errors = errors.len(), "line rejected by parser");
            return Value::Error(EvalError::parse(first.to_string()));
        }

        Evaluator::new(context, context.rate_cache().as_ref()).eval_line(&parsed)
    }

    /// Formats a value with the session's display precision.
    #[must_use]
    pub fn format(&self, value: &Value) -> String {
        value.format_with_precision(self.context.precision())
    }

    /// Forgets variables, the previous result and the history. Rates are
    /// kept.
    pub fn clear(&self) {
        self.context.clear();
    }

    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.context
    }

    #[must_use]
    pub fn variables(&self) -> HashMap<String, Value> {
        self.context.variables()
    }

    #[must_use]
    pub fn variable(&self, name: &str) -> Option<Value> {
        self.context.get_variable(name)
    }

    pub fn set_variable(&self, name: &str, value: Value) {
        self.context.set_variable(name, value);
    }

    pub fn delete_variable(&self, name: &str) -> Option<Value> {
        self.context.delete_variable(name)
    }

    #[must_use]
    pub fn lines(&self) -> Vec<LineResult> {
        self.context.lines()
    }

    /// Sum of every line not consumed by a continuation.
    #[must_use]
    pub fn total(&self) -> Value {
        self.context.total()
    }

    /// Totals per currency and unit type. See [`Context::grouped_totals`].
    #[must_use]
    pub fn grouped_totals(&self) -> Vec<Value> {
        self.context.grouped_totals()
    }

    #[must_use]
    pub fn previous(&self) -> Value {
        self.context.previous()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.context.snapshot()
    }

    #[must_use]
    pub fn precision(&self) -> u8 {
        self.context.precision()
    }

    /// Sets the display precision, rejecting values outside `0..=15`.
    pub fn set_precision(&self, precision: i64) -> Result<(), ConfigError> {
        self.context.set_precision(precision)
    }

    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.context.is_strict()
    }

    pub fn set_strict(&self, strict: bool) {
        self.context.set_strict(strict);
    }

    /// The rate cache shared by this engine and its clones.
    #[must_use]
    pub const fn rate_cache(&self) -> &Arc<RateCache> {
        self.context.rate_cache()
    }

    /// Stores `1 from = rate to` and its reciprocal.
    pub fn set_rate(&self, from: &str, to: &str, rate: f64) {
        self.rate_cache().set_rate(from, to, rate);
    }

    #[must_use]
    pub fn get_rate(&self, from: &str, to: &str) -> Option<f64> {
        self.rate_cache().get_rate(from, to)
    }

    /// Applies raw provider rates. See [`RateCache::apply_raw_rates`].
    pub fn apply_raw_rates(&self, rates: &HashMap<String, f64>) {
        self.rate_cache().apply_raw_rates(rates);
    }

    /// Writes the rates to the cache file.
    pub fn save_rates(&self) -> Result<(), CacheError> {
        self.rate_cache().save_to_file()
    }

    /// Reads the rates from the cache file.
    pub fn load_rates(&self) -> Result<(), CacheError> {
        self.rate_cache().load_from_file()
    }

    /// Fetches every category `provider` supports and applies the results.
    ///
    /// A failed category leaves the cache untouched for that category and
    /// does not stop the others. Returns the failures.
    pub fn refresh_rates(&self, provider: &(impl RateProvider + ?Sized)) -> Vec<FetchError> {
        let mut failures = Vec::new();

        for category in RateCategory::ALL {
            if !provider.supports(category) {
                continue;
            }
            match provider.fetch(category) {
                Ok(rates) => {
                    info!(provider = provider.name(), %category, count = rates.len(), "fetched rates");
                    self.apply_raw_rates(&rates);
                },
                Err(err) => {
                    warn!(provider = provider.name(), %category, %err, "rate fetch failed");
                    failures.push(err);
                },
            }
        }

        failures
    }
}
