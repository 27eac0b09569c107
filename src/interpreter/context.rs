use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use parking_lot::RwLock;

use crate::{
    error::ConfigError,
    interpreter::value::{
        core::Value,
        currency::Currency,
        unit::{Unit, UnitType},
    },
    rates::cache::{BASE_CURRENCY, RateCache},
    util::num::MAX_PRECISION,
};

/// Display precision of a new session.
pub const DEFAULT_PRECISION: u8 = 2;

/// Names that always refer to the previous result.
const PREVIOUS_NAMES: [&str; 2] = ["_", "ans"];

/// The name of the running total.
const TOTAL_NAME: &str = "total";

/// The outcome of one evaluated line, as kept in the session history.
#[derive(Debug, Clone, PartialEq)]
pub struct LineResult {
    /// The input as typed.
    pub raw:          String,
    pub value:        Value,
    /// Set when a later continuation line folded this result into its own.
    pub consumed:     bool,
    /// Whether the line was a continuation (`+ 10`, `in EUR`).
    pub continuation: bool,
    /// The variable the line assigned, if any.
    pub assigned:     Option<String>,
}

impl LineResult {
    /// Creates an unconsumed, non-continuation result.
    #[must_use]
    pub fn new(raw: impl Into<String>, value: Value) -> Self {
        Self { raw: raw.into(),
               value,
               consumed: false,
               continuation: false,
               assigned: None }
    }

    /// Returns `true` if the line produced a usable value.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        !self.value.is_empty() && !self.value.is_error()
    }
}

/// A read-only copy of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub variables: HashMap<String, Value>,
    pub previous:  Value,
    pub lines:     Vec<LineResult>,
    pub total:     Value,
}

#[derive(Debug, Clone)]
struct Session {
    variables: HashMap<String, Value>,
    previous:  Value,
    lines:     Vec<LineResult>,
    precision: u8,
    strict:    bool,
}

impl Default for Session {
    fn default() -> Self {
        Self { variables: HashMap::new(),
               previous:  Value::Empty,
               lines:     Vec::new(),
               precision: DEFAULT_PRECISION,
               strict:    false, }
    }
}

impl Session {
    fn total(&self) -> Value {
        let sum = self.lines
                      .iter()
                      .filter(|line| !line.consumed && line.value.is_numeric())
                      .map(|line| line.value.amount())
                      .sum();
        Value::Number(sum)
    }
}

/// Stores the state of a calculation session.
///
/// A context holds user variables, the previous result (`_` / `ans`), the
/// history of evaluated lines and display settings, all behind one lock.
/// It shares its [`RateCache`] with every clone.
///
/// ## Usage
///
/// One context lives as long as a document or a session. The evaluator
/// reads and updates it line by line; [`Context::clear`] starts over
/// without touching the rates.
#[derive(Debug)]
pub struct Context {
    state: RwLock<Session>,
    rates: Arc<RateCache>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new(Arc::new(RateCache::new()))
    }
}

impl Clone for Context {
    /// Copies variables, history and settings. The rate cache is shared.
    fn clone(&self) -> Self {
        Self { state: RwLock::new(self.state.read().clone()),
               rates: Arc::clone(&self.rates), }
    }
}

impl Context {
    /// Creates an empty session over `rates`.
    #[must_use]
    pub fn new(rates: Arc<RateCache>) -> Self {
        Self { state: RwLock::new(Session::default()),
               rates }
    }

    /// The shared rate cache.
    #[must_use]
    pub const fn rate_cache(&self) -> &Arc<RateCache> {
        &self.rates
    }

    /// Resolves a name.
    ///
    /// `_` and `ans` give the previous result, `total` the running total.
    /// Other names are looked up exactly, then in lower case.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<Value> {
        let state = self.state.read();
        let lower = name.to_lowercase();

        if PREVIOUS_NAMES.contains(&lower.as_str()) {
            return (!state.previous.is_empty()).then(|| state.previous.clone());
        }
        if lower == TOTAL_NAME {
            return Some(state.total());
        }

        state.variables
             .get(name)
             .or_else(|| state.variables.get(&lower))
             .cloned()
    }

    /// Stores a variable. `_`, `ans` and `total` are reserved and silently
    /// ignored.
    pub fn set_variable(&self, name: &str, value: Value) {
        if is_reserved(name) {
            return;
        }
        self.state.write().variables.insert(name.to_string(), value);
    }

    /// Removes a variable, returning its value.
    pub fn delete_variable(&self, name: &str) -> Option<Value> {
        self.state.write().variables.remove(name)
    }

    /// Returns `true` if `name` resolves to a value.
    #[must_use]
    pub fn has_variable(&self, name: &str) -> bool {
        self.get_variable(name).is_some()
    }

    /// A copy of every user variable.
    #[must_use]
    pub fn variables(&self) -> HashMap<String, Value> {
        self.state.read().variables.clone()
    }

    /// The names of every user variable, sorted.
    #[must_use]
    pub fn variable_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.state.read().variables.keys().cloned().collect();
        names.sort();
        names
    }

    #[must_use]
    pub fn previous(&self) -> Value {
        self.state.read().previous.clone()
    }

    /// Remembers `value` as the previous result. Empty values and errors
    /// are ignored.
    pub fn set_previous(&self, value: Value) {
        if value.is_empty() || value.is_error() {
            return;
        }
        self.state.write().previous = value;
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        let state = self.state.read();
        !state.previous.is_empty() && !state.previous.is_error()
    }

    /// Appends a line to the history.
    pub fn add_line_result(&self, result: LineResult) {
        self.state.write().lines.push(result);
    }

    /// A copy of the history.
    #[must_use]
    pub fn lines(&self) -> Vec<LineResult> {
        self.state.read().lines.clone()
    }

    /// Marks the most recent line with a usable value as consumed.
    pub fn mark_last_consumed(&self) {
        if let Some(line) = self.state
                                .write()
                                .lines
                                .iter_mut()
                                .rev()
                                .find(|line| line.is_valid())
        {
            line.consumed = true;
        }
    }

    /// Sum of the amounts of every unconsumed line, as a plain number.
    #[must_use]
    pub fn total(&self) -> Value {
        self.state.read().total()
    }

    /// Totals grouped by kind.
    ///
    /// Currency and crypto lines are summed in dollars and reported in the
    /// last fiat currency used. Measurements are summed per unit type in the
    /// last unit used for that type, ordered by type. A non-zero sum of
    /// plain numbers comes last.
    #[must_use]
    pub fn grouped_totals(&self) -> Vec<Value> {
        let state = self.state.read();

        let mut money: Option<f64> = None;
        let mut last_currency: Option<&'static Currency> = None;
        let mut measures: BTreeMap<UnitType, Vec<(f64, &'static Unit)>> = BTreeMap::new();
        let mut plain = 0.0;

        for line in state.lines.iter().filter(|line| !line.consumed) {
            match &line.value {
                Value::Currency { amount, currency } => {
                    if let Some(usd) = self.rates.convert(*amount, currency.code, BASE_CURRENCY) {
                        *money.get_or_insert(0.0) += usd;
                    }
                    last_currency = Some(*currency);
                },
                Value::Crypto { amount, crypto } => {
                    if let Some(usd) = self.rates.convert(*amount, crypto.code, BASE_CURRENCY) {
                        *money.get_or_insert(0.0) += usd;
                    }
                },
                Value::WithUnit { amount, unit } => {
                    measures.entry(unit.kind).or_default().push((*amount, *unit));
                },
                Value::Number(n) => plain += n,
                _ => {},
            }
        }

        let mut totals = Vec::new();

        if let Some(usd) = money {
            let total = last_currency.and_then(|currency| {
                                         self.rates
                                             .convert(usd, BASE_CURRENCY, currency.code)
                                             .map(|amount| Value::currency(amount, currency))
                                     })
                                     .unwrap_or_else(|| Value::currency(usd, Currency::usd()));
            totals.push(total);
        }

        for entries in measures.values() {
            let Some(&(_, last)) = entries.last() else {
                continue;
            };
            let sum = entries.iter()
                             .filter_map(|(amount, unit)| unit.convert_to(*amount, last))
                             .sum();
            totals.push(Value::unit(sum, last));
        }

        if plain != 0.0 {
            totals.push(Value::Number(plain));
        }

        totals
    }

    #[must_use]
    pub fn precision(&self) -> u8 {
        self.state.read().precision
    }

    /// Sets the display precision.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidPrecision`] outside `0..=15`; the
    /// precision is left unchanged.
    pub fn set_precision(&self, precision: i64) -> Result<(), ConfigError> {
        let precision = u8::try_from(precision).ok()
                                               .filter(|p| *p <= MAX_PRECISION)
                                               .ok_or(ConfigError::InvalidPrecision { value: precision,
                                                                                      max:   MAX_PRECISION, })?;
        self.state.write().precision = precision;
        Ok(())
    }

    /// Returns `true` if undefined names are errors rather than zero.
    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.state.read().strict
    }

    pub fn set_strict(&self, strict: bool) {
        self.state.write().strict = strict;
    }

    /// Forgets variables, the previous result and the history. Settings and
    /// rates are kept.
    pub fn clear(&self) {
        let mut state = self.state.write();
        state.variables.clear();
        state.previous = Value::Empty;
        state.lines.clear();
    }

    /// Copies the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let state = self.state.read();
        Snapshot { variables: state.variables.clone(),
                   previous:  state.previous.clone(),
                   lines:     state.lines.clone(),
                   total:     state.total(), }
    }
}

/// Returns `true` for names that cannot be assigned.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    let lower = name.to_lowercase();
    PREVIOUS_NAMES.contains(&lower.as_str()) || lower == TOTAL_NAME
}
