use std::{
    collections::{BTreeMap, HashMap, HashSet, VecDeque},
    path::{Path, PathBuf},
    time::Duration,
};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, info, trace};

use crate::{
    interpreter::value::{
        core::Value,
        crypto::Crypto,
        currency::Currency,
        metal::Metal,
    },
    rates::{
        defaults,
        persist::{CACHE_FILE_NAME, default_cache_dir},
    },
};

/// How long fetched rates stay fresh unless configured otherwise.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// The code every raw rate is quoted against.
pub const BASE_CURRENCY: &str = "USD";

/// A thread-safe store of exchange rates.
///
/// Rates form a graph keyed by upper-cased codes. Storing `A → B` also
/// stores `B → A` as the reciprocal, and a missing pair is resolved by a
/// breadth-first search over the graph. One timestamp and one TTL govern
/// the freshness of the whole cache.
///
/// Every operation takes the lock once for its whole duration. File I/O
/// happens outside the lock.
///
/// # Example
/// ```
/// use tally::rates::cache::RateCache;
///
/// let rates = RateCache::empty();
/// rates.set_rate("EUR", "USD", 1.1);
/// rates.set_rate("USD", "JPY", 150.0);
///
/// assert_eq!(rates.get_rate("eur", "usd"), Some(1.1));
/// assert!((rates.get_rate("EUR", "JPY").unwrap() - 165.0).abs() < 1e-9);
/// assert_eq!(rates.get_rate("EUR", "BTC"), None);
/// ```
#[derive(Debug)]
pub struct RateCache {
    pub(super) table:      RwLock<RateTable>,
    pub(super) ttl:        Duration,
    pub(super) cache_file: Option<PathBuf>,
}

/// The state guarded by the cache's lock.
#[derive(Debug, Default)]
pub(super) struct RateTable {
    /// `from → (to → rate)`. Sorted so path search is deterministic.
    pub(super) adjacency:   BTreeMap<String, BTreeMap<String, f64>>,
    /// Rates as last received, kept for persistence.
    pub(super) raw:         HashMap<String, f64>,
    pub(super) last_update: Option<DateTime<Utc>>,
}

/// A point-in-time summary of a [`RateCache`].
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    /// Number of stored directed pairs.
    pub direct_rates:   usize,
    pub last_update:    Option<DateTime<Utc>>,
    /// Time since the last update; zero when never updated.
    pub age:            Duration,
    pub expired:        bool,
    pub cache_file:     Option<PathBuf>,
    /// Whether the cache file exists on disk.
    pub has_file_cache: bool,
}

impl RateTable {
    fn insert(&mut self, from: String, to: String, rate: f64) {
        if from == to {
            return;
        }
        if rate != 0.0 {
            self.adjacency
                .entry(to.clone())
                .or_default()
                .insert(from.clone(), 1.0 / rate);
        }
        self.adjacency.entry(from).or_default().insert(to, rate);
    }

    fn direct(&self, from: &str, to: &str) -> Option<f64> {
        self.adjacency.get(from)?.get(to).copied()
    }

    /// Breadth-first search from `from` to `to`, multiplying rates along the
    /// way. Returns the product over the path with the fewest hops; ties go
    /// to the alphabetically first neighbour.
    fn find_path(&self, from: &str, to: &str) -> Option<f64> {
        let mut visited: HashSet<&str> = HashSet::from([from]);
        let mut queue: VecDeque<(&str, f64, usize)> = VecDeque::from([(from, 1.0, 0)]);

        while let Some((code, acc, hops)) = queue.pop_front() {
            let Some(neighbours) = self.adjacency.get(code) else {
                continue;
            };
            for (next, rate) in neighbours {
                let next = next.as_str();
                let acc = acc * rate;
                if next == to {
                    trace!(from, to, hops = hops + 1, rate = acc, "rate found by path search");
                    return Some(acc);
                }
                if visited.insert(next) {
                    queue.push_back((next, acc, hops + 1));
                }
            }
        }

        None
    }

    fn lookup(&self, from: &str, to: &str) -> Option<f64> {
        if from == to {
            return Some(1.0);
        }
        self.direct(from, to).or_else(|| self.find_path(from, to))
    }

    fn direct_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }

    /// Stores raw rates relative to the base currency.
    ///
    /// Crypto and metal codes are priced in dollars (`1 CODE = rate USD`);
    /// everything else is a fiat quote (`1 USD = rate CODE`).
    pub(super) fn apply_raw(&mut self, rates: &HashMap<String, f64>) {
        for (code, &rate) in rates {
            let code = code.to_uppercase();
            if is_usd_priced(&code) {
                self.insert(code.clone(), BASE_CURRENCY.to_string(), rate);
            } else {
                self.insert(BASE_CURRENCY.to_string(), code.clone(), rate);
            }
            self.raw.insert(code, rate);
        }
    }

    fn seed_defaults(&mut self) {
        for &(code, rate) in defaults::FIAT {
            self.insert(BASE_CURRENCY.to_string(), code.to_string(), rate);
        }
        for &(code, rate) in defaults::CRYPTO.iter().chain(defaults::METALS) {
            self.insert(code.to_string(), BASE_CURRENCY.to_string(), rate);
        }
    }
}

fn is_usd_priced(code: &str) -> bool {
    Crypto::is_code(code) || Metal::is_code(code)
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RateCache {
    /// Creates a cache seeded with the offline fallback rates, pointing at
    /// the default cache file. Nothing is read from disk.
    #[must_use]
    pub fn new() -> Self {
        let cache = Self::empty();
        cache.table.write().seed_defaults();
        Self { cache_file: default_cache_dir().map(|dir| dir.join(CACHE_FILE_NAME)),
               ..cache }
    }

    /// Creates a cache with no rates and no cache file.
    #[must_use]
    pub fn empty() -> Self {
        Self { table:      RwLock::new(RateTable::default()),
               ttl:        DEFAULT_TTL,
               cache_file: None, }
    }

    /// Sets how long rates stay fresh.
    #[must_use]
    pub fn with_ttl(self, ttl: Duration) -> Self {
        Self { ttl, ..self }
    }

    /// Sets the file used by [`RateCache::save_to_file`] and
    /// [`RateCache::load_from_file`].
    #[must_use]
    pub fn with_cache_file(self, path: impl Into<PathBuf>) -> Self {
        Self { cache_file: Some(path.into()),
               ..self }
    }

    /// Stores `1 from = rate to` and, for a non-zero rate, the reciprocal.
    /// Codes are upper-cased. A pair with itself is never stored.
    pub fn set_rate(&self, from: &str, to: &str, rate: f64) {
        self.table
            .write()
            .insert(from.to_uppercase(), to.to_uppercase(), rate);
    }

    /// Looks up the rate from one code to another.
    ///
    /// Identical codes give `1.0`. A stored pair is returned directly,
    /// otherwise the shortest chain of stored pairs is multiplied out.
    #[must_use]
    pub fn get_rate(&self, from: &str, to: &str) -> Option<f64> {
        let from = from.to_uppercase();
        let to = to.to_uppercase();
        self.table.read().lookup(&from, &to)
    }

    /// Returns `true` if a rate exists, directly or through a path.
    #[must_use]
    pub fn has_rate(&self, from: &str, to: &str) -> bool {
        self.get_rate(from, to).is_some()
    }

    /// Converts `amount` of `from` into `to`.
    #[must_use]
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> Option<f64> {
        self.get_rate(from, to).map(|rate| amount * rate)
    }

    /// Converts a currency, crypto or metal value into `target`.
    ///
    /// The target is resolved through the currency, crypto and metal
    /// registries and the result takes its type. Crypto and metal values
    /// converted to a bare code with no descriptor come back as a plain
    /// number. Measurements and plain values are never converted here.
    ///
    /// # Example
    /// ```
    /// use tally::{
    ///     interpreter::value::{core::Value, currency::Currency},
    ///     rates::cache::RateCache,
    /// };
    ///
    /// let rates = RateCache::empty();
    /// rates.set_rate("USD", "EUR", 0.5);
    ///
    /// let euros = rates.convert_value(&Value::currency(10.0, Currency::usd()), "eur");
    /// assert_eq!(euros.map(|v| v.to_string()), Some("€5.00".to_string()));
    /// ```
    #[must_use]
    pub fn convert_value(&self, value: &Value, target: &str) -> Option<Value> {
        let (amount, from) = match value {
            Value::Currency { amount, currency } => (*amount, currency.code),
            Value::Crypto { amount, crypto } => (*amount, crypto.code),
            Value::Metal { amount, metal } => (*amount, metal.code),
            _ => return None,
        };

        let target = target.trim();
        let currency = Currency::lookup(target);
        let crypto = Crypto::lookup(target);
        let metal = Metal::lookup(target);
        let code = currency.map(|c| c.code)
                           .or_else(|| crypto.map(|c| c.code))
                           .or_else(|| metal.map(|m| m.code))
                           .map_or_else(|| target.to_uppercase(), str::to_string);

        let converted = self.convert(amount, from, &code)?;
        debug!(from, to = %code, amount, converted, "converted value");

        match (currency, crypto, metal) {
            (Some(to), ..) => Some(Value::currency(converted, to)),
            (None, Some(to), _) => Some(Value::crypto(converted, to)),
            (None, None, Some(to)) => Some(Value::metal(converted, to)),
            (None, None, None) if value.is_currency() => None,
            (None, None, None) => Some(Value::Number(converted)),
        }
    }

    /// Applies a batch of raw rates from a provider.
    ///
    /// Crypto and metal codes are read as `1 CODE = rate USD`, fiat codes as
    /// `1 USD = rate CODE`. The batch is merged into the raw map kept for
    /// persistence and the cache is stamped as fresh.
    pub fn apply_raw_rates(&self, rates: &HashMap<String, f64>) {
        let mut table = self.table.write();
        table.apply_raw(rates);
        table.last_update = Some(Utc::now());
        info!(count = rates.len(), "applied raw rates");
    }

    /// A copy of the raw rates received so far.
    #[must_use]
    pub fn raw_rates(&self) -> HashMap<String, f64> {
        self.table.read().raw.clone()
    }

    /// Drops every rate and the timestamp.
    pub fn clear(&self) {
        *self.table.write() = RateTable::default();
    }

    /// Returns `true` when the cache was never stamped or is older than its
    /// TTL.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        let last_update = self.table.read().last_update;
        self.expired_at(last_update)
    }

    /// The inverse of [`RateCache::is_expired`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.is_expired()
    }

    /// When rates were last applied or loaded.
    #[must_use]
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.table.read().last_update
    }

    /// Time since the last update; zero when never updated.
    #[must_use]
    pub fn age(&self) -> Duration {
        age_of(self.table.read().last_update)
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The file used for persistence, if any.
    #[must_use]
    pub fn cache_file(&self) -> Option<&Path> {
        self.cache_file.as_deref()
    }

    /// Summarizes the cache.
    #[must_use]
    pub fn stats(&self) -> Stats {
        let (direct_rates, last_update) = {
            let table = self.table.read();
            (table.direct_count(), table.last_update)
        };
        let has_file_cache = self.cache_file.as_deref().is_some_and(Path::exists);

        Stats { direct_rates,
                last_update,
                age: age_of(last_update),
                expired: self.expired_at(last_update),
                cache_file: self.cache_file.clone(),
                has_file_cache }
    }

    pub(super) fn expired_at(&self, last_update: Option<DateTime<Utc>>) -> bool {
        last_update.is_none() || age_of(last_update) > self.ttl
    }
}

pub(super) fn age_of(last_update: Option<DateTime<Utc>>) -> Duration {
    last_update.and_then(|at| (Utc::now() - at).to_std().ok())
               .unwrap_or_default()
}
