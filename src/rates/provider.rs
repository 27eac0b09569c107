use std::{collections::HashMap, fmt};

use crate::error::FetchError;

/// A group of rates fetched together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateCategory {
    /// Fiat currencies, quoted as `1 USD = rate CODE`.
    Fiat,
    /// Cryptocurrencies, quoted as `1 CODE = rate USD`.
    Crypto,
    /// Metals, quoted as `1 CODE = rate USD`.
    Metals,
}

impl RateCategory {
    /// Every category, in refresh order.
    pub const ALL: [Self; 3] = [Self::Fiat, Self::Crypto, Self::Metals];
}

impl fmt::Display for RateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fiat => "fiat",
            Self::Crypto => "crypto",
            Self::Metals => "metals",
        };
        f.write_str(name)
    }
}

/// A source of raw rates, such as a market data API.
///
/// Implementations do their own transport. The returned map uses the
/// quoting convention of the category and is fed to
/// [`RateCache::apply_raw_rates`] unchanged.
///
/// [`RateCache::apply_raw_rates`]: crate::rates::cache::RateCache::apply_raw_rates
pub trait RateProvider {
    /// A short name used in logs and errors.
    fn name(&self) -> &str;

    /// Whether this provider serves `category`. Defaults to every category.
    fn supports(&self, category: RateCategory) -> bool {
        let _ = category;
        true
    }

    /// Fetches the current rates of one category.
    fn fetch(&self, category: RateCategory) -> Result<HashMap<String, f64>, FetchError>;
}
