/// The rate store.
///
/// Declares [`RateCache`], the graph of exchange rates with path search,
/// freshness tracking and raw-rate ingestion.
pub mod cache;

/// Offline fallback rates seeded into new caches.
pub mod defaults;

/// JSON persistence of the raw rates.
pub mod persist;

/// The [`RateLookup`] trait the evaluator converts through.
pub mod lookup;

/// The [`RateProvider`] contract for fetching rates from outside the crate.
pub mod provider;

pub use cache::{RateCache, Stats};
pub use lookup::RateLookup;
pub use persist::CachedRates;
pub use provider::{RateCategory, RateProvider};
