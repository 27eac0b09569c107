use std::{
    collections::{BTreeMap, HashMap},
    env, fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    error::CacheError,
    rates::cache::{BASE_CURRENCY, RateCache, age_of},
};

/// File name of the rate cache inside the cache directory.
pub const CACHE_FILE_NAME: &str = "rates.json";

/// The on-disk form of a rate cache.
///
/// ```json
/// { "timestamp": 1700000000, "rates": { "EUR": 0.92, "BTC": 95000 }, "base_currency": "USD" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedRates {
    /// Unix seconds of the last update.
    pub timestamp:     i64,
    /// Raw rates as received from providers.
    pub rates:         BTreeMap<String, f64>,
    #[serde(default = "base_currency")]
    pub base_currency: String,
}

fn base_currency() -> String {
    BASE_CURRENCY.to_string()
}

/// The directory the rate cache lives in by default.
///
/// `$XDG_CACHE_HOME/tally` when set, otherwise `.tally/cache` under the
/// user's home directory. Returns `None` when no home directory is known.
#[must_use]
pub fn default_cache_dir() -> Option<PathBuf> {
    if let Some(xdg) = env::var_os("XDG_CACHE_HOME").filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(xdg).join("tally"));
    }
    dirs::home_dir().map(|home| home.join(".tally").join("cache"))
}

impl RateCache {
    /// Writes the raw rates to the configured cache file.
    pub fn save_to_file(&self) -> Result<(), CacheError> {
        let path = self.cache_file.clone().ok_or(CacheError::NoCacheDir)?;
        self.save_to(&path)
    }

    /// Writes the raw rates to `path`, creating parent directories.
    ///
    /// The snapshot is taken under the lock; the write happens after it is
    /// released.
    pub fn save_to(&self, path: &Path) -> Result<(), CacheError> {
        let cached = {
            let table = self.table.read();
            CachedRates { timestamp:     table.last_update.unwrap_or_else(Utc::now).timestamp(),
                          rates:         table.raw.iter().map(|(k, v)| (k.clone(), *v)).collect(),
                          base_currency: base_currency(), }
        };

        if let Some(dir) = path.parent()
           && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|source| CacheError::Io { path: dir.to_path_buf(),
                                                                       source })?;
        }

        let json = serde_json::to_string_pretty(&cached)?;
        fs::write(path, json).map_err(|source| CacheError::Io { path: path.to_path_buf(),
                                                                 source })?;

        info!(path = %path.display(), count = cached.rates.len(), "saved rate cache");
        Ok(())
    }

    /// Loads rates from the configured cache file.
    pub fn load_from_file(&self) -> Result<(), CacheError> {
        let path = self.cache_file.clone().ok_or(CacheError::NoCacheDir)?;
        self.load_from(&path)
    }

    /// Loads rates from `path`.
    ///
    /// Files older than the TTL are rejected with [`CacheError::Expired`].
    /// Accepted rates are applied as raw rates and the cache takes the
    /// file's timestamp rather than the current time.
    pub fn load_from(&self, path: &Path) -> Result<(), CacheError> {
        let cached = read_cached(path)?;
        let timestamp = DateTime::from_timestamp(cached.timestamp, 0)
            .ok_or(CacheError::InvalidTimestamp(cached.timestamp))?;

        if self.expired_at(Some(timestamp)) {
            warn!(path = %path.display(), %timestamp, "rejected expired rate cache");
            return Err(CacheError::Expired { timestamp,
                                             ttl_secs: self.ttl.as_secs() });
        }

        let rates: HashMap<String, f64> = cached.rates.into_iter().collect();
        {
            let mut table = self.table.write();
            table.apply_raw(&rates);
            table.last_update = Some(timestamp);
        }

        info!(path = %path.display(),
              count = rates.len(),
              age_secs = age_of(Some(timestamp)).as_secs(),
              "loaded rate cache");
        Ok(())
    }

    /// Returns `true` if the configured cache file exists, parses and is
    /// within the TTL.
    #[must_use]
    pub fn is_file_valid(&self) -> bool {
        self.cache_file
            .as_deref()
            .and_then(|path| read_cached(path).ok())
            .and_then(|cached| DateTime::from_timestamp(cached.timestamp, 0))
            .is_some_and(|timestamp| !self.expired_at(Some(timestamp)))
    }
}

fn read_cached(path: &Path) -> Result<CachedRates, CacheError> {
    let data = fs::read_to_string(path).map_err(|source| CacheError::Io { path: path.to_path_buf(),
                                                                          source })?;
    Ok(serde_json::from_str(&data)?)
}
