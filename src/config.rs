use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    interpreter::context::DEFAULT_PRECISION,
    rates::{
        cache::{DEFAULT_TTL, RateCache},
        persist::{CACHE_FILE_NAME, default_cache_dir},
    },
    util::num::MAX_PRECISION,
};

/// Prefix of the environment variables that override configuration.
pub const ENV_PREFIX: &str = "TALLY_";

/// Settings for an [`Engine`](crate::engine::Engine).
///
/// ```toml
/// precision = 4
/// strict = true
/// rate_ttl_secs = 600
/// cache_dir = "/var/cache/tally"
/// offline_defaults = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Decimal places used when formatting results, `0..=15`.
    pub precision:        u8,
    /// Treat undefined names as errors instead of zero.
    pub strict:           bool,
    /// How long fetched rates stay fresh, in seconds.
    pub rate_ttl_secs:    u64,
    /// Directory of the rate cache file. Derived from the environment when
    /// unset.
    pub cache_dir:        Option<PathBuf>,
    /// Seed the rate cache with built-in fallback rates.
    pub offline_defaults: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { precision:        DEFAULT_PRECISION,
               strict:           false,
               rate_ttl_secs:    DEFAULT_TTL.as_secs(),
               cache_dir:        None,
               offline_defaults: true, }
    }
}

impl EngineConfig {
    /// Loads configuration from layered sources.
    ///
    /// Priority (highest to lowest):
    /// 1. `TALLY_`-prefixed environment variables (`TALLY_PRECISION=4`)
    /// 2. The TOML file at `path`, when given and present
    /// 3. Default values
    ///
    /// # Example
    /// ```
    /// use tally::config::EngineConfig;
    ///
    /// let config = EngineConfig::load(None).unwrap();
    /// assert!(config.precision <= 15);
    /// ```
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }

        let config: Self = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that the type system does not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.precision > MAX_PRECISION {
            return Err(ConfigError::InvalidPrecision { value: i64::from(self.precision),
                                                       max:   MAX_PRECISION, });
        }
        Ok(())
    }

    #[must_use]
    pub const fn rate_ttl(&self) -> Duration {
        Duration::from_secs(self.rate_ttl_secs)
    }

    /// The rate cache file these settings point at.
    #[must_use]
    pub fn cache_file(&self) -> Option<PathBuf> {
        self.cache_dir
            .clone()
            .or_else(default_cache_dir)
            .map(|dir| dir.join(CACHE_FILE_NAME))
    }

    /// Builds the rate cache these settings describe.
    #[must_use]
    pub fn rate_cache(&self) -> RateCache {
        let cache = if self.offline_defaults {
            RateCache::new()
        } else {
            RateCache::empty()
        };
        let cache = cache.with_ttl(self.rate_ttl());

        match self.cache_file() {
            Some(path) => cache.with_cache_file(path),
            None => cache,
        }
    }
}
