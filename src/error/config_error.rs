use thiserror::Error;

/// Errors raised while building or changing an engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Display precision outside `0..=15`.
    #[error("precision must be between 0 and {max}, got {value}")]
    InvalidPrecision {
        /// The rejected value.
        value: i64,
        /// The largest accepted value.
        max:   u8,
    },
    /// The layered configuration sources could not be merged or extracted.
    #[error("failed to load configuration: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}
