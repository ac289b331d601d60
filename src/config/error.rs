//! Configuration error types

use thiserror::Error;

/// Startup configuration could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

/// A semantic problem in an otherwise well-formed configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// `key` is required by the selected backend or section.
    #[error("{0} is required")]
    MissingRequired(&'static str),

    #[error("{0} is not a valid listen address")]
    InvalidAddress(String),

    #[error("server.port must be non-zero")]
    InvalidPort,

    /// A timeout, named by its key, is zero or above its ceiling.
    #[error("{key} must be between 1 and {max_secs} seconds")]
    InvalidTimeout { key: &'static str, max_secs: u64 },

    #[error("database.url must use the postgres:// or postgresql:// scheme")]
    InvalidDatabaseUrl,

    #[error("database.min_connections ({min}) exceeds database.max_connections ({max})")]
    InvalidPoolSize { min: u32, max: u32 },

    #[error("database.max_connections ({0}) exceeds the limit of {limit}", limit = MAX_POOL_SIZE)]
    PoolSizeTooLarge(u32),

    #[error("catalog.path must not be empty when set")]
    EmptyCatalogPath,
}

/// Upper bound on `database.max_connections`.
pub const MAX_POOL_SIZE: u32 = 100;
