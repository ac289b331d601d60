//! Application configuration module
//!
//! Configuration is read from environment variables (and a `.env` file in
//! development) with the `CANE_OPS` prefix; nested values are separated by
//! a double underscore.
//!
//! # Example
//!
//! ```no_run
//! use cane_ops::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod backend;
mod catalog;
mod database;
mod error;
mod features;
mod server;

pub use backend::{BackendConfig, BackendKind};
pub use catalog::CatalogConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use server::{LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Required when `backend.kind = postgres`
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `CANE_OPS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CANE_OPS__BACKEND__KIND=postgres` -> `backend.kind = postgres`
    /// - `CANE_OPS__DATABASE__URL=...` -> `database.url = ...`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CANE_OPS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation across sections.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.catalog.validate()?;
        match (&self.backend.kind, &self.database) {
            (BackendKind::Postgres, None) => {
                return Err(ValidationError::MissingRequired("database.url"))
            }
            (_, Some(database)) => database.validate()?,
            (BackendKind::Memory, None) => {}
        }
        Ok(())
    }
}
