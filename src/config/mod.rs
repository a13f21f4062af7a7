//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `TASTELOCAL` prefix and
//! `__` between nesting levels.
//!
//! # Example
//!
//! ```no_run
//! use tastelocal_proposals::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Listener, environment, logging
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL pool
    pub database: DatabaseConfig,

    /// Bearer token verification and admin ids
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// Reads `.env` when present, then every `TASTELOCAL__*` variable:
    ///
    /// - `TASTELOCAL__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `TASTELOCAL__DATABASE__URL=...` -> `database.url = ...`
    /// - `TASTELOCAL__AUTH__JWT_SECRET=...` -> `auth.jwt_secret = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or a value
    /// cannot be parsed into its field type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TASTELOCAL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation of every section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
