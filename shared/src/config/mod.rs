//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `search` - Search-index mirror endpoint and reindex queue
//! - `server` - HTTP server configuration
//! - `verification` - One-time code lifetime and device defaults
//!
//! Sources are layered with the `config` crate: serde defaults, then the
//! optional `config/<environment>.toml` file, then `DRIVERAPP__<SECTION>__<KEY>`
//! environment variables. `DATABASE_URL` always wins for the database URL.

pub mod database;
pub mod environment;
pub mod search;
pub mod server;
pub mod verification;

use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use config::builder::DefaultState;
use serde::{Deserialize, Serialize};

pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use search::SearchConfig;
pub use server::ServerConfig;
pub use verification::VerificationConfig;

/// Prefix of environment variables read by [`AppConfig::load`]
pub const ENV_PREFIX: &str = "DRIVERAPP";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Search mirror configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Verification flow configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `.env`, the environment file and env variables
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let env = Environment::from_env();
        let mut builder = Self::base_builder(env)?
            .add_source(File::with_name(env.config_file()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", url)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Parse configuration from an inline TOML document on top of the defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn base_builder(env: Environment) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("environment", env.to_string())?
            .set_default("logging.level", LoggingConfig::for_environment(env).level)
    }
}
