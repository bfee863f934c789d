//! Configuration management for gw-rdb.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! gw-rdb uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `GWRDB_*` environment overrides
//! - Default values for optional settings
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gw_rdb::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("gw-rdb.toml")?;
//!
//! println!("Tier: {}", config.application.tier);
//! for group in &config.regions.groups {
//!     println!("{} -> {}", group.id, group.suffix);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and deployment tier
//! - [`StorageConfig`] - Artifact store backend, key layout, staging directory
//! - [`NotificationConfig`] - Notification channel settings
//! - [`SourceConfig`] - Groundwater database connection and queries
//! - [`RegionsConfig`] - Region group definitions
//! - [`FanOutConfig`] - Concurrency limit for `ALL` exports
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! tier = "TEST"
//!
//! [storage]
//! backend = "s3"
//!
//! [storage.s3]
//! bucket = "iow-retriever-capture-test"
//!
//! [source]
//! connection_string = "${GWRDB_DATABASE_URL}"
//! rows_query = "SELECT ... WHERE region = ANY($1) AND parameter_code = ANY($2)"
//! parameters_query = "SELECT code, below_land_surface, above_datum FROM parameters"
//!
//! [[regions.groups]]
//! id = "Wisconsin"
//! suffix = "WI"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, FanOutConfig, FilesystemStorageConfig, LoggingConfig, NotificationConfig,
    RdbConfig, RegionGroupConfig, RegionsConfig, S3StorageConfig, SourceConfig, StorageBackend,
    StorageConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
