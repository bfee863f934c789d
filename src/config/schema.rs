//! Configuration schema types
//!
//! This module defines the configuration structure for gw-rdb.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Object storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Amazon S3 or an S3-compatible service
    S3,
    /// Local directory, for development and dry runs
    Filesystem,
}

/// Main gw-rdb configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RdbConfig {
    /// Application-level settings
    pub application: ApplicationConfig,

    /// Artifact storage settings
    pub storage: StorageConfig,

    /// Operational notification settings
    #[serde(default)]
    pub notification: NotificationConfig,

    /// Groundwater source database settings
    pub source: SourceConfig,

    /// Region group definitions
    #[serde(default)]
    pub regions: RegionsConfig,

    /// Fan-out settings for `ALL` exports
    #[serde(default)]
    pub fan_out: FanOutConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RdbConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.storage.validate()?;
        self.notification.validate()?;
        self.source.validate()?;
        self.regions.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Deployment tier (e.g. TEST, QA, prod-external)
    #[serde(default = "default_tier")]
    pub tier: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }

        if self.tier.trim().is_empty() {
            return Err("application.tier cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Artifact storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend to publish artifacts to
    pub backend: StorageBackend,

    /// Prefix placed before the tier code in every key
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Dataset version segment of the key
    #[serde(default = "default_dataset_version")]
    pub dataset_version: String,

    /// Directory for staging files (system temp dir when unset)
    #[serde(default)]
    pub staging_dir: Option<String>,

    /// S3 settings (required if backend = s3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3: Option<S3StorageConfig>,

    /// Filesystem settings (required if backend = filesystem)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filesystem: Option<FilesystemStorageConfig>,
}

impl StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.dataset_version.trim().is_empty() {
            return Err("storage.dataset_version cannot be empty".to_string());
        }

        match self.backend {
            StorageBackend::S3 => match &self.s3 {
                Some(s3) => s3.validate(),
                None => Err("storage.s3 configuration is required when backend = 's3'".to_string()),
            },
            StorageBackend::Filesystem => match &self.filesystem {
                Some(fs) => fs.validate(),
                None => Err(
                    "storage.filesystem configuration is required when backend = 'filesystem'"
                        .to_string(),
                ),
            },
        }
    }
}

/// S3 storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3StorageConfig {
    /// Bucket name
    pub bucket: String,

    /// AWS region
    #[serde(default = "default_aws_region")]
    pub region: String,

    /// Custom endpoint for S3-compatible services
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Static access key (default credential chain when unset)
    #[serde(default)]
    pub access_key_id: Option<String>,

    /// Static secret key
    #[serde(default)]
    pub secret_access_key: Option<SecretString>,

    /// Use path-style addressing
    #[serde(default)]
    pub force_path_style: bool,
}

impl S3StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.bucket.trim().is_empty() {
            return Err("storage.s3.bucket cannot be empty".to_string());
        }
        if self.region.trim().is_empty() {
            return Err("storage.s3.region cannot be empty".to_string());
        }
        if self.access_key_id.is_some() != self.secret_access_key.is_some() {
            return Err(
                "storage.s3.access_key_id and storage.s3.secret_access_key must be set together"
                    .to_string(),
            );
        }
        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err("storage.s3.endpoint must start with http:// or https://".to_string());
            }
        }
        Ok(())
    }
}

/// Filesystem storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesystemStorageConfig {
    /// Root directory artifacts are published under
    pub root: String,
}

impl FilesystemStorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.root.trim().is_empty() {
            return Err("storage.filesystem.root cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Notification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Publish notifications (log-only when false)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Channel base name; the tier and `-topic` are appended
    #[serde(default = "default_topic_base_name")]
    pub topic_base_name: String,

    /// AWS region override for the notification service
    #[serde(default)]
    pub region: Option<String>,
}

impl NotificationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.topic_base_name.trim().is_empty() {
            return Err("notification.topic_base_name cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            topic_base_name: default_topic_base_name(),
            region: None,
        }
    }
}

/// Groundwater source database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// PostgreSQL connection string
    /// Stored securely in memory and automatically zeroized on drop
    pub connection_string: SecretString,

    /// Maximum pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout_seconds")]
    pub connection_timeout_seconds: u64,

    /// Statement timeout in seconds
    #[serde(default = "default_statement_timeout_seconds")]
    pub statement_timeout_seconds: u64,

    /// Row query; `$1` is the region list, `$2` the parameter codes.
    /// Every selected column must be text.
    pub rows_query: String,

    /// Parameter query returning `(code text, below_land_surface bool, above_datum bool)`
    pub parameters_query: String,
}

impl SourceConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.connection_string.expose_secret().is_empty() {
            return Err("source.connection_string cannot be empty".to_string());
        }

        if !self
            .connection_string
            .expose_secret()
            .as_ref()
            .starts_with("postgres")
            && !self.connection_string.expose_secret().as_ref().contains('=')
        {
            return Err(
                "source.connection_string must be a postgres:// URL or key=value string"
                    .to_string(),
            );
        }

        if self.max_connections == 0 || self.max_connections > 100 {
            return Err(format!(
                "source.max_connections must be between 1 and 100, got {}",
                self.max_connections
            ));
        }

        if self.rows_query.trim().is_empty() {
            return Err("source.rows_query cannot be empty".to_string());
        }
        if self.parameters_query.trim().is_empty() {
            return Err("source.parameters_query cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Region group definitions
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegionsConfig {
    /// Configured region groups
    #[serde(default)]
    pub groups: Vec<RegionGroupConfig>,
}

impl RegionsConfig {
    fn validate(&self) -> Result<(), String> {
        let mut seen = std::collections::HashSet::new();
        let mut suffixes = std::collections::HashMap::new();
        for group in &self.groups {
            if group.id.trim().is_empty() {
                return Err("regions.groups[].id cannot be empty".to_string());
            }
            if group.id == crate::domain::RegionGroupId::ALL {
                return Err("regions.groups[].id cannot be the reserved value 'ALL'".to_string());
            }
            if !seen.insert(group.id.as_str()) {
                return Err(format!("Duplicate region group id '{}'", group.id));
            }

            // Storage keys carry the suffix uppercased
            let suffix = group.suffix.trim().to_uppercase();
            if suffix.is_empty() {
                continue;
            }
            if let Some(other) = suffixes.insert(suffix, group.id.as_str()) {
                return Err(format!(
                    "Region groups '{}' and '{}' share filename suffix '{}'",
                    other,
                    group.id,
                    group.suffix.trim()
                ));
            }
        }
        Ok(())
    }
}

/// One region group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionGroupConfig {
    /// Group key used in requests
    pub id: String,

    /// Regions exported for this group (defaults to the group id)
    #[serde(default)]
    pub regions: Vec<String>,

    /// Filename suffix, typically a postal code; blank leaves the group unresolved
    #[serde(default)]
    pub suffix: String,
}

/// Fan-out configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FanOutConfig {
    /// Maximum concurrent group exports (0 = unbounded)
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl Default for FanOutConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Emit console logs as JSON
    #[serde(default)]
    pub json_console: bool,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err(
                "logging.local_path cannot be empty when local logging is enabled".to_string(),
            );
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            json_console: false,
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_tier() -> String {
    "TEST".to_string()
}

fn default_true() -> bool {
    true
}

fn default_key_prefix() -> String {
    "ts".to_string()
}

fn default_dataset_version() -> String {
    "gw_lev_01.06".to_string()
}

fn default_aws_region() -> String {
    "us-west-2".to_string()
}

fn default_topic_base_name() -> String {
    crate::core::notify::DEFAULT_CHANNEL_BASE_NAME.to_string()
}

fn default_max_connections() -> usize {
    4
}

fn default_connection_timeout_seconds() -> u64 {
    30
}

fn default_statement_timeout_seconds() -> u64 {
    600
}

fn default_max_concurrency() -> usize {
    8
}

fn default_local_path() -> String {
    "/var/log/gw-rdb".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
