//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::RdbConfig;
use super::secret::secret_string;
use crate::domain::errors::RdbError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into RdbConfig
/// 4. Applies environment variable overrides (GWRDB_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`RdbError::Configuration`] if the file cannot be read or parsed,
/// a referenced variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use gw_rdb::config::loader::load_config;
///
/// let config = load_config("gw-rdb.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RdbConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RdbError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RdbError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses and validates configuration from TOML text
///
/// Runs the same substitution, override, and validation steps as [`load_config`].
pub fn parse_config(contents: &str) -> Result<RdbConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: RdbConfig = toml::from_str(&contents)
        .map_err(|e| RdbError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        RdbError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| RdbError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(RdbError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the GWRDB_* prefix
///
/// Variables follow the pattern `GWRDB_<SECTION>_<KEY>`, for example
/// `GWRDB_APPLICATION_TIER` or `GWRDB_STORAGE_S3_BUCKET`. Unparseable
/// numeric or boolean values are ignored.
fn apply_env_overrides(config: &mut RdbConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("GWRDB_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("GWRDB_APPLICATION_TIER") {
        config.application.tier = val;
    }

    // Storage overrides
    if let Ok(val) = std::env::var("GWRDB_STORAGE_KEY_PREFIX") {
        config.storage.key_prefix = val;
    }
    if let Ok(val) = std::env::var("GWRDB_STORAGE_DATASET_VERSION") {
        config.storage.dataset_version = val;
    }
    if let Ok(val) = std::env::var("GWRDB_STORAGE_STAGING_DIR") {
        config.storage.staging_dir = Some(val);
    }
    if let Some(ref mut s3) = config.storage.s3 {
        if let Ok(val) = std::env::var("GWRDB_STORAGE_S3_BUCKET") {
            s3.bucket = val;
        }
        if let Ok(val) = std::env::var("GWRDB_STORAGE_S3_REGION") {
            s3.region = val;
        }
        if let Ok(val) = std::env::var("GWRDB_STORAGE_S3_ENDPOINT") {
            s3.endpoint = Some(val);
        }
    }
    if let Some(ref mut fs) = config.storage.filesystem {
        if let Ok(val) = std::env::var("GWRDB_STORAGE_FILESYSTEM_ROOT") {
            fs.root = val;
        }
    }

    // Notification overrides
    if let Ok(val) = std::env::var("GWRDB_NOTIFICATION_ENABLED") {
        if let Ok(enabled) = val.parse() {
            config.notification.enabled = enabled;
        }
    }
    if let Ok(val) = std::env::var("GWRDB_NOTIFICATION_TOPIC_BASE_NAME") {
        config.notification.topic_base_name = val;
    }

    // Source overrides
    if let Ok(val) = std::env::var("GWRDB_SOURCE_CONNECTION_STRING") {
        config.source.connection_string = secret_string(val);
    }
    if let Ok(val) = std::env::var("GWRDB_SOURCE_MAX_CONNECTIONS") {
        if let Ok(size) = val.parse() {
            config.source.max_connections = size;
        }
    }
    if let Ok(val) = std::env::var("GWRDB_SOURCE_STATEMENT_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.source.statement_timeout_seconds = timeout;
        }
    }

    // Fan-out overrides
    if let Ok(val) = std::env::var("GWRDB_FAN_OUT_MAX_CONCURRENCY") {
        if let Ok(concurrency) = val.parse() {
            config.fan_out.max_concurrency = concurrency;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("GWRDB_LOGGING_LOCAL_ENABLED") {
        if let Ok(enabled) = val.parse() {
            config.logging.local_enabled = enabled;
        }
    }
    if let Ok(val) = std::env::var("GWRDB_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
