//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the gw-rdb configuration file.

use crate::adapters::regions::ConfiguredRegionResolver;
use crate::adapters::storage::StorageKeyFormat;
use crate::config::load_config;
use crate::config::schema::StorageBackend;
use crate::core::notify::channel_name;
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading runs every section's validation, so a loaded file is valid.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration validation failed");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let regions = match ConfiguredRegionResolver::from_config(&config.regions) {
            Ok(r) => r,
            Err(e) => {
                println!("Configuration validation failed");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let key_format = StorageKeyFormat::new(
            config.storage.key_prefix.clone(),
            &config.application.tier,
            config.storage.dataset_version.clone(),
        );

        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Tier: {} (key code '{}')",
            config.application.tier,
            key_format.tier_code()
        );

        match config.storage.backend {
            StorageBackend::S3 => {
                if let Some(ref s3) = config.storage.s3 {
                    println!("  Storage: s3://{} ({})", s3.bucket, s3.region);
                }
            }
            StorageBackend::Filesystem => {
                if let Some(ref fs) = config.storage.filesystem {
                    println!("  Storage: file://{}", fs.root);
                }
            }
        }
        println!("  Example Key: {}", key_format.key("XX"));
        println!(
            "  Source: {}",
            config
                .source
                .connection_string
                .expose_secret()
                .as_ref()
                .split('@')
                .next_back()
                .unwrap_or("***")
        );
        println!("  Max Connections: {}", config.source.max_connections);

        if config.notification.enabled {
            println!(
                "  Notification Channel: {}",
                channel_name(&config.notification.topic_base_name, &config.application.tier)
            );
        } else {
            println!("  Notifications: disabled");
        }

        println!("  Region Groups: {}", regions.len());
        match config.fan_out.max_concurrency {
            0 => println!("  Fan-out Concurrency: unbounded"),
            n => println!("  Fan-out Concurrency: {n}"),
        }
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_configuration_error() {
        let args = ValidateArgs {};
        assert_eq!(args.execute("nonexistent.toml").await.unwrap(), 2);
    }
}
