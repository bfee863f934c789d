//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "gw-rdb.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your region groups and queries", self.output);
                println!("  2. Set GWRDB_DATABASE_URL (or put it in a .env file)");
                println!("  3. Validate configuration: gw-rdb validate-config");
                println!("  4. Run export: gw-rdb export --group ALL");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# gw-rdb Configuration File
# Groundwater RDB export

[application]
log_level = "info"
tier = "TEST"

[storage]
backend = "s3"

[storage.s3]
bucket = "iow-retriever-capture-test"
region = "us-west-2"

[source]
connection_string = "${GWRDB_DATABASE_URL}"
rows_query = "SELECT * FROM groundwater.rdb_rows(($1)::text[], ($2)::text[])"
parameters_query = "SELECT code, below_land_surface, above_datum FROM groundwater.parameters"

[[regions.groups]]
id = "Wisconsin"
suffix = "WI"
"#
        .to_string()
    }

    /// Generate configuration with every option documented
    fn generate_config_with_examples() -> String {
        r#"# gw-rdb Configuration File
# Groundwater RDB export
#
# Values of the form ${VAR} are read from the environment.
# Any GWRDB_<SECTION>_<KEY> variable overrides the matching setting.

[application]
# Log level: trace, debug, info, warn, error
log_level = "info"
# Deployment tier. QA maps to key code "qa", tiers starting with
# "prod" map to "pr", anything else to "test".
tier = "TEST"

[storage]
# Backend: s3 or filesystem
backend = "s3"
# Keys look like <key_prefix><tier code>.<SUFFIX>.<dataset_version>.<timestamp>.full.rdb.gz
key_prefix = "ts"
dataset_version = "gw_lev_01.06"
# Directory for staging files (defaults to the system temp dir)
# staging_dir = "/tmp"

[storage.s3]
bucket = "iow-retriever-capture-test"
region = "us-west-2"
# S3-compatible endpoint (MinIO, LocalStack)
# endpoint = "http://localhost:9000"
# force_path_style = true
# Static credentials; the default AWS credential chain is used otherwise
# access_key_id = "${GWRDB_S3_ACCESS_KEY_ID}"
# secret_access_key = "${GWRDB_S3_SECRET_ACCESS_KEY}"

# [storage.filesystem]
# root = "/var/lib/gw-rdb/artifacts"

[notification]
enabled = true
# Channel name is <topic_base_name>-<tier>-topic
topic_base_name = "aqts-capture-etl-rdb"
# region = "us-west-2"

[source]
connection_string = "${GWRDB_DATABASE_URL}"
max_connections = 4
connection_timeout_seconds = 30
statement_timeout_seconds = 600
# $1 is the region list and $2 the parameter codes (both text[]).
# Every selected column must be text; columns are tab-joined into one row.
rows_query = "SELECT * FROM groundwater.rdb_rows(($1)::text[], ($2)::text[])"
# Must return (code text, below_land_surface bool, above_datum bool)
parameters_query = "SELECT code, below_land_surface, above_datum FROM groundwater.parameters"

# One entry per region group. regions defaults to [id].
[[regions.groups]]
id = "Wisconsin"
suffix = "WI"

[[regions.groups]]
id = "Pacific Islands"
regions = ["Hawaii", "Guam", "American Samoa"]
suffix = "PI"

[fan_out]
# Maximum concurrent group exports for ALL (0 = unbounded)
max_concurrency = 8

[logging]
local_enabled = false
local_path = "/var/log/gw-rdb"
# daily, hourly or never
local_rotation = "daily"
json_console = false
"#
        .to_string()
    }
}
