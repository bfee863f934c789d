//! Integration tests for logging functionality

use gw_rdb::config::{parse_config, LoggingConfig};
use gw_rdb::domain::RegionGroupId;
use gw_rdb::logging::init_logging;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "/var/log/gw-rdb");
    assert_eq!(config.local_rotation, "daily");
    assert!(!config.json_console);
}

#[test]
fn test_logging_rotation_types() {
    for rotation in ["daily", "hourly", "never"] {
        let toml_content = format!(
            r#"
[storage]
backend = "filesystem"

[storage.filesystem]
root = "/tmp/gw-rdb"

[source]
connection_string = "postgres://gw@localhost/gw"
rows_query = "SELECT line FROM rdb_rows"
parameters_query = "SELECT code, below_land_surface, above_datum FROM parameters"

[logging]
local_rotation = "{rotation}"
"#
        );

        let config = parse_config(&toml_content).unwrap();
        assert_eq!(config.logging.local_rotation, rotation);
    }
}

#[test]
fn test_logging_macros_usage() {
    // Macros only emit events; without a subscriber they are no-ops
    let group = RegionGroupId::new("Wisconsin").unwrap();
    let regions = "[Wisconsin]";
    let storage_key = "tstest.WI.gw_lev_01.06.20250102_030405.full.rdb.gz";

    gw_rdb::log_export_start!(group, regions);
    gw_rdb::log_export_complete!(group, storage_key, 6u64, Duration::from_millis(1500));

    assert_eq!(group.to_string(), "Wisconsin");
}

// The only test in this binary that installs the global subscriber
#[test]
fn test_file_logging_writes_to_local_path() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
        json_console: false,
    };

    let guard = init_logging("info", &config).unwrap();
    tracing::info!(region_group = "Wisconsin", "Export completed");
    drop(guard);

    assert!(log_path.join("gw-rdb.log").exists());
}
