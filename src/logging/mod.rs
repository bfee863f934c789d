//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - JSON-formatted logs
//! - Configurable log levels
//! - Local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use gw_rdb::logging::init_logging;
//! use gw_rdb::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(region_group = "Wisconsin", "Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a region group export
///
/// # Example
///
/// ```no_run
/// use gw_rdb::log_export_start;
///
/// let regions = "[Wisconsin]";
/// log_export_start!("Wisconsin", regions);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($group:expr, $regions:expr) => {
        tracing::info!(
            region_group = %$group,
            regions = %$regions,
            "Starting export"
        );
    };
}

/// Log the completion of a region group export
///
/// # Example
///
/// ```no_run
/// use gw_rdb::log_export_complete;
/// use std::time::Duration;
///
/// let key = "tsqa.WI.gw_lev_01.06.20250101_000000.full.rdb.gz";
/// log_export_complete!("Wisconsin", key, 6u64, Duration::from_secs(3));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($group:expr, $storage_key:expr, $rows:expr, $duration:expr) => {
        tracing::info!(
            region_group = %$group,
            storage_key = %$storage_key,
            rows = $rows,
            duration_ms = $duration.as_millis() as u64,
            "Export completed"
        );
    };
}

