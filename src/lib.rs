// gw-rdb - Groundwater RDB export
// Copyright (c) 2025 gw-rdb Contributors
// Licensed under the MIT License

//! # gw-rdb - Groundwater RDB export
//!
//! gw-rdb exports groundwater level records into fixed-format RDB flat files,
//! publishes them to durable object storage, and reports every outcome to an
//! operations channel.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Resolving** region groups to regions and filename suffixes
//! - **Fetching** groundwater rows and parameter codes from PostgreSQL
//! - **Formatting** rows into RDB files behind a fixed header
//! - **Publishing** gzip-compressed artifacts to S3 or a local directory,
//!   only when they contain data
//! - **Fanning out** across every region group with per-group isolation
//!
//! ## Architecture
//!
//! gw-rdb follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (orchestration, fan-out, RDB framing, notifications)
//! - [`adapters`] - External integrations (PostgreSQL, S3, SNS, filesystem)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gw_rdb::adapters::build_orchestrator;
//! use gw_rdb::config::load_config;
//! use gw_rdb::domain::ExportRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("gw-rdb.toml")?;
//!     let orchestrator = build_orchestrator(&config).await?;
//!
//!     // One region group
//!     let result = orchestrator.run(&ExportRequest::new("Wisconsin")).await?;
//!     println!("{}", result.message());
//!
//!     // Every region group
//!     let summary = orchestrator.export_all().await;
//!     println!("{}", summary.message());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Adapters and setup code return [`domain::RdbError`]. A region group export
//! returns [`domain::ExportError`], whose variants say which stage failed:
//!
//! ```rust
//! use gw_rdb::domain::{ExportError, ExportErrorKind};
//!
//! fn describe(err: &ExportError) -> &'static str {
//!     match err.kind() {
//!         ExportErrorKind::EmptyArtifact => "nothing to publish",
//!         ExportErrorKind::UnknownRegionGroup => "unknown group",
//!         _ => "export failed",
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! gw-rdb uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(region_group = "Wisconsin", rows = 6, "Export completed");
//! warn!(region_group = "Atlantis", "Region group has no filename suffix");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
