//! Core business logic for gw-rdb.
//!
//! # Modules
//!
//! - [`export`] - Orchestration, artifact contract, fan-out and summaries
//! - [`rdb`] - RDB header and row framing
//! - [`notify`] - Best-effort operational notifications
//!
//! # Export Workflow
//!
//! 1. **Resolve**: Map the region group to regions and a filename suffix
//! 2. **Stage**: Open a scoped artifact under the storage key
//! 3. **Format**: Write the header, then stream rows from the source
//! 4. **Validate**: Reject artifacts without data rows
//! 5. **Commit**: Publish the compressed artifact
//! 6. **Notify**: Report the outcome once
//!
//! # Example
//!
//! ```rust,no_run
//! use gw_rdb::adapters::build_orchestrator;
//! use gw_rdb::config::load_config;
//! use gw_rdb::domain::ExportRequest;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("gw-rdb.toml")?;
//! let orchestrator = build_orchestrator(&config).await?;
//!
//! let result = orchestrator.run(&ExportRequest::new("Wisconsin")).await?;
//! println!("{} rows: {}", result.row_count(), result.message());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod notify;
pub mod rdb;
