//! External system integrations for gw-rdb.
//!
//! This module provides adapters for the systems an export touches:
//!
//! - [`source`] - Groundwater rows and parameters (PostgreSQL)
//! - [`regions`] - Region group lookup
//! - [`storage`] - Artifact staging and object storage (S3, filesystem)
//! - [`notify`] - Notification transports (SNS)
//! - [`factory`] - Builds the configured adapters
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with in-memory implementations. The orchestrator only sees the
//! traits.
//!
//! ```rust,no_run
//! use gw_rdb::adapters::storage::{FilesystemObjectStore, StagedArtifactStore, StorageKeyFormat};
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FilesystemObjectStore::new("/tmp/gw-rdb")?;
//! let artifacts = StagedArtifactStore::new(Arc::new(store), StorageKeyFormat::for_tier("TEST"));
//! # Ok(())
//! # }
//! ```

pub mod factory;
pub mod notify;
pub mod regions;
pub mod source;
pub mod storage;

pub use factory::{build_orchestrator, build_orchestrator_with_source};
