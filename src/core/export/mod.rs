//! Export orchestration and fan-out
//!
//! This module provides the core export logic for gw-rdb, including:
//! - The transactional artifact contract and its scope guard
//! - Single region group orchestration
//! - Concurrent fan-out for `ALL` requests
//! - Summary and reporting

pub mod artifact;
pub mod fanout;
pub mod orchestrator;
pub mod summary;

pub use artifact::{ArtifactHandle, ArtifactStore, ScopedArtifact};
pub use fanout::{FanOutInvoker, GroupExporter};
pub use orchestrator::ExportOrchestrator;
pub use summary::{FanOutSummary, GroupOutcome};
