//! Export request and result types
//!
//! These are the values crossing the pipeline boundary. Both serialize with the
//! same field names the triggering platform uses (`regionGroupId`, `count`,
//! `message`).

use crate::domain::ids::RegionGroupId;
use serde::{Deserialize, Serialize};

/// Incoming export request
///
/// `region_group_id` is either a concrete region group key or the sentinel
/// [`RegionGroupId::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    region_group_id: String,
}

impl ExportRequest {
    /// Creates a request for the given region group key
    pub fn new(region_group_id: impl Into<String>) -> Self {
        Self {
            region_group_id: region_group_id.into(),
        }
    }

    /// Creates a request for every region group
    pub fn all() -> Self {
        Self::new(RegionGroupId::ALL)
    }

    /// Returns the raw region group key
    pub fn region_group_id(&self) -> &str {
        &self.region_group_id
    }

    /// Returns true when the request asks for the fan-out export
    pub fn is_all(&self) -> bool {
        self.region_group_id == RegionGroupId::ALL
    }
}

/// Outcome of one export invocation
///
/// For a single region group, `row_count` is the number of data rows written.
/// For a fan-out export it is the total over the groups that succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportResult {
    #[serde(rename = "count")]
    row_count: u64,
    message: String,
}

impl ExportResult {
    /// Creates a new result
    pub fn new(row_count: u64, message: impl Into<String>) -> Self {
        Self {
            row_count,
            message: message.into(),
        }
    }

    /// Number of data rows written
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    /// Human readable outcome
    pub fn message(&self) -> &str {
        &self.message
    }
}
