//! Fan-out summary and reporting
//!
//! This module defines structures for tracking and reporting the outcome of an
//! `ALL` export across region groups.

use crate::domain::{ExportError, ExportOutcome, ExportResult, RegionGroupId};
use std::time::Duration;

/// Outcome of one region group within a fan-out
#[derive(Debug, Clone)]
pub struct GroupOutcome {
    /// Region group that was exported
    pub group: RegionGroupId,

    /// Export result or failure
    pub result: ExportOutcome<ExportResult>,
}

impl GroupOutcome {
    pub fn new(group: RegionGroupId, result: ExportOutcome<ExportResult>) -> Self {
        Self { group, result }
    }
}

/// Summary of a fan-out export
#[derive(Debug, Clone)]
pub struct FanOutSummary {
    /// Per-group outcomes, sorted by group id
    pub outcomes: Vec<GroupOutcome>,

    /// Wall-clock duration of the fan-out
    pub duration: Duration,
}

impl FanOutSummary {
    /// Create a summary from group outcomes
    pub fn new(mut outcomes: Vec<GroupOutcome>) -> Self {
        outcomes.sort_by(|a, b| a.group.cmp(&b.group));
        Self {
            outcomes,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Number of groups dispatched
    pub fn total_groups(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of groups that published an artifact
    pub fn successful_groups(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Failed groups with their errors
    pub fn failures(&self) -> Vec<(&RegionGroupId, &ExportError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.group, e)))
            .collect()
    }

    /// Rows written across all successful groups
    pub fn total_rows(&self) -> u64 {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .map(ExportResult::row_count)
            .sum()
    }

    /// Check if every group succeeded
    pub fn is_successful(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    /// Composite human-readable message
    pub fn message(&self) -> String {
        let mut message = format!(
            "Exported {} of {} region groups, {} rows written",
            self.successful_groups(),
            self.total_groups(),
            self.total_rows()
        );

        let failures = self.failures();
        if !failures.is_empty() {
            let described: Vec<String> = failures
                .iter()
                .map(|(group, error)| format!("{group}: {error}"))
                .collect();
            message.push_str(". Failures: ");
            message.push_str(&described.join("; "));
        }
        message
    }

    /// Collapses the summary into a single result
    pub fn into_result(self) -> ExportResult {
        ExportResult::new(self.total_rows(), self.message())
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_groups = self.total_groups(),
            successful = self.successful_groups(),
            failed = self.total_groups() - self.successful_groups(),
            rows = self.total_rows(),
            duration_secs = self.duration.as_secs(),
            "Fan-out export completed"
        );

        for (group, error) in self.failures() {
            tracing::warn!(
                region_group = %group,
                error_kind = %error.kind(),
                error = %error,
                "Region group export failed"
            );
        }
    }
}
