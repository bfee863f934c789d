//! Fan-out across region groups
//!
//! Each group is exported in its own tokio task. Failures stay with their
//! group: the fan-out itself always completes, and waits for every task
//! before building the summary.

use super::summary::{FanOutSummary, GroupOutcome};
use crate::domain::{ExportError, ExportOutcome, ExportResult, RegionGroupId};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

/// Exports one region group
#[async_trait]
pub trait GroupExporter: Send + Sync + 'static {
    async fn export_group(&self, group: &RegionGroupId) -> ExportOutcome<ExportResult>;
}

/// Runs one export per region group concurrently
#[derive(Debug, Clone, Copy, Default)]
pub struct FanOutInvoker {
    max_concurrency: Option<usize>,
}

impl FanOutInvoker {
    /// Creates an invoker running at most `max_concurrency` exports at once
    ///
    /// Zero means unbounded.
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency: (max_concurrency > 0).then_some(max_concurrency),
        }
    }

    /// Creates an invoker without a concurrency limit
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn max_concurrency(&self) -> Option<usize> {
        self.max_concurrency
    }

    /// Exports every group in `groups` and aggregates the outcomes
    pub async fn run_all(
        &self,
        exporter: Arc<dyn GroupExporter>,
        groups: Vec<RegionGroupId>,
    ) -> FanOutSummary {
        let started = Instant::now();
        let semaphore = self.max_concurrency.map(|n| Arc::new(Semaphore::new(n)));

        tracing::info!(
            groups = groups.len(),
            max_concurrency = ?self.max_concurrency,
            "Starting fan-out export"
        );

        let handles: Vec<_> = groups
            .into_iter()
            .map(|group| {
                let exporter = Arc::clone(&exporter);
                let semaphore = semaphore.clone();
                let task_group = group.clone();
                let handle = tokio::spawn(async move {
                    let _permit = match semaphore {
                        Some(semaphore) => Some(semaphore.acquire_owned().await),
                        None => None,
                    };
                    exporter.export_group(&task_group).await
                });
                (group, handle)
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for (group, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(region_group = %group, error = %e, "Export task failed");
                    Err(ExportError::Aborted {
                        message: e.to_string(),
                    })
                }
            };
            outcomes.push(GroupOutcome::new(group, result));
        }

        let summary = FanOutSummary::new(outcomes).with_duration(started.elapsed());
        summary.log_summary();
        summary
    }
}
