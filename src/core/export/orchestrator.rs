//! Export orchestration
//!
//! The [`ExportOrchestrator`] turns one request into at most one published
//! artifact per region group:
//!
//! 1. `ALL` is handed to the [`FanOutInvoker`]
//! 2. The group is resolved to regions and a filename suffix
//! 3. A scoped artifact is opened under the storage key
//! 4. The header, then every data row, is written through the formatter
//! 5. A non-empty artifact is committed
//!
//! Every group invocation publishes exactly one notification.

use super::artifact::{ArtifactStore, ScopedArtifact};
use super::fanout::{FanOutInvoker, GroupExporter};
use super::summary::FanOutSummary;
use crate::adapters::regions::RegionResolver;
use crate::adapters::source::{GroundwaterSource, ParameterSource};
use crate::core::notify::Notifier;
use crate::core::rdb::{FormatterFactory, RdbWriterFactory};
use crate::domain::ids::format_region_list;
use crate::domain::{
    ExportError, ExportOutcome, ExportRequest, ExportResult, RdbError, RegionCode, RegionGroupId,
};
use crate::{log_export_complete, log_export_start};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// Drives region group exports
#[derive(Clone)]
pub struct ExportOrchestrator {
    regions: Arc<dyn RegionResolver>,
    artifacts: Arc<dyn ArtifactStore>,
    source: Arc<dyn GroundwaterSource>,
    parameters: Arc<dyn ParameterSource>,
    formatters: Arc<dyn FormatterFactory>,
    notifier: Arc<Notifier>,
    fan_out: FanOutInvoker,
}

impl ExportOrchestrator {
    /// Create a new orchestrator
    ///
    /// Uses [`RdbWriterFactory`] for formatting and an unbounded fan-out.
    pub fn new(
        regions: Arc<dyn RegionResolver>,
        artifacts: Arc<dyn ArtifactStore>,
        source: Arc<dyn GroundwaterSource>,
        parameters: Arc<dyn ParameterSource>,
        notifier: Arc<Notifier>,
    ) -> Self {
        Self {
            regions,
            artifacts,
            source,
            parameters,
            formatters: Arc::new(RdbWriterFactory),
            notifier,
            fan_out: FanOutInvoker::unbounded(),
        }
    }

    /// Replaces the formatter factory
    pub fn with_formatter_factory(mut self, formatters: Arc<dyn FormatterFactory>) -> Self {
        self.formatters = formatters;
        self
    }

    /// Replaces the fan-out invoker
    pub fn with_fan_out(mut self, fan_out: FanOutInvoker) -> Self {
        self.fan_out = fan_out;
        self
    }

    /// Region groups an `ALL` request exports
    pub fn group_ids(&self) -> Vec<RegionGroupId> {
        self.regions.all_group_ids()
    }

    /// Executes a request
    ///
    /// `ALL` always succeeds; group failures are embedded in the result message.
    pub async fn run(&self, request: &ExportRequest) -> ExportOutcome<ExportResult> {
        if request.is_all() {
            return Ok(self.export_all().await.into_result());
        }
        self.export(request.region_group_id()).await
    }

    /// Exports every configured region group
    pub async fn export_all(&self) -> FanOutSummary {
        let groups = self.regions.all_group_ids();
        self.fan_out.run_all(Arc::new(self.clone()), groups).await
    }

    /// Exports a single region group
    pub async fn export(&self, group: &str) -> ExportOutcome<ExportResult> {
        match RegionGroupId::new(group) {
            Ok(group) => self.export_resolved(&group).await,
            Err(_) => self.reject_unknown(group).await,
        }
    }

    async fn export_resolved(&self, group: &RegionGroupId) -> ExportOutcome<ExportResult> {
        let regions = self.regions.to_regions(group);
        let Some(suffix) = self.regions.filename_suffix(group) else {
            return self.reject_unknown(group.as_str()).await;
        };

        let storage_key = self.artifacts.storage_key(&suffix);
        let region_list = format_region_list(&regions);
        let details = format!(
            "[RegionGroup '{}', Regions: {}, StorageKey={}]",
            group, region_list, storage_key
        );

        log_export_start!(group, region_list);
        let started = Instant::now();

        match self.write_artifact(&regions, &storage_key, &details).await {
            Ok(rows) => {
                log_export_complete!(group, storage_key, rows, started.elapsed());
                self.notifier
                    .publish(&format!("INFO: RDB file created, {} rows {}", rows, details))
                    .await;
                Ok(ExportResult::new(
                    rows,
                    format!("Count is rows written to file: {storage_key}"),
                ))
            }
            Err(e) => {
                tracing::error!(
                    region_group = %group,
                    storage_key = %storage_key,
                    error_kind = %e.kind(),
                    error = %e,
                    "Export failed"
                );
                self.notifier
                    .publish(&format!(
                        "ERROR: Error writing RDB file: {} {}",
                        e.cause(),
                        details
                    ))
                    .await;
                Err(e)
            }
        }
    }

    async fn reject_unknown(&self, group: &str) -> ExportOutcome<ExportResult> {
        let error = ExportError::UnknownRegionGroup {
            group: group.to_string(),
        };
        tracing::error!(region_group = %group, "Region group has no filename suffix");
        self.notifier.publish(&format!("ERROR: {error}")).await;
        Err(error)
    }

    /// Stages, fills and commits one artifact, returning the data row count
    ///
    /// The artifact is released when this returns, on every path.
    async fn write_artifact(
        &self,
        regions: &[RegionCode],
        storage_key: &str,
        details: &str,
    ) -> ExportOutcome<u64> {
        let staging_err = |e: RdbError| ExportError::Staging {
            message: e.to_string(),
            details: details.to_string(),
        };
        let format_err = |e: RdbError| ExportError::Format {
            message: e.to_string(),
            details: details.to_string(),
        };
        let fetch_err = |e: RdbError| ExportError::Fetch {
            message: e.to_string(),
            details: details.to_string(),
        };

        let handle = self.artifacts.open(storage_key).map_err(staging_err)?;
        let mut artifact = ScopedArtifact::new(handle);

        let rows = {
            let writer = artifact.writer().map_err(staging_err)?;
            let mut formatter = self.formatters.create(writer);
            formatter.write_header().map_err(format_err)?;

            let parameters = self.parameters.get_parameters().await.map_err(fetch_err)?;
            tracing::debug!(
                storage_key = %storage_key,
                parameters = parameters.len(),
                "Streaming rows"
            );

            self.source
                .stream(regions, &parameters, formatter.as_row_sink())
                .await
                .map_err(|e| match e {
                    RdbError::Format(_) => format_err(e),
                    other => fetch_err(other),
                })?;

            formatter.data_row_count()
        };

        if rows == 0 {
            return Err(ExportError::EmptyArtifact {
                details: details.to_string(),
            });
        }

        artifact
            .commit()
            .await
            .map_err(|e| ExportError::Publish {
                message: e.to_string(),
                details: details.to_string(),
            })?;

        Ok(rows)
    }
}

#[async_trait]
impl GroupExporter for ExportOrchestrator {
    async fn export_group(&self, group: &RegionGroupId) -> ExportOutcome<ExportResult> {
        self.export_resolved(group).await
    }
}

impl std::fmt::Debug for ExportOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportOrchestrator")
            .field("notifier", &self.notifier)
            .field("fan_out", &self.fan_out)
            .finish()
    }
}
