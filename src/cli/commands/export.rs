//! Export command implementation
//!
//! This module implements the `export` command, which exports one region
//! group or, with `ALL`, every configured group.

use crate::adapters::factory::{build_orchestrator_with_source, create_source};
use crate::config::load_config;
use crate::core::export::{ExportOrchestrator, FanOutSummary};
use crate::domain::{ExportRequest, ExportResult, RdbError, RegionGroupId};
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Region group to export, or ALL
    #[arg(short, long, default_value = RegionGroupId::ALL)]
    pub group: String,

    /// Request as JSON, e.g. {"regionGroupId": "Wisconsin"}; overrides --group
    #[arg(long, value_name = "JSON")]
    pub request: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl ExportArgs {
    /// Builds the request from the arguments
    pub fn to_request(&self) -> Result<ExportRequest, serde_json::Error> {
        match &self.request {
            Some(json) => serde_json::from_str(json),
            None => Ok(ExportRequest::new(self.group.clone())),
        }
    }

    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let request = match self.to_request() {
            Ok(request) => request,
            Err(e) => {
                eprintln!("Invalid export request: {e}");
                return Ok(2);
            }
        };

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let source = match create_source(&config) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("Failed to initialize source: {e}");
                return Ok(2);
            }
        };
        if let Err(e) = source.test_connection().await {
            tracing::error!(error = %e, "Source connection failed");
            eprintln!("Failed to connect to source database: {e}");
            return Ok(4); // Connection error exit code
        }

        let orchestrator = match build_orchestrator_with_source(&config, source).await {
            Ok(o) => o,
            Err(e @ RdbError::Configuration(_)) => {
                eprintln!("Failed to initialize export: {e}");
                return Ok(2);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export orchestrator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(4);
            }
        };

        if request.is_all() {
            self.run_all(&orchestrator).await
        } else {
            self.run_one(&orchestrator, &request).await
        }
    }

    async fn run_all(&self, orchestrator: &ExportOrchestrator) -> anyhow::Result<i32> {
        let summary = orchestrator.export_all().await;
        let exit_code = if summary.is_successful() { 0 } else { 1 };

        if self.json {
            self.print_json(&summary.into_result())?;
        } else {
            print_summary(&summary);
        }
        Ok(exit_code)
    }

    async fn run_one(
        &self,
        orchestrator: &ExportOrchestrator,
        request: &ExportRequest,
    ) -> anyhow::Result<i32> {
        match orchestrator.run(request).await {
            Ok(result) => {
                if self.json {
                    self.print_json(&result)?;
                } else {
                    println!("Export completed: {} rows", result.row_count());
                    println!("  {}", result.message());
                }
                Ok(0)
            }
            Err(e) => {
                eprintln!("Export failed: {e}");
                Ok(1)
            }
        }
    }

    fn print_json(&self, result: &ExportResult) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(result)?);
        Ok(())
    }
}

fn print_summary(summary: &FanOutSummary) {
    println!();
    println!("Export Summary:");
    println!("  Region groups: {}", summary.total_groups());
    println!("  Successful: {}", summary.successful_groups());
    println!(
        "  Failed: {}",
        summary.total_groups() - summary.successful_groups()
    );
    println!("  Rows written: {}", summary.total_rows());
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());

    let failures = summary.failures();
    if !failures.is_empty() {
        println!();
        println!("Failures:");
        for (group, error) in failures {
            println!("  - {group} ({}): {error}", error.kind());
        }
    }
    println!();
}
