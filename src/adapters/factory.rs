//! Collaborator factory
//!
//! This module builds the concrete adapters selected by configuration and
//! wires them into an [`ExportOrchestrator`].

use crate::adapters::notify::SnsTransport;
use crate::adapters::regions::ConfiguredRegionResolver;
use crate::adapters::source::PostgresSource;
use crate::adapters::storage::{
    FilesystemObjectStore, ObjectStore, S3ObjectStore, StagedArtifactStore, StorageKeyFormat,
};
use crate::config::schema::{RdbConfig, StorageBackend, StorageConfig};
use crate::core::export::{ExportOrchestrator, FanOutInvoker};
use crate::core::notify::{channel_name, Notifier};
use crate::domain::{RdbError, Result};
use std::sync::Arc;

/// Create the object store selected by `storage.backend`
///
/// # Errors
///
/// Returns an error if the backend section is missing or the store cannot be created
pub async fn create_object_store(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>> {
    match config.backend {
        StorageBackend::S3 => {
            let s3_config = config.s3.as_ref().ok_or_else(|| {
                RdbError::Configuration("storage.s3 configuration is missing".to_string())
            })?;

            tracing::info!(
                bucket = %s3_config.bucket,
                region = %s3_config.region,
                "Creating S3 object store"
            );
            Ok(Arc::new(S3ObjectStore::new(s3_config).await?) as Arc<dyn ObjectStore>)
        }
        StorageBackend::Filesystem => {
            let fs_config = config.filesystem.as_ref().ok_or_else(|| {
                RdbError::Configuration("storage.filesystem configuration is missing".to_string())
            })?;

            tracing::info!(root = %fs_config.root, "Creating filesystem object store");
            Ok(Arc::new(FilesystemObjectStore::new(&fs_config.root)?) as Arc<dyn ObjectStore>)
        }
    }
}

/// Create the staging artifact store in front of the configured object store
pub async fn create_artifact_store(config: &RdbConfig) -> Result<StagedArtifactStore> {
    let object_store = create_object_store(&config.storage).await?;
    let key_format = StorageKeyFormat::new(
        config.storage.key_prefix.clone(),
        &config.application.tier,
        config.storage.dataset_version.clone(),
    );

    let store = StagedArtifactStore::new(object_store, key_format);
    Ok(match &config.storage.staging_dir {
        Some(dir) => store.with_staging_dir(dir),
        None => store,
    })
}

/// Create the notifier for the configured tier
///
/// Disabled notifications produce a log-only notifier without contacting SNS.
pub async fn create_notifier(config: &RdbConfig) -> Notifier {
    if !config.notification.enabled {
        tracing::info!("Notifications disabled by configuration");
        return Notifier::disabled();
    }

    let transport = SnsTransport::new(config.notification.region.as_deref()).await;
    let name = channel_name(&config.notification.topic_base_name, &config.application.tier);
    Notifier::connect(Arc::new(transport), &name).await
}

/// Create the PostgreSQL source
pub fn create_source(config: &RdbConfig) -> Result<Arc<PostgresSource>> {
    tracing::info!("Creating PostgreSQL source");
    Ok(Arc::new(PostgresSource::new(config.source.clone())?))
}

/// Build an orchestrator from configuration using an existing source
pub async fn build_orchestrator_with_source(
    config: &RdbConfig,
    source: Arc<PostgresSource>,
) -> Result<ExportOrchestrator> {
    let regions = ConfiguredRegionResolver::from_config(&config.regions)?;
    if regions.is_empty() {
        tracing::warn!("No region groups configured");
    }

    let artifacts = create_artifact_store(config).await?;
    let notifier = create_notifier(config).await;

    Ok(ExportOrchestrator::new(
        Arc::new(regions),
        Arc::new(artifacts),
        source.clone(),
        source,
        Arc::new(notifier),
    )
    .with_fan_out(FanOutInvoker::new(config.fan_out.max_concurrency)))
}

/// Build an orchestrator from configuration
///
/// # Errors
///
/// Returns an error if any collaborator cannot be created
pub async fn build_orchestrator(config: &RdbConfig) -> Result<ExportOrchestrator> {
    let source = create_source(config)?;
    build_orchestrator_with_source(config, source).await
}
