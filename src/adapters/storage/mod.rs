//! Artifact storage
//!
//! - [`traits`] - Object store abstraction
//! - [`s3`] - Amazon S3 backend
//! - [`filesystem`] - Local directory backend
//! - [`key`] - Storage key layout
//! - [`staging`] - Gzip staging in front of an object store
//! - [`checksum`] - SHA-256 of published artifacts

pub mod checksum;
pub mod filesystem;
pub mod key;
pub mod s3;
pub mod staging;
pub mod traits;

pub use filesystem::FilesystemObjectStore;
pub use key::{tier_code, StorageKeyFormat, DEFAULT_DATASET_VERSION, DEFAULT_KEY_PREFIX};
pub use s3::S3ObjectStore;
pub use staging::{StagedArtifact, StagedArtifactStore};
pub use traits::{ObjectStore, RDB_CONTENT_TYPE};
