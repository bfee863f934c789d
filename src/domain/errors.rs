//! Domain error types
//!
//! Two layers of errors live here:
//!
//! - [`RdbError`] is the ambient error of adapters, configuration and setup
//!   code. Third-party error types are flattened into strings so they never
//!   leak through the public API.
//! - [`ExportError`] is the per-invocation outcome of a single region group
//!   export. Every variant is fatal for that invocation and carries the
//!   details string used in operational notifications.

use thiserror::Error;

/// Main gw-rdb error type
#[derive(Debug, Error)]
pub enum RdbError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Source database errors (connection, query, row decoding)
    #[error("Database error: {0}")]
    Database(String),

    /// Object storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Local staging errors (temp files, compression)
    #[error("Staging error: {0}")]
    Staging(String),

    /// RDB formatting errors (header or row write failures)
    #[error("Format error: {0}")]
    Format(String),

    /// Notification transport errors
    #[error("Notification error: {0}")]
    Notification(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// A region group export failed
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Failure of a single region group export
///
/// Variants are matched by the fan-out invoker to build the aggregate summary,
/// so they are cheap to clone and compare.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExportError {
    /// The region group resolved to no filename suffix
    #[error("Given region group has no filename suffix: {group}")]
    UnknownRegionGroup { group: String },

    /// The export produced zero data rows; publishing it would wipe the group downstream
    #[error("empty RDB file created. {details}")]
    EmptyArtifact { details: String },

    /// The local staging file could not be created or written
    #[error("staging failed: {message} {details}")]
    Staging { message: String, details: String },

    /// The staged artifact could not be published to durable storage
    #[error("publish failed: {message} {details}")]
    Publish { message: String, details: String },

    /// The RDB header or a data row could not be written
    #[error("format failed: {message} {details}")]
    Format { message: String, details: String },

    /// The parameter or groundwater data fetch failed
    #[error("fetch failed: {message} {details}")]
    Fetch { message: String, details: String },

    /// The export task ended without producing an outcome (panic or cancellation)
    #[error("export aborted: {message}")]
    Aborted { message: String },
}

/// Coarse classification of an [`ExportError`], used for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportErrorKind {
    UnknownRegionGroup,
    EmptyArtifact,
    Staging,
    Publish,
    Format,
    Fetch,
    Aborted,
}

impl ExportError {
    /// Returns the kind of this error
    pub fn kind(&self) -> ExportErrorKind {
        match self {
            ExportError::UnknownRegionGroup { .. } => ExportErrorKind::UnknownRegionGroup,
            ExportError::EmptyArtifact { .. } => ExportErrorKind::EmptyArtifact,
            ExportError::Staging { .. } => ExportErrorKind::Staging,
            ExportError::Publish { .. } => ExportErrorKind::Publish,
            ExportError::Format { .. } => ExportErrorKind::Format,
            ExportError::Fetch { .. } => ExportErrorKind::Fetch,
            ExportError::Aborted { .. } => ExportErrorKind::Aborted,
        }
    }

    /// Describes the failure without the details string
    pub fn cause(&self) -> String {
        match self {
            ExportError::UnknownRegionGroup { group } => {
                format!("Given region group has no filename suffix: {group}")
            }
            ExportError::EmptyArtifact { .. } => "empty RDB file created.".to_string(),
            ExportError::Staging { message, .. } => format!("staging failed: {message}"),
            ExportError::Publish { message, .. } => format!("publish failed: {message}"),
            ExportError::Format { message, .. } => format!("format failed: {message}"),
            ExportError::Fetch { message, .. } => format!("fetch failed: {message}"),
            ExportError::Aborted { message } => format!("export aborted: {message}"),
        }
    }

    /// Returns the contextual details string, if the error carries one
    pub fn details(&self) -> Option<&str> {
        match self {
            ExportError::UnknownRegionGroup { .. } | ExportError::Aborted { .. } => None,
            ExportError::EmptyArtifact { details }
            | ExportError::Staging { details, .. }
            | ExportError::Publish { details, .. }
            | ExportError::Format { details, .. }
            | ExportError::Fetch { details, .. } => Some(details),
        }
    }
}

impl std::fmt::Display for ExportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExportErrorKind::UnknownRegionGroup => "unknown_region_group",
            ExportErrorKind::EmptyArtifact => "empty_artifact",
            ExportErrorKind::Staging => "staging",
            ExportErrorKind::Publish => "publish",
            ExportErrorKind::Format => "format",
            ExportErrorKind::Fetch => "fetch",
            ExportErrorKind::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for RdbError {
    fn from(err: std::io::Error) -> Self {
        RdbError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for RdbError {
    fn from(err: serde_json::Error) -> Self {
        RdbError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for RdbError {
    fn from(err: toml::de::Error) -> Self {
        RdbError::Configuration(format!("TOML parse error: {err}"))
    }
}
