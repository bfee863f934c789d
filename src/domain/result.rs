//! Result type aliases for gw-rdb

use super::errors::{ExportError, RdbError};

/// Result type alias for gw-rdb operations
///
/// # Examples
///
/// ```
/// use gw_rdb::domain::result::Result;
/// use gw_rdb::domain::errors::RdbError;
///
/// fn failing_function() -> Result<()> {
///     Err(RdbError::Configuration("missing bucket".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, RdbError>;

/// Outcome of one region group export
pub type ExportOutcome<T> = std::result::Result<T, ExportError>;
