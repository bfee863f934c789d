//! Domain models and types for gw-rdb.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`RegionGroupId`], [`RegionCode`])
//! - **Pipeline boundary values** ([`ExportRequest`], [`ExportResult`])
//! - **Reference data** ([`Parameter`], [`ParameterSet`])
//! - **Error types** ([`RdbError`], [`ExportError`])
//! - **Result type aliases** ([`Result`], [`ExportOutcome`])
//!
//! # Error Handling
//!
//! Adapters and setup code return [`Result<T>`], which uses [`RdbError`].
//! A region group export returns [`ExportOutcome<T>`], whose error side is the
//! tagged union [`ExportError`]:
//!
//! ```rust
//! use gw_rdb::domain::{ExportError, ExportErrorKind};
//!
//! let err = ExportError::UnknownRegionGroup { group: "Atlantis".to_string() };
//! assert_eq!(err.kind(), ExportErrorKind::UnknownRegionGroup);
//! ```

pub mod errors;
pub mod ids;
pub mod parameter;
pub mod request;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{ExportError, ExportErrorKind, RdbError};
pub use ids::{RegionCode, RegionGroupId};
pub use parameter::{Parameter, ParameterSet};
pub use request::{ExportRequest, ExportResult};
pub use result::{ExportOutcome, Result};
