//! Groundwater data source abstractions

use crate::core::rdb::RowSink;
use crate::domain::{ParameterSet, RegionCode, Result};
use async_trait::async_trait;

/// Streams pre-formatted RDB data rows
#[async_trait]
pub trait GroundwaterSource: Send + Sync {
    /// Writes every row for `regions` and `parameters` into `sink`, in order
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::RdbError::Database`] on transport failures and
    /// passes sink errors through unchanged.
    async fn stream(
        &self,
        regions: &[RegionCode],
        parameters: &ParameterSet,
        sink: &mut dyn RowSink,
    ) -> Result<()>;
}

/// Supplies the parameter codes included in an export
#[async_trait]
pub trait ParameterSource: Send + Sync {
    async fn get_parameters(&self) -> Result<ParameterSet>;
}
