//! Groundwater data sources
//!
//! - [`traits`] - Row and parameter source abstractions
//! - [`postgres`] - PostgreSQL implementation with configured queries

pub mod postgres;
pub mod traits;

pub use postgres::PostgresSource;
pub use traits::{GroundwaterSource, ParameterSource};
