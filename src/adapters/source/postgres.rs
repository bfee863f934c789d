//! PostgreSQL groundwater source
//!
//! The row and parameter queries come from configuration. The rows query is
//! called with the region list as `$1` and the parameter codes as `$2`, both
//! `text[]`. Every selected column must be text; a row's columns are joined
//! with tabs and NULL renders as an empty field.

use super::traits::{GroundwaterSource, ParameterSource};
use crate::config::SourceConfig;
use crate::core::rdb::RowSink;
use crate::domain::{Parameter, ParameterSet, RdbError, RegionCode, Result};
use async_trait::async_trait;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use futures::{pin_mut, TryStreamExt};
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_postgres::types::ToSql;
use tokio_postgres::{NoTls, Row};

/// Field separator inside a data row
const FIELD_SEPARATOR: &str = "\t";

/// Pooled PostgreSQL source
pub struct PostgresSource {
    pool: Pool,
    config: SourceConfig,
}

impl PostgresSource {
    /// Create a new source
    ///
    /// The pool connects lazily; use [`PostgresSource::test_connection`] to
    /// check reachability up front.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string cannot be parsed or the pool
    /// cannot be built.
    pub fn new(config: SourceConfig) -> Result<Self> {
        let pg_config: tokio_postgres::Config = config
            .connection_string
            .expose_secret()
            .as_ref()
            .parse()
            .map_err(|e| {
                RdbError::Configuration(format!("Invalid PostgreSQL connection string: {}", e))
            })?;

        let manager_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let manager = Manager::from_config(pg_config, NoTls, manager_config);
        let timeout = Duration::from_secs(config.connection_timeout_seconds);

        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .wait_timeout(Some(timeout))
            .create_timeout(Some(timeout))
            .recycle_timeout(Some(timeout))
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| RdbError::Database(format!("Failed to create connection pool: {}", e)))?;

        Ok(Self { pool, config })
    }

    /// Checks that a connection can be obtained and used
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.connection().await?;
        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| RdbError::Database(format!("Connection test failed: {}", e)))?;

        tracing::info!("PostgreSQL connection test successful");
        Ok(())
    }

    /// Gets a pooled connection with the configured statement timeout applied
    async fn connection(&self) -> Result<deadpool_postgres::Object> {
        let client = self.pool.get().await.map_err(|e| {
            RdbError::Database(format!("Failed to get connection from pool: {}", e))
        })?;

        let timeout_query = format!(
            "SET statement_timeout = {}",
            self.config.statement_timeout_seconds * 1000
        );
        client
            .batch_execute(&timeout_query)
            .await
            .map_err(|e| RdbError::Database(format!("Failed to set statement timeout: {}", e)))?;

        Ok(client)
    }
}

#[async_trait]
impl GroundwaterSource for PostgresSource {
    async fn stream(
        &self,
        regions: &[RegionCode],
        parameters: &ParameterSet,
        sink: &mut dyn RowSink,
    ) -> Result<()> {
        let client = self.connection().await?;

        let (region_list, parameter_codes) = rows_query_args(regions, parameters);
        let params: [&(dyn ToSql + Sync); 2] = [&region_list, &parameter_codes];

        let statement = client
            .prepare_cached(&self.config.rows_query)
            .await
            .map_err(|e| RdbError::Database(format!("Failed to prepare rows query: {}", e)))?;

        let rows = client
            .query_raw(&statement, params.iter().map(|p| *p as &dyn ToSql))
            .await
            .map_err(|e| RdbError::Database(format!("Rows query failed: {}", e)))?;
        pin_mut!(rows);

        let mut count: u64 = 0;
        while let Some(row) = rows
            .try_next()
            .await
            .map_err(|e| RdbError::Database(format!("Failed to read row: {}", e)))?
        {
            sink.write_row(&render_row(&row)?)?;
            count += 1;
        }

        tracing::debug!(rows = count, regions = regions.len(), "Streamed groundwater rows");
        Ok(())
    }
}

#[async_trait]
impl ParameterSource for PostgresSource {
    async fn get_parameters(&self) -> Result<ParameterSet> {
        let client = self.connection().await?;

        let rows = client
            .query(self.config.parameters_query.as_str(), &[])
            .await
            .map_err(|e| RdbError::Database(format!("Parameters query failed: {}", e)))?;

        let parameters = rows
            .iter()
            .map(|row| -> std::result::Result<Parameter, tokio_postgres::Error> {
                let code: String = row.try_get(0)?;
                let below_land_surface: bool = row.try_get(1)?;
                let above_datum: bool = row.try_get(2)?;
                Ok(Parameter::new(code, below_land_surface, above_datum))
            })
            .collect::<std::result::Result<Vec<_>, tokio_postgres::Error>>()
            .map_err(|e| RdbError::Database(format!("Invalid parameter row: {}", e)))?;

        tracing::debug!(parameters = parameters.len(), "Loaded parameters");
        Ok(ParameterSet::new(parameters))
    }
}

/// Bind values for the rows query: `$1` regions, `$2` parameter codes
fn rows_query_args(
    regions: &[RegionCode],
    parameters: &ParameterSet,
) -> (Vec<String>, Vec<String>) {
    let region_list = regions.iter().map(|r| r.as_str().to_string()).collect();
    (region_list, parameters.codes())
}

fn render_row(row: &Row) -> Result<String> {
    let fields = (0..row.len())
        .map(|i| row.try_get::<_, Option<String>>(i).map(Option::unwrap_or_default))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| RdbError::Database(format!("Row column is not text: {}", e)))?;
    Ok(fields.join(FIELD_SEPARATOR))
}
