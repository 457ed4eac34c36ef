//! MySQL reporting provider.
//!
//! Reads pre-built `vw_*` views through a bounded connection pool. Callers
//! beyond the pool size wait for a free connection.

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use super::row_decode::decode_row;
use super::{ReportRepository, RepositoryResult};
use crate::config::{MySqlSettings, Provider};
use crate::filters::{FilterMap, FilterValue};
use crate::model::Record;
use crate::sql::{MySql, ViewQuery};

const LIST_PROPERTIES: &str =
    "SELECT property_id, name AS property_name FROM property ORDER BY name";

const LIST_BOARD_MEMBERS: &str = "SELECT user_id, full_name FROM user ORDER BY full_name";

const PING: &str = "SELECT 1 AS ok";

/// Repository over the MySQL reporting views.
#[derive(Debug, Clone)]
pub struct MySqlReportRepository {
    pool: MySqlPool,
}

impl MySqlReportRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Create the pool without opening a connection yet.
    pub fn connect_lazy(settings: &MySqlSettings) -> Self {
        tracing::info!(
            url = %settings.display_url(),
            pool_size = settings.pool_size,
            "configuring MySQL reporting pool"
        );
        let pool = MySqlPoolOptions::new()
            .max_connections(settings.pool_size)
            .acquire_timeout(settings.acquire_timeout())
            .connect_lazy_with(settings.connect_options());
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    async fn fetch_records(&self, sql: &str) -> RepositoryResult<Vec<Record>> {
        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;
        let records = rows.iter().map(decode_row).collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}

#[async_trait]
impl ReportRepository for MySqlReportRepository {
    fn provider(&self) -> Provider {
        Provider::MySql
    }

    async fn query_view(&self, view: &str, filters: &FilterMap) -> RepositoryResult<Vec<Record>> {
        let query = ViewQuery::with_filters(view, filters)?;
        let sql = query.to_sql(&MySql);
        tracing::debug!(%sql, params = query.predicate_count(), "querying report view");

        let mut statement = sqlx::query(&sql);
        for value in query.params() {
            statement = match value {
                FilterValue::Int(n) => statement.bind(*n),
                FilterValue::Float(f) => statement.bind(*f),
                FilterValue::Text(s) => statement.bind(s.clone()),
            };
        }

        let rows = statement.fetch_all(&self.pool).await?;
        let records = rows.iter().map(decode_row).collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    async fn list_properties(&self) -> RepositoryResult<Vec<Record>> {
        self.fetch_records(LIST_PROPERTIES).await
    }

    async fn list_board_members(&self) -> RepositoryResult<Vec<Record>> {
        self.fetch_records(LIST_BOARD_MEMBERS).await
    }

    async fn ping(&self) -> RepositoryResult<bool> {
        let ok: i64 = sqlx::query_scalar(PING).fetch_one(&self.pool).await?;
        Ok(ok == 1)
    }
}
