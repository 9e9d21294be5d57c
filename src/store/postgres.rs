//! PostgreSQL-backed store: one pool, parameterized queries from the SQL builder.

use super::{Row, Store};
use crate::config::AppConfig;
use crate::entity::TableDef;
use crate::error::StoreError;
use crate::sql::{self, PgBindValue, QueryBuf};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::ConnectOptions;
use std::str::FromStr;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    schema: String,
}

impl PgStore {
    /// Open the pool described by `config`. Does not create the schema; see [`PgStore::ensure_schema`].
    pub async fn connect(config: &AppConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        tracing::info!(schema = %config.schema, "connected to database");
        Ok(Self::from_pool(pool, config.schema.clone()))
    }

    pub fn from_pool(pool: PgPool, schema: impl Into<String>) -> Self {
        PgStore {
            pool,
            schema: schema.into(),
        }
    }

    /// Create the schema and all tables if missing.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        crate::migration::ensure_schema(&self.pool, &self.schema).await
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<Row>, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let row = query.fetch_optional(&self.pool).await.map_err(classify)?;
        Ok(row.map(|r| row_to_json(&r)))
    }

    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<Row>, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let rows = query.fetch_all(&self.pool).await.map_err(classify)?;
        Ok(rows.iter().map(row_to_json).collect())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_all(&self, table: &'static TableDef) -> Result<Vec<Row>, StoreError> {
        self.fetch_all(&sql::select_all(&self.schema, table)).await
    }

    async fn find_by_id(&self, table: &'static TableDef, id: i32) -> Result<Option<Row>, StoreError> {
        self.fetch_optional(&sql::select_by_id(&self.schema, table, id)).await
    }

    async fn insert(&self, table: &'static TableDef, row: Row) -> Result<Row, StoreError> {
        self.fetch_optional(&sql::insert(&self.schema, table, &row))
            .await?
            .ok_or(StoreError::Db(sqlx::Error::RowNotFound))
    }

    async fn update(&self, table: &'static TableDef, id: i32, row: Row) -> Result<Option<Row>, StoreError> {
        self.fetch_optional(&sql::update(&self.schema, table, id, &row)).await
    }

    async fn delete(&self, table: &'static TableDef, id: i32) -> Result<Option<Row>, StoreError> {
        self.fetch_optional(&sql::delete(&self.schema, table, id)).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("database pool closed");
    }
}

/// Constraint violations become their own variants; everything else stays a plain database error.
fn classify(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &e {
        let constraint = db.constraint().unwrap_or_default().to_string();
        if db.is_unique_violation() {
            return StoreError::UniqueViolation { constraint };
        }
        if db.is_foreign_key_violation() {
            return StoreError::ForeignKeyViolation { constraint };
        }
    }
    StoreError::Db(e)
}

fn row_to_json(row: &PgRow) -> Row {
    use sqlx::Column;
    use sqlx::Row as _;
    let mut map = Row::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    map
}

/// Decode one cell by trying the column types the tables use. NULL and unknown types become `Value::Null`.
fn cell_to_value(row: &PgRow, name: &str) -> Value {
    use sqlx::Row as _;
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDate>, _>(name) {
        return Value::String(d.format("%Y-%m-%d").to_string());
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    if let Ok(Some(j)) = row.try_get::<Option<Value>, _>(name) {
        return j;
    }
    Value::Null
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before opening the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| StoreError::InvalidUrl(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", sql::quoted(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

/// Split `postgres://host/db?opts` into (`postgres://host/postgres`, `db`).
fn parse_db_name_from_url(url: &str) -> Result<(String, String), StoreError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| StoreError::InvalidUrl("no database path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}
