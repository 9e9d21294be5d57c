//! The data source: one explicitly opened store shared by every router.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::entity::TableDef;
use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// One row keyed by snake_case column name, `id` included.
pub type Row = Map<String, Value>;

/// Query and persistence interface consumed by the CRUD service.
/// Every call is one independent round trip; there is no transaction spanning calls.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_all(&self, table: &'static TableDef) -> Result<Vec<Row>, StoreError>;

    async fn find_by_id(&self, table: &'static TableDef, id: i32) -> Result<Option<Row>, StoreError>;

    /// Insert and return the stored row with its assigned `id`. `row` must not carry `id`.
    async fn insert(&self, table: &'static TableDef, row: Row) -> Result<Row, StoreError>;

    /// Overwrite the given columns. `None` when the row no longer exists.
    async fn update(&self, table: &'static TableDef, id: i32, row: Row) -> Result<Option<Row>, StoreError>;

    /// Remove and return the row. `None` when it did not exist.
    async fn delete(&self, table: &'static TableDef, id: i32) -> Result<Option<Row>, StoreError>;

    /// Cheap liveness check for readiness probes.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Release the underlying connections. Called once at shutdown.
    async fn close(&self);
}
