//! Generic CRUD over any entity. Each operation reads or writes through the store with no
//! row cached between calls; the reference check and the write are separate round trips.

use super::validation::{is_truthy, RequestValidator};
use crate::case::{api_to_row, row_to_api, to_camel_case};
use crate::entity::{self, Entity, TableDef, ID_COLUMN};
use crate::error::{AppError, StoreError};
use crate::store::{Row, Store};
use serde_json::{Map, Value};

type InternalError = fn(&TableDef, StoreError) -> AppError;

pub struct CrudService;

impl CrudService {
    /// Every row, ordered by id.
    pub async fn list<E: Entity>(store: &dyn Store) -> Result<Vec<E>, AppError> {
        let table = E::table();
        let rows = store.find_all(table).await.map_err(|e| AppError::fetch(table, e))?;
        rows.into_iter()
            .map(|r| decode_row::<E>(r).map_err(|e| AppError::fetch(table, e)))
            .collect()
    }

    /// One row by primary key. A missing row is not an error.
    pub async fn read<E: Entity>(store: &dyn Store, id: i32) -> Result<Option<E>, AppError> {
        let table = E::table();
        let row = store.find_by_id(table, id).await.map_err(|e| AppError::fetch(table, e))?;
        row.map(|r| decode_row::<E>(r).map_err(|e| AppError::fetch(table, e)))
            .transpose()
    }

    /// Validate, resolve references, trim, insert. Returns the stored record with its new id.
    pub async fn create<E: Entity>(store: &dyn Store, body: Value) -> Result<E, AppError> {
        let table = E::table();
        let body = RequestValidator::body_to_map(body)?;
        RequestValidator::require_complete(&body, table)?;
        let fields = RequestValidator::create_fields(&body, table);
        let draft: E = decode_body(fields.clone())?;
        Self::check_references(store, table, &fields, AppError::fetch).await?;

        let mut row = encode_row(&draft).map_err(|e| AppError::fetch(table, e))?;
        row.remove(ID_COLUMN);
        let inserted = store.insert(table, row).await.map_err(|e| AppError::fetch(table, e))?;
        tracing::debug!(table = table.name, id = ?inserted.get(ID_COLUMN), "created");
        decode_row(inserted).map_err(|e| AppError::fetch(table, e))
    }

    /// Overwrite the truthy fields of `body`, keep the rest. `None` id means an unparsable path id.
    pub async fn update<E: Entity>(store: &dyn Store, id: Option<i32>, body: Value) -> Result<E, AppError> {
        let table = E::table();
        let id = id.ok_or(AppError::NotFound(table.title))?;
        let existing = store
            .find_by_id(table, id)
            .await
            .map_err(|e| AppError::update(table, e))?
            .ok_or(AppError::NotFound(table.title))?;

        let body = RequestValidator::body_to_map(body)?;
        let changes = RequestValidator::truthy_updates(&body, table);
        let mut merged = row_to_api(existing);
        merged.extend(changes.clone());
        decode_body::<E>(merged)?;
        Self::check_references(store, table, &changes, AppError::update).await?;

        let updated = store
            .update(table, id, api_to_row(changes))
            .await
            .map_err(|e| AppError::update(table, e))?
            .ok_or(AppError::NotFound(table.title))?;
        decode_row(updated).map_err(|e| AppError::update(table, e))
    }

    /// Remove and return the row.
    pub async fn delete<E: Entity>(store: &dyn Store, id: Option<i32>) -> Result<E, AppError> {
        let table = E::table();
        let id = id.ok_or(AppError::NotFound(table.title))?;
        let removed = store
            .delete(table, id)
            .await
            .map_err(|e| AppError::update(table, e))?
            .ok_or(AppError::NotFound(table.title))?;
        tracing::debug!(table = table.name, id, "deleted");
        decode_row(removed).map_err(|e| AppError::update(table, e))
    }

    /// Look up every truthy reference field in `fields` (camelCase keys). The first missing target is a 400.
    async fn check_references(
        store: &dyn Store,
        table: &'static TableDef,
        fields: &Map<String, Value>,
        internal: InternalError,
    ) -> Result<(), AppError> {
        for c in table.columns {
            let Some(target) = c.references else { continue };
            let Some(v) = fields.get(&to_camel_case(c.name)).filter(|v| is_truthy(v)) else { continue };
            let target = entity::table(target)
                .ok_or_else(|| internal(table, StoreError::UnknownTable(target.to_string())))?;
            let Some(id) = v.as_i64().and_then(|n| i32::try_from(n).ok()) else {
                return Err(AppError::ReferenceNotFound(target.title));
            };
            let found = store.find_by_id(target, id).await.map_err(|e| internal(table, e))?;
            if found.is_none() {
                return Err(AppError::ReferenceNotFound(target.title));
            }
        }
        Ok(())
    }
}

fn decode_row<E: Entity>(row: Row) -> Result<E, StoreError> {
    Ok(serde_json::from_value(Value::Object(row_to_api(row)))?)
}

fn decode_body<E: Entity>(fields: Map<String, Value>) -> Result<E, AppError> {
    serde_json::from_value(Value::Object(fields)).map_err(|e| AppError::InvalidBody(e.to_string()))
}

fn encode_row<E: Entity>(record: &E) -> Result<Row, StoreError> {
    match serde_json::to_value(record)? {
        Value::Object(obj) => Ok(api_to_row(obj)),
        _ => Ok(Row::new()),
    }
}
