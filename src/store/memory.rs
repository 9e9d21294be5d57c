//! In-process store with the same contract as PostgreSQL: serial ids, unique columns, no deleting referenced rows.

use super::{Row, Store};
use crate::entity::{tables, TableDef, ID_COLUMN};
use crate::error::StoreError;
use crate::migration::{foreign_key_name, unique_constraint_name};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct MemTable {
    next_id: i32,
    rows: BTreeMap<i32, Row>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<&'static str, MemTable>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<&'static str, MemTable>> {
        // Mutations are applied whole, so a poisoned lock still guards consistent maps.
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Fill in every column so stored rows have the same shape as a SELECT.
fn normalize(table: &TableDef, id: i32, mut row: Row) -> Row {
    let mut out = Row::new();
    out.insert(ID_COLUMN.to_string(), Value::from(id));
    for c in table.columns {
        out.insert(c.name.to_string(), row.remove(c.name).unwrap_or(Value::Null));
    }
    out
}

fn check_unique(table: &'static TableDef, rows: &BTreeMap<i32, Row>, candidate: &Row, self_id: i32) -> Result<(), StoreError> {
    for c in table.columns.iter().filter(|c| c.unique) {
        let Some(v) = candidate.get(c.name).filter(|v| !v.is_null()) else { continue };
        let clash = rows
            .iter()
            .any(|(id, r)| *id != self_id && r.get(c.name) == Some(v));
        if clash {
            return Err(StoreError::UniqueViolation {
                constraint: unique_constraint_name(table.name, c.name),
            });
        }
    }
    Ok(())
}

/// Refuse to remove a row another table still points at, like `ON DELETE NO ACTION`.
fn check_not_referenced(tables_by_name: &HashMap<&'static str, MemTable>, table: &TableDef, id: i32) -> Result<(), StoreError> {
    let target = Value::from(id);
    for t in tables() {
        let Some(mem) = tables_by_name.get(t.name) else { continue };
        for c in t.columns.iter().filter(|c| c.references == Some(table.name)) {
            if mem.rows.values().any(|r| r.get(c.name) == Some(&target)) {
                return Err(StoreError::ForeignKeyViolation {
                    constraint: foreign_key_name(t.name, c.name),
                });
            }
        }
    }
    Ok(())
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_all(&self, table: &'static TableDef) -> Result<Vec<Row>, StoreError> {
        let tables = self.lock();
        Ok(tables
            .get(table.name)
            .map(|t| t.rows.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_by_id(&self, table: &'static TableDef, id: i32) -> Result<Option<Row>, StoreError> {
        let tables = self.lock();
        Ok(tables.get(table.name).and_then(|t| t.rows.get(&id).cloned()))
    }

    async fn insert(&self, table: &'static TableDef, row: Row) -> Result<Row, StoreError> {
        let mut tables = self.lock();
        let t = tables.entry(table.name).or_default();
        let id = t.next_id + 1;
        let row = normalize(table, id, row);
        check_unique(table, &t.rows, &row, id)?;
        t.next_id = id;
        t.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, table: &'static TableDef, id: i32, row: Row) -> Result<Option<Row>, StoreError> {
        let mut tables = self.lock();
        let Some(t) = tables.get_mut(table.name) else { return Ok(None) };
        let Some(existing) = t.rows.get(&id) else { return Ok(None) };
        let mut merged = existing.clone();
        for c in table.columns {
            if let Some(v) = row.get(c.name) {
                merged.insert(c.name.to_string(), v.clone());
            }
        }
        check_unique(table, &t.rows, &merged, id)?;
        t.rows.insert(id, merged.clone());
        Ok(Some(merged))
    }

    async fn delete(&self, table: &'static TableDef, id: i32) -> Result<Option<Row>, StoreError> {
        let mut tables = self.lock();
        let exists = tables.get(table.name).is_some_and(|t| t.rows.contains_key(&id));
        if !exists {
            return Ok(None);
        }
        check_not_referenced(&tables, table, id)?;
        Ok(tables.get_mut(table.name).and_then(|t| t.rows.remove(&id)))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{doctor, doctor_history, patient};
    use serde_json::json;

    fn row(v: Value) -> Row {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn assigns_increasing_ids_and_never_reuses_them() {
        let store = MemoryStore::new();
        let a = store
            .insert(&doctor_history::TABLE, row(json!({"previous_employer": "A", "education": "MD"})))
            .await
            .unwrap();
        assert_eq!(a["id"], json!(1));
        assert_eq!(a["notes"], Value::Null);
        store.delete(&doctor_history::TABLE, 1).await.unwrap();
        let b = store
            .insert(&doctor_history::TABLE, row(json!({"previous_employer": "B", "education": "MD"})))
            .await
            .unwrap();
        assert_eq!(b["id"], json!(2));
    }

    #[tokio::test]
    async fn enforces_unique_columns() {
        let store = MemoryStore::new();
        store
            .insert(&doctor::TABLE, row(json!({"hospital_id": 1, "doctor_history_id": 1})))
            .await
            .unwrap();
        let err = store
            .insert(&doctor::TABLE, row(json!({"hospital_id": 1, "doctor_history_id": 2})))
            .await
            .unwrap_err();
        match err {
            StoreError::UniqueViolation { constraint } => assert_eq!(constraint, "doctor_hospital_id_key"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn update_and_delete_missing_rows_return_none() {
        let store = MemoryStore::new();
        assert!(store.update(&doctor::TABLE, 5, Row::new()).await.unwrap().is_none());
        assert!(store.delete(&doctor::TABLE, 5).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_of_referenced_row_is_refused() {
        let store = MemoryStore::new();
        store
            .insert(&doctor::TABLE, row(json!({"hospital_id": 1, "doctor_history_id": 1})))
            .await
            .unwrap();
        store
            .insert(&patient::TABLE, row(json!({"doctor_id": 1, "first_name": "Mari"})))
            .await
            .unwrap();
        let err = store.delete(&doctor::TABLE, 1).await.unwrap_err();
        match err {
            StoreError::ForeignKeyViolation { constraint } => assert_eq!(constraint, "fk_patient_doctor_id"),
            other => panic!("unexpected error: {}", other),
        }
        assert!(store.find_by_id(&doctor::TABLE, 1).await.unwrap().is_some());

        store.delete(&patient::TABLE, 1).await.unwrap();
        assert!(store.delete(&doctor::TABLE, 1).await.unwrap().is_some());
    }
}
