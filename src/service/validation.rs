//! Request body checks: completeness on create, truthy-only partial updates.
//!
//! Presence is judged by truthiness: `null`, `false`, `0`, `NaN` and `""` count as missing,
//! exactly like an absent key. A PUT therefore cannot clear a field or set it to zero.

use crate::case::to_camel_case;
use crate::entity::TableDef;
use crate::error::AppError;
use serde_json::{Map, Value};

pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub struct RequestValidator;

impl RequestValidator {
    pub fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
        match value {
            Value::Object(m) => Ok(m),
            _ => Err(AppError::InvalidBody("body must be a JSON object".into())),
        }
    }

    /// Every required column must be present and truthy.
    pub fn require_complete(body: &Map<String, Value>, table: &TableDef) -> Result<(), AppError> {
        let complete = table
            .columns
            .iter()
            .filter(|c| c.required)
            .all(|c| body.get(&to_camel_case(c.name)).map(is_truthy).unwrap_or(false));
        if complete {
            Ok(())
        } else {
            Err(AppError::Incomplete(table.title))
        }
    }

    /// Fields for a new row: known columns only (unknown keys and `id` are dropped), trim applied.
    pub fn create_fields(body: &Map<String, Value>, table: &TableDef) -> Map<String, Value> {
        let mut out = Map::new();
        for c in table.columns {
            let key = to_camel_case(c.name);
            let Some(v) = body.get(&key) else { continue };
            let v = match v {
                Value::String(s) if c.trim => Value::String(s.trim().to_string()),
                other => other.clone(),
            };
            out.insert(key, v);
        }
        out
    }

    /// Fields a PUT overwrites: known columns whose value is truthy. Values are stored as sent.
    pub fn truthy_updates(body: &Map<String, Value>, table: &TableDef) -> Map<String, Value> {
        table
            .columns
            .iter()
            .map(|c| to_camel_case(c.name))
            .filter_map(|key| {
                body.get(&key)
                    .filter(|v| is_truthy(v))
                    .cloned()
                    .map(|v| (key, v))
            })
            .collect()
    }
}
