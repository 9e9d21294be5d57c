//! Resource CRUD handlers, generic over the entity: list, create, read, update, delete.

use crate::entity::Entity;
use crate::error::AppError;
use crate::response::{success_many, success_one};
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

/// Parse a path id the way a lenient integer parser does: optional leading whitespace and sign,
/// then the longest run of decimal digits. `"12abc"` is 12; `"abc"` and out-of-range values are `None`.
pub fn parse_id(raw: &str) -> Option<i32> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let n: i64 = rest[..end].parse().ok()?;
    i32::try_from(if negative { -n } else { n }).ok()
}

pub async fn list<E: Entity>(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = CrudService::list::<E>(state.store.as_ref()).await?;
    Ok(success_many(rows))
}

pub async fn create<E: Entity>(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let record = CrudService::create::<E>(state.store.as_ref(), body).await?;
    Ok(success_one(record))
}

/// An unparsable or unknown id is `{data: null}` with 200, not 404.
pub async fn read<E: Entity>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let record = match parse_id(&id_str) {
        Some(id) => CrudService::read::<E>(state.store.as_ref(), id).await?,
        None => None,
    };
    Ok(success_one(record))
}

pub async fn update<E: Entity>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let record = CrudService::update::<E>(state.store.as_ref(), parse_id(&id_str), body).await?;
    Ok(success_one(record))
}

pub async fn delete<E: Entity>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let record = CrudService::delete::<E>(state.store.as_ref(), parse_id(&id_str)).await?;
    Ok(success_one(record))
}
