//! Typed errors and HTTP mapping.

use crate::entity::TableDef;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Failures inside the data source.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    /// Named after the constraint, as PostgreSQL reports it (`doctor_hospital_id_key`).
    #[error("duplicate value violates unique constraint {constraint}")]
    UniqueViolation { constraint: String },
    /// A delete or write that would leave a dangling reference (`fk_patient_doctor_id`).
    #[error("foreign key constraint {constraint} violated")]
    ForeignKeyViolation { constraint: String },
    #[error("unknown table: {0}")]
    UnknownTable(String),
    #[error("invalid database url: {0}")]
    InvalidUrl(String),
    #[error("row decode: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    /// A required field is missing or falsy.
    #[error("{0} data is not complete")]
    Incomplete(&'static str),
    /// A reference field points at a row that does not exist.
    #[error("{0} with given ID not found")]
    ReferenceNotFound(&'static str),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    /// Anything else. Only `message` reaches the client; `source` is logged.
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// 500 used by list, create and read.
    pub fn fetch(table: &TableDef, source: StoreError) -> Self {
        AppError::Internal {
            message: format!("Could not fetch {}", table.plural),
            source,
        }
    }

    /// 500 used by update and delete.
    pub fn update(table: &TableDef, source: StoreError) -> Self {
        AppError::Internal {
            message: format!("Could not update {}", table.singular),
            source,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Incomplete(_) | AppError::ReferenceNotFound(_) | AppError::InvalidBody(_) => {
                (StatusCode::BAD_REQUEST, "bad_request")
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Internal { message, source } => {
                tracing::error!(error = %source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
