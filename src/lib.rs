//! Hospital API: REST backend over doctors, hospitals, patients, prescriptions, visits and doctor histories.

pub mod case;
pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{AppConfig, StoreKind};
pub use entity::{Doctor, DoctorHistory, Entity, Hospital, Patient, Prescription, TableDef, Visit};
pub use error::{AppError, ConfigError, StoreError};
pub use migration::ensure_schema;
pub use response::{success_many, success_one};
pub use routes::{api_routes, app_router, common_routes, resource_routes};
pub use service::CrudService;
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryStore, PgStore, Row, Store};
