//! CrudService: generic CRUD over the entity table definitions.

mod crud;
mod validation;
pub use crud::CrudService;
pub use validation::{is_truthy, RequestValidator};
