//! Safe parameterized SQL for the table definitions.

mod builder;
mod params;

pub use builder::{delete, insert, select_all, select_by_id, update, QueryBuf};
pub(crate) use builder::{qualified_table, quoted};
pub use params::PgBindValue;
