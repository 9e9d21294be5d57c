//! Table definitions and the record types mapped onto them.
//! Each table has a serial `id` primary key plus the columns listed in its `TableDef`.

pub mod doctor;
pub mod doctor_history;
pub mod hospital;
pub mod patient;
pub mod prescription;
pub mod visit;

pub use doctor::Doctor;
pub use doctor_history::DoctorHistory;
pub use hospital::Hospital;
pub use patient::Patient;
pub use prescription::Prescription;
pub use visit::Visit;

use serde::{de::DeserializeOwned, Serialize};

/// Primary key column shared by every table.
pub const ID_COLUMN: &str = "id";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    Varchar(u16),
    Int,
    Date,
}

impl ColumnType {
    /// Type used in CREATE TABLE.
    pub fn ddl(&self) -> String {
        match self {
            ColumnType::Varchar(n) => format!("VARCHAR({})", n),
            ColumnType::Int => "INTEGER".into(),
            ColumnType::Date => "DATE".into(),
        }
    }

    /// Type used to cast bound parameters (`$1::date`).
    pub fn cast(&self) -> &'static str {
        match self {
            ColumnType::Varchar(_) => "varchar",
            ColumnType::Int => "int4",
            ColumnType::Date => "date",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    /// snake_case column name; the API key is its camelCase form.
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
    pub unique: bool,
    /// Must be present and truthy on create.
    pub required: bool,
    /// Surrounding whitespace removed on create.
    pub trim: bool,
    /// Table name of the referenced row (by `id`).
    pub references: Option<&'static str>,
}

impl ColumnDef {
    pub const fn new(name: &'static str, ty: ColumnType) -> Self {
        ColumnDef {
            name,
            ty,
            nullable: false,
            unique: false,
            required: false,
            trim: false,
            references: None,
        }
    }

    pub const fn varchar(name: &'static str, len: u16) -> Self {
        Self::new(name, ColumnType::Varchar(len))
    }

    pub const fn int(name: &'static str) -> Self {
        Self::new(name, ColumnType::Int)
    }

    pub const fn date(name: &'static str) -> Self {
        Self::new(name, ColumnType::Date)
    }

    /// Required, non-null and trimmed: the common shape of a text column.
    pub const fn text(name: &'static str, len: u16) -> Self {
        Self::varchar(name, len).required().trimmed()
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn trimmed(mut self) -> Self {
        self.trim = true;
        self
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub const fn references(mut self, table: &'static str) -> Self {
        self.references = Some(table);
        self
    }
}

/// Static shape of one table and the names used for it in routes and messages.
#[derive(Debug)]
pub struct TableDef {
    pub name: &'static str,
    /// Capitalised name used in client messages ("Patient data is not complete").
    pub title: &'static str,
    pub singular: &'static str,
    pub plural: &'static str,
    /// Route segment under the API prefix.
    pub path: &'static str,
    /// Columns other than `id`.
    pub columns: &'static [ColumnDef],
}

impl TableDef {
    pub fn column(&self, name: &str) -> Option<&'static ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// All tables, in creation order.
pub fn tables() -> [&'static TableDef; 6] {
    [
        &doctor_history::TABLE,
        &hospital::TABLE,
        &doctor::TABLE,
        &patient::TABLE,
        &prescription::TABLE,
        &visit::TABLE,
    ]
}

pub fn table(name: &str) -> Option<&'static TableDef> {
    tables().into_iter().find(|t| t.name == name)
}

/// A record type stored in one table. Serialized with camelCase keys.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    fn table() -> &'static TableDef;
}
