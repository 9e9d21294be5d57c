//! A patient's visit to a doctor.

use super::{ColumnDef, Entity, TableDef};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::int("doctor_id").required().references("doctor"),
    ColumnDef::int("patient_id").required().references("patient"),
    ColumnDef::date("visit_date").required(),
    ColumnDef::text("reason", 200),
    ColumnDef::varchar("notes", 1000).nullable().trimmed(),
];

pub static TABLE: TableDef = TableDef {
    name: "visit",
    title: "Visit",
    singular: "visit",
    plural: "visits",
    path: "visits",
    columns: COLUMNS,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    #[serde(default)]
    pub id: i32,
    pub doctor_id: i32,
    pub patient_id: i32,
    pub visit_date: NaiveDate,
    pub reason: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Entity for Visit {
    fn table() -> &'static TableDef {
        &TABLE
    }
}
