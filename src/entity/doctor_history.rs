//! Professional background of a doctor. Referenced one-to-one from `doctor.doctor_history_id`.

use super::{ColumnDef, Entity, TableDef};
use serde::{Deserialize, Serialize};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::text("previous_employer", 200),
    ColumnDef::text("education", 200),
    ColumnDef::int("years_of_experience").nullable(),
    ColumnDef::varchar("notes", 1000).nullable().trimmed(),
];

pub static TABLE: TableDef = TableDef {
    name: "doctor_history",
    title: "Doctor history",
    singular: "doctor history",
    plural: "doctor histories",
    path: "doctor-histories",
    columns: COLUMNS,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorHistory {
    #[serde(default)]
    pub id: i32,
    pub previous_employer: String,
    pub education: String,
    #[serde(default)]
    pub years_of_experience: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Entity for DoctorHistory {
    fn table() -> &'static TableDef {
        &TABLE
    }
}
