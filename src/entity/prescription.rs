//! Prescription issued by a doctor to a patient.

use super::{ColumnDef, Entity, TableDef};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::int("doctor_id").required().references("doctor"),
    ColumnDef::int("patient_id").required().references("patient"),
    ColumnDef::text("medication", 200),
    ColumnDef::text("dosage", 100),
    ColumnDef::varchar("instructions", 500).nullable().trimmed(),
    ColumnDef::date("date_issued").required(),
];

pub static TABLE: TableDef = TableDef {
    name: "prescription",
    title: "Prescription",
    singular: "prescription",
    plural: "prescriptions",
    path: "prescriptions",
    columns: COLUMNS,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    #[serde(default)]
    pub id: i32,
    pub doctor_id: i32,
    pub patient_id: i32,
    pub medication: String,
    pub dosage: String,
    #[serde(default)]
    pub instructions: Option<String>,
    pub date_issued: NaiveDate,
}

impl Entity for Prescription {
    fn table() -> &'static TableDef {
        &TABLE
    }
}
