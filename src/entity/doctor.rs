//! Doctor: works at one hospital and owns one history record.

use super::{ColumnDef, Entity, TableDef};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::text("first_name", 100),
    ColumnDef::text("last_name", 100),
    ColumnDef::text("address", 200),
    ColumnDef::text("phone", 100),
    ColumnDef::text("specialization", 200),
    ColumnDef::int("hospital_id").required().unique().references("hospital"),
    ColumnDef::int("doctor_history_id").required().unique().references("doctor_history"),
    ColumnDef::text("hospital_affiliation", 100),
    ColumnDef::date("date_of_affiliation").required(),
    ColumnDef::text("prescription", 100),
];

pub static TABLE: TableDef = TableDef {
    name: "doctor",
    title: "Doctor",
    singular: "doctor",
    plural: "doctors",
    path: "doctors",
    columns: COLUMNS,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[serde(default)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub specialization: String,
    pub hospital_id: i32,
    pub doctor_history_id: i32,
    pub hospital_affiliation: String,
    pub date_of_affiliation: NaiveDate,
    pub prescription: String,
}

impl Entity for Doctor {
    fn table() -> &'static TableDef {
        &TABLE
    }
}
