//! Hospital. The doctor and history links are optional so a hospital can exist before its doctor.

use super::{ColumnDef, Entity, TableDef};
use serde::{Deserialize, Serialize};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::text("hospital_name", 50),
    ColumnDef::text("address", 200),
    ColumnDef::text("phone", 50),
    ColumnDef::int("doctor_id").nullable().unique().references("doctor"),
    ColumnDef::int("doctor_history_id").nullable().unique().references("doctor_history"),
];

pub static TABLE: TableDef = TableDef {
    name: "hospital",
    title: "Hospital",
    singular: "hospital",
    plural: "hospitals",
    path: "hospitals",
    columns: COLUMNS,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    #[serde(default)]
    pub id: i32,
    pub hospital_name: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub doctor_id: Option<i32>,
    #[serde(default)]
    pub doctor_history_id: Option<i32>,
}

impl Entity for Hospital {
    fn table() -> &'static TableDef {
        &TABLE
    }
}
