//! Patient: assigned to one doctor, carries contact and insurance details.

use super::{ColumnDef, Entity, TableDef};
use serde::{Deserialize, Serialize};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::int("doctor_id").required().references("doctor"),
    ColumnDef::text("first_name", 100),
    ColumnDef::text("last_name", 100),
    ColumnDef::text("address", 200),
    ColumnDef::text("phone", 100),
    ColumnDef::text("email", 200),
    // stored as sent
    ColumnDef::varchar("insurance_id", 100).required(),
    ColumnDef::text("insurance_owner_first_name", 100),
    ColumnDef::text("insurance_owner_last_name", 100),
    ColumnDef::text("insurance_owner_company_name", 200),
];

pub static TABLE: TableDef = TableDef {
    name: "patient",
    title: "Patient",
    singular: "patient",
    plural: "patients",
    path: "patients",
    columns: COLUMNS,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(default)]
    pub id: i32,
    pub doctor_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub insurance_id: String,
    pub insurance_owner_first_name: String,
    pub insurance_owner_last_name: String,
    pub insurance_owner_company_name: String,
}

impl Entity for Patient {
    fn table() -> &'static TableDef {
        &TABLE
    }
}
