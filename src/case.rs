//! Case conversion between API keys (camelCase) and column names (snake_case).

use serde_json::{Map, Value};

/// Convert a single identifier from snake_case to camelCase.
/// e.g. "doctor_id" -> "doctorId", "insurance_owner_first_name" -> "insuranceOwnerFirstName"
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut capitalize_next = false;
    for c in s.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            out.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert a single identifier from camelCase to snake_case.
/// e.g. "doctorId" -> "doctor_id", "dateOfAffiliation" -> "date_of_affiliation"
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Store row (snake_case column keys) to an API object (camelCase keys).
pub fn row_to_api(row: Map<String, Value>) -> Map<String, Value> {
    row.into_iter().map(|(k, v)| (to_camel_case(&k), v)).collect()
}

/// API object (camelCase keys) to a store row (snake_case column keys).
pub fn api_to_row(obj: Map<String, Value>) -> Map<String, Value> {
    obj.into_iter().map(|(k, v)| (to_snake_case(&k), v)).collect()
}
