//! End-to-end patient lifecycle over the full router, backed by the in-memory store.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use hospital_api::{app_router, resource_routes, AppState, MemoryStore, Patient};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const LIMIT: usize = 64 * 1024;

fn app() -> Router {
    app_router(AppState::new(Arc::new(MemoryStore::new())), LIMIT)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Creates history, hospital and doctor; returns the doctor's id.
async fn seed_doctor(app: &Router) -> i64 {
    let (status, history) = send(
        app,
        "POST",
        "/api/v1/doctor-histories",
        Some(json!({"previousEmployer": "Ida-Tallinna Keskhaigla", "education": "Tartu Ülikool"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", history);
    let (status, hospital) = send(
        app,
        "POST",
        "/api/v1/hospitals",
        Some(json!({"hospitalName": "Kliinikum", "address": "Puusepa 8", "phone": "7319100"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", hospital);
    let (status, doctor) = send(
        app,
        "POST",
        "/api/v1/doctors",
        Some(json!({
            "firstName": "Jaan",
            "lastName": "Kask",
            "address": "Riia 1",
            "phone": "5550000",
            "specialization": "Cardiology",
            "hospitalId": hospital["data"]["id"],
            "doctorHistoryId": history["data"]["id"],
            "hospitalAffiliation": "Kliinikum",
            "dateOfAffiliation": "2020-09-01",
            "prescription": "none"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", doctor);
    assert_eq!(doctor["data"]["dateOfAffiliation"], json!("2020-09-01"));
    doctor["data"]["id"].as_i64().unwrap()
}

fn patient_body(doctor_id: i64) -> Value {
    json!({
        "doctorId": doctor_id,
        "firstName": "  Mari  ",
        "lastName": "Tamm",
        "address": " Pikk 1 ",
        "phone": "5551234",
        "email": "mari@example.com",
        "insuranceId": " EE-123 ",
        "insuranceOwnerFirstName": "Mari",
        "insuranceOwnerLastName": "Tamm",
        "insuranceOwnerCompanyName": "Haigekassa"
    })
}

#[tokio::test]
async fn patient_lifecycle() {
    let app = app();
    let doctor_id = seed_doctor(&app).await;

    let (status, created) = send(&app, "POST", "/api/v1/patients", Some(patient_body(doctor_id))).await;
    assert_eq!(status, StatusCode::OK);
    let patient: Patient = serde_json::from_value(created["data"].clone()).unwrap();
    assert_eq!(patient.first_name, "Mari");
    assert_eq!(patient.address, "Pikk 1");
    assert_eq!(patient.insurance_id, " EE-123 ");
    assert_eq!(patient.doctor_id as i64, doctor_id);

    let uri = format!("/api/v1/patients/{}", patient.id);
    let (status, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"], created["data"]);

    let (status, updated) = send(&app, "PUT", &uri, Some(json!({"firstName": "Jane"}))).await;
    assert_eq!(status, StatusCode::OK);
    let mut expected = created["data"].clone();
    expected["firstName"] = json!("Jane");
    assert_eq!(updated["data"], expected);

    let (status, deleted) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["data"], expected);

    let (status, again) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(again["error"]["message"], json!("Patient not found"));

    let (status, gone) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(gone, json!({"data": null}));
}

#[tokio::test]
async fn list_returns_every_patient() {
    let app = app();
    let doctor_id = seed_doctor(&app).await;
    let (status, empty) = send(&app, "GET", "/api/v1/patients", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty, json!({"data": []}));

    for _ in 0..2 {
        let (status, _) = send(&app, "POST", "/api/v1/patients", Some(patient_body(doctor_id))).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (_, listed) = send(&app, "GET", "/api/v1/patients", None).await;
    let ids: Vec<i64> = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn incomplete_patient_is_rejected_and_not_stored() {
    let app = app();
    let doctor_id = seed_doctor(&app).await;
    for field in ["firstName", "insuranceId", "doctorId"] {
        let mut body = patient_body(doctor_id);
        body.as_object_mut().unwrap().remove(field);
        let (status, err) = send(&app, "POST", "/api/v1/patients", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", field);
        assert_eq!(err["error"]["message"], json!("Patient data is not complete"));
    }
    let mut body = patient_body(doctor_id);
    body["email"] = json!("");
    let (status, _) = send(&app, "POST", "/api/v1/patients", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, listed) = send(&app, "GET", "/api/v1/patients", None).await;
    assert_eq!(listed, json!({"data": []}));
}

#[tokio::test]
async fn unknown_doctor_is_a_bad_request() {
    let app = app();
    let (status, err) = send(&app, "POST", "/api/v1/patients", Some(patient_body(999))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"]["message"], json!("Doctor with given ID not found"));

    let doctor_id = seed_doctor(&app).await;
    let (_, created) = send(&app, "POST", "/api/v1/patients", Some(patient_body(doctor_id))).await;
    let uri = format!("/api/v1/patients/{}", created["data"]["id"]);
    let (status, err) = send(&app, "PUT", &uri, Some(json!({"doctorId": 999}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"]["message"], json!("Doctor with given ID not found"));
}

#[tokio::test]
async fn non_numeric_id_reads_as_null() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/v1/patients/abc", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"data": null}));

    let (status, _) = send(&app, "PUT", "/api/v1/patients/abc", Some(json!({"firstName": "X"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", "/api/v1/patients/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_of_missing_patient_is_not_found() {
    let app = app();
    let (status, err) = send(&app, "PUT", "/api/v1/patients/5", Some(json!({"firstName": "X"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["error"]["code"], json!("not_found"));
}

#[tokio::test]
async fn standalone_router_serves_at_root() {
    let state = AppState::new(Arc::new(MemoryStore::new()));
    let patients = resource_routes::<Patient>(state);
    let (status, body) = send(&patients, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"data": []}));
    let (status, body) = send(&patients, "GET", "/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"data": null}));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let app = app();
    let big = "x".repeat(LIMIT + 1);
    let body = json!({"firstName": big}).to_string();
    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/patients")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
