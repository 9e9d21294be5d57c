//! One router per entity: `/` for list and create, `/:id` for read, update and delete.

use crate::entity::{Doctor, DoctorHistory, Entity, Hospital, Patient, Prescription, Visit};
use crate::handlers::{create, delete, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn resource_routes<E: Entity>(state: AppState) -> Router {
    Router::new()
        .route("/", get(list::<E>).post(create::<E>))
        .route("/:id", get(read::<E>).put(update::<E>).delete(delete::<E>))
        .with_state(state)
}

fn nest<E: Entity>(router: Router, state: &AppState) -> Router {
    router.nest(&format!("/{}", E::table().path), resource_routes::<E>(state.clone()))
}

/// All six resource routers, nested under their path segment (`/patients`, `/doctor-histories`, ...).
pub fn api_routes(state: AppState) -> Router {
    let router = Router::new();
    let router = nest::<Doctor>(router, &state);
    let router = nest::<Hospital>(router, &state);
    let router = nest::<Patient>(router, &state);
    let router = nest::<Prescription>(router, &state);
    let router = nest::<Visit>(router, &state);
    nest::<DoctorHistory>(router, &state)
}
