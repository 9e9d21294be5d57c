//! Route assembly: common probes plus the resource API.

mod common;
mod resource;

pub use common::common_routes;
pub use resource::{api_routes, resource_routes};

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Prefix the resource routers are mounted under.
pub const API_PREFIX: &str = "/api/v1";

/// Full application: probes at the root, resources under [`API_PREFIX`], body cap and request tracing.
pub fn app_router(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest(API_PREFIX, api_routes(state))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
}
