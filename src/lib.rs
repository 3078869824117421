//! Staff work-schedule calendar.
//!
//! The client workflow (gateway, detail store, calendar projection, edit form)
//! plus the REST backend it talks to, persisted in SQLite.

pub mod api;
pub mod calendar;
pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod form;
pub mod i18n;
pub mod models;
pub mod store;
pub mod view;

use std::sync::Arc;

use axum::{
    routing::{delete, get, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Shifts
        .route("/shifts", get(api::list_shifts))
        // Work schedules
        .route(
            "/work-schedule/staff/{staff_id}",
            get(api::list_staff_schedule),
        )
        .route(
            "/work-schedules/bulk-update/{staff_id}",
            put(api::bulk_update_schedule),
        )
        .route(
            "/work-schedule/update-detail/{id}",
            put(api::update_schedule_detail),
        )
        .route(
            "/work-schedule/{id}",
            delete(api::delete_schedule_detail),
        );

    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
