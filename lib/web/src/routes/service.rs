use crate::AppState;
use axum::response::Redirect;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

pub fn create_service_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handle_health))
        .route("/favicon.ico", get(handle_favicon))
}

async fn handle_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn handle_favicon() -> Redirect {
    Redirect::to("/static/favicon.ico")
}
