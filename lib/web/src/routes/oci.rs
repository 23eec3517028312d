use crate::error::OutcomeResponse;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::Router;
use oc_gateway_resolver::OciParams;

pub fn create_oci_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_oci_index))
        .route("/{*token}", get(handle_oci_token))
}

async fn handle_oci_index(
    State(state): State<AppState>,
    Query(params): Query<OciParams>,
) -> OutcomeResponse {
    state.oci.resolve(None, &params).await.into()
}

/// The token keeps the `/` separating it from the mount point.
async fn handle_oci_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(params): Query<OciParams>,
) -> OutcomeResponse {
    let token = format!("/{token}");
    state.oci.resolve(Some(&token), &params).await.into()
}
