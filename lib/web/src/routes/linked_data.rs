use crate::error::OutcomeResponse;
use crate::AppState;
use axum::extract::{FromRequestParts, Path, State};
use axum::http::request::Parts;
use axum::routing::get;
use axum::Router;
use headers::HeaderMapExt;
use headers_accept::Accept;
use oc_gateway_model::ResolutionOutcome;
use oc_gateway_resolver::is_meta_path;
use std::convert::Infallible;
use tracing::warn;

/// The `Accept` header of a request, if it is present and well-formed.
pub struct OptionalAccept(pub Option<Accept>);

impl<S: Send + Sync> FromRequestParts<S> for OptionalAccept {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.headers.typed_get::<Accept>()))
    }
}

pub fn create_index_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_index_root))
        .route("/{*path}", get(handle_index_path))
}

/// `/index/` resolves like `/index`, outside of the nested router that only matches the latter.
pub fn create_index_root_routes() -> Router<AppState> {
    Router::new().route("/index/", get(handle_index_root))
}

pub fn create_meta_routes() -> Router<AppState> {
    Router::new().route("/{*path}", get(handle_meta_path))
}

pub fn create_virtual_routes() -> Router<AppState> {
    Router::new().route("/{*path}", get(handle_virtual_path))
}

async fn handle_index_root(
    State(state): State<AppState>,
    OptionalAccept(accept): OptionalAccept,
) -> OutcomeResponse {
    state.index.resolve(None, accept.as_ref()).await.into()
}

async fn handle_index_path(
    State(state): State<AppState>,
    Path(path): Path<String>,
    OptionalAccept(accept): OptionalAccept,
) -> OutcomeResponse {
    state.index.resolve(Some(&path), accept.as_ref()).await.into()
}

async fn handle_meta_path(
    State(state): State<AppState>,
    Path(path): Path<String>,
    OptionalAccept(accept): OptionalAccept,
) -> OutcomeResponse {
    if !is_meta_path(&path) {
        return ResolutionOutcome::NotFound.into();
    }
    state.meta.resolve(Some(&path), accept.as_ref()).await.into()
}

async fn handle_virtual_path(
    State(state): State<AppState>,
    Path(path): Path<String>,
    OptionalAccept(accept): OptionalAccept,
) -> OutcomeResponse {
    let outcome = match state.virtual_entities.redirect(&path, accept.as_ref()).await {
        Ok(Some(representation)) => representation.into(),
        Ok(None) => ResolutionOutcome::NotFound,
        Err(error) => {
            warn!("Could not resolve virtual entity '{path}': {error}");
            ResolutionOutcome::NotFound
        }
    };
    outcome.into()
}
