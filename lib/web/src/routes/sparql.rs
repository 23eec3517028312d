use crate::error::OutcomeResponse;
use crate::AppState;
use axum::extract::{RawQuery, State};
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::Router;
use oc_gateway_sparql::{SparqlEndpoint, SparqlRequest, Transport};

pub fn create_sparql_routes() -> Router<AppState> {
    Router::new()
        .route("/index", get(handle_index_get).post(handle_index_post))
        .route("/meta", get(handle_meta_get).post(handle_meta_post))
}

async fn handle_index_get(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> OutcomeResponse {
    relay(&state.sparql_index, get_request(query, &headers)).await
}

async fn handle_index_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> OutcomeResponse {
    relay(&state.sparql_index, post_request(body, &headers)).await
}

async fn handle_meta_get(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> OutcomeResponse {
    relay(&state.sparql_meta, get_request(query, &headers)).await
}

async fn handle_meta_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> OutcomeResponse {
    relay(&state.sparql_meta, post_request(body, &headers)).await
}

async fn relay(endpoint: &SparqlEndpoint, request: SparqlRequest) -> OutcomeResponse {
    endpoint.handle(&request).await.into()
}

fn get_request(query: Option<String>, headers: &HeaderMap) -> SparqlRequest {
    SparqlRequest {
        raw_text: query.unwrap_or_default(),
        transport: Transport::Get,
        content_type: header_text(headers, CONTENT_TYPE.as_str()),
        accept: header_text(headers, ACCEPT.as_str()),
    }
}

fn post_request(body: String, headers: &HeaderMap) -> SparqlRequest {
    SparqlRequest {
        raw_text: body,
        transport: Transport::Post,
        content_type: header_text(headers, CONTENT_TYPE.as_str()),
        accept: header_text(headers, ACCEPT.as_str()),
    }
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}
