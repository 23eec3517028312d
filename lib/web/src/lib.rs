use axum::Router;
use std::net::SocketAddr;
use std::str::FromStr;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

mod config;
mod error;
mod routes;
mod state;

pub use config::{ConfigError, GatewayConfig, ServerConfig, DEFAULT_UPSTREAM_TIMEOUT_SECS};
pub use error::OutcomeResponse;
pub use state::AppState;

use crate::routes::create_gateway_routes;

/// Builds the router of the gateway. Files below `/static` are only served if the state names a
/// static directory.
pub fn create_router(app_state: AppState) -> Router {
    let router = match &app_state.static_dir {
        Some(static_dir) => {
            create_gateway_routes().nest_service("/static", ServeDir::new(static_dir))
        }
        None => create_gateway_routes(),
    };
    router
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}

/// Binds to the configured address and serves the gateway until the process is stopped.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from_str(&config.bind)?;
    let app_state = AppState::from_config(&config.gateway)?;
    let app = create_router(app_state);

    info!(
        "Listening on {addr} (index: {}, meta: {})",
        config.gateway.sparql_endpoint_index, config.gateway.sparql_endpoint_meta
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    Ok(axum::serve(listener, app).await?)
}
