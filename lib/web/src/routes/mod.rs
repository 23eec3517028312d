use crate::AppState;
use axum::Router;

mod linked_data;
mod oci;
mod service;
mod sparql;

pub fn create_gateway_routes() -> Router<AppState> {
    Router::new()
        .merge(service::create_service_routes())
        .nest("/sparql", sparql::create_sparql_routes())
        .nest("/oci", oci::create_oci_routes())
        .merge(linked_data::create_index_root_routes())
        .nest("/index", linked_data::create_index_routes())
        .nest("/meta", linked_data::create_meta_routes())
        .nest("/virtual", linked_data::create_virtual_routes())
}
