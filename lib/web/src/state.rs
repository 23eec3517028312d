use crate::config::{ConfigError, GatewayConfig};
use oc_gateway_resolver::{
    CitationDataProvider, CitationVirtualDirector, ContentNegotiation, DirectorSettings,
    FilePageRenderer, OciResolver, ResourceClass, TriplestoreCitationProvider,
    TriplestoreDirector, VirtualEntityDirector,
};
use oc_gateway_sparql::{SparqlEndpoint, StoreKind, TriplestoreClient};
use std::path::PathBuf;
use std::sync::Arc;

/// The collaborators shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub sparql_index: Arc<SparqlEndpoint>,
    pub sparql_meta: Arc<SparqlEndpoint>,
    pub oci: Arc<OciResolver>,
    pub index: Arc<ContentNegotiation>,
    pub meta: Arc<ContentNegotiation>,
    pub virtual_entities: Arc<dyn VirtualEntityDirector>,
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    /// Wires the triplestore-backed collaborators described by `config`.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, ConfigError> {
        let timeout = config.upstream_timeout();
        let index_client = TriplestoreClient::new(&config.sparql_endpoint_index, timeout)?;
        let meta_client = TriplestoreClient::new(&config.sparql_endpoint_meta, timeout)?;

        let provider: Arc<dyn CitationDataProvider> = Arc::new(TriplestoreCitationProvider::new(
            index_client.clone(),
            config.citation_base_iri(),
            config.ocdm_json_context_path.clone(),
        ));
        let oci = OciResolver::new(
            &config.base_url,
            &config.virtual_local_url,
            Arc::clone(&provider),
            Arc::new(FilePageRenderer::new(&config.html)),
        );

        let settings = Arc::new(DirectorSettings {
            index_base_path: config.index_base_path.clone(),
            html_dir: config.html.clone(),
            label_conf: config.label_conf.clone(),
            tmp_dir: config.tmp_dir.clone(),
            dir_split_number: config.dir_split_number,
            file_split_number: config.file_split_number,
            default_dir: config.default_dir.clone(),
        });
        let index = ContentNegotiation::new(
            Arc::new(TriplestoreDirector),
            Arc::clone(&settings),
            ResourceClass::index(
                &config.index_base_url,
                &config.index_local_url,
                config.ocdm_json_context_path.clone(),
                Some(index_client.clone()),
            ),
        );
        let meta = ContentNegotiation::new(
            Arc::new(TriplestoreDirector),
            settings,
            ResourceClass::meta(
                &config.index_base_url,
                &config.meta_local_url,
                config.ocdm_json_context_path.clone(),
                Some(meta_client.clone()),
            ),
        );

        Ok(Self {
            sparql_index: Arc::new(SparqlEndpoint::new(StoreKind::Index, index_client)),
            sparql_meta: Arc::new(SparqlEndpoint::new(StoreKind::Meta, meta_client)),
            oci: Arc::new(oci),
            index: Arc::new(index),
            meta: Arc::new(meta),
            virtual_entities: Arc::new(CitationVirtualDirector::new(provider)),
            static_dir: config.static_dir.clone(),
        })
    }
}
