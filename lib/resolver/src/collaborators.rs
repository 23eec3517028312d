use crate::negotiation::{DirectorSettings, ResourceClass};
use async_trait::async_trait;
use headers_accept::Accept;
use oc_gateway_model::{CitationFormat, Representation};
use oc_gateway_sparql::TriplestoreError;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error(transparent)]
    Triplestore(#[from] TriplestoreError),
    #[error("Triplestore responded with status {0}")]
    Status(u16),
    #[error("Could not read query results: {0}")]
    Results(String),
    #[error("Could not serialize citation data: {0}")]
    Serialization(String),
    #[error("Invalid identifier '{0}'")]
    InvalidIdentifier(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DirectorError {
    #[error(transparent)]
    Triplestore(#[from] TriplestoreError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("Triplestore responded with status {0}")]
    Status(u16),
    #[error("Resource class '{0}' has no triplestore")]
    NoTriplestore(String),
    #[error("Invalid resource IRI '{0}'")]
    InvalidIri(String),
    #[error("Could not parse the resource description: {0}")]
    Parse(String),
    #[error("No label can be derived for '{0}'")]
    MissingLabel(String),
    #[error("Could not serialize the resource description: {0}")]
    Serialization(#[from] std::io::Error),
}

/// Looks up the data of a single citation.
#[async_trait]
pub trait CitationDataProvider: Send + Sync {
    /// Returns the citation identified by `identifier` (of the form `oci:<id>`) serialized in
    /// `format`, or [None] if there is no such citation.
    async fn citation_data(
        &self,
        identifier: &str,
        format: CitationFormat,
    ) -> Result<Option<Vec<u8>>, ProviderError>;
}

/// Everything a [LinkedDataDirector] needs to resolve a single path.
#[derive(Clone, Copy)]
pub struct LinkedDataRequest<'req> {
    /// The path below the local mount point of the resource class.
    pub path: &'req str,
    pub class: &'req ResourceClass,
    pub settings: &'req DirectorSettings,
    pub accept: Option<&'req Accept>,
}

/// Resolves generic linked-data paths of a resource class.
#[async_trait]
pub trait LinkedDataDirector: Send + Sync {
    async fn redirect(
        &self,
        request: LinkedDataRequest<'_>,
    ) -> Result<Option<Representation>, DirectorError>;
}

/// Resolves resources that only exist as computed views.
#[async_trait]
pub trait VirtualEntityDirector: Send + Sync {
    async fn redirect(
        &self,
        path: &str,
        accept: Option<&Accept>,
    ) -> Result<Option<Representation>, DirectorError>;
}

/// Produces the listing page of the citation identifier resolver.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn oci_index(&self) -> Option<Representation>;
}
