mod classifier;
mod client;
mod endpoint;
mod request;

pub use classifier::{classify_query, strip_comment_lines, QueryClassification};
pub use client::{TriplestoreClient, TriplestoreError, UpstreamResponse};
pub use endpoint::{SparqlEndpoint, StoreKind};
pub use request::{FormParameters, SparqlPayload, SparqlRequest, Transport};

/// Media type of SPARQL query results in XML.
pub const SPARQL_RESULTS_XML: &str = "application/sparql-results+xml";
/// Media type of SPARQL query results in JSON.
pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";
