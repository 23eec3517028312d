mod citation;
mod collaborators;
mod graph;
mod negotiation;
mod oci;
mod pages;
mod triplestore;

pub use citation::Citation;
pub use collaborators::{
    CitationDataProvider, DirectorError, LinkedDataDirector, LinkedDataRequest, PageRenderer,
    ProviderError, VirtualEntityDirector,
};
pub use graph::{serialize_graph, GraphFormat};
pub use negotiation::{
    index_label, is_meta_path, meta_label, ContentNegotiation, DirectorSettings, LabelFn,
    ResourceClass,
};
pub use oci::{OciParams, OciResolver};
pub use pages::FilePageRenderer;
pub use triplestore::{CitationVirtualDirector, TriplestoreCitationProvider, TriplestoreDirector};
