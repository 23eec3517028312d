//! Collaborators answering from the SPARQL endpoints of the index and of the metadata corpus.

mod director;
mod provider;
mod virtual_entity;

pub use director::TriplestoreDirector;
pub use provider::TriplestoreCitationProvider;
pub use virtual_entity::CitationVirtualDirector;

/// Splits an optional RDF extension off the last segment of `path`.
fn split_extension(path: &str) -> (&str, Option<&str>) {
    let segment_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[segment_start..].rfind('.') {
        Some(dot) => {
            let dot = segment_start + dot;
            (&path[..dot], Some(&path[dot + 1..]))
        }
        None => (path, None),
    }
}
