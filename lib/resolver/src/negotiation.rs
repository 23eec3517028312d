use crate::collaborators::{LinkedDataDirector, LinkedDataRequest};
use headers_accept::Accept;
use oc_gateway_model::{ResolutionOutcome, OCI_PREFIX};
use oc_gateway_sparql::TriplestoreClient;
use regex::Regex;
use std::fmt::{Debug, Formatter};
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

/// Derives the human-readable label of a resource from its IRI.
pub type LabelFn = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

static INDEX_CITATION_IRI: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^.+/ci/(.+)$"));
static META_IRI: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^.+/meta/(..)/(.+)$"));
static META_PATH: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^../.+"));

/// Labels resources of the citation index.
pub fn index_label(iri: &str) -> Option<String> {
    let pattern = INDEX_CITATION_IRI.as_ref().ok()?;
    if let Some(captures) = pattern.captures(iri) {
        return Some(format!("{OCI_PREFIX}{}", captures.get(1)?.as_str()));
    }
    if iri.contains("/pa/1") {
        Some("provenance agent 1".to_owned())
    } else {
        Some("INDEX".to_owned())
    }
}

/// Labels resources of the metadata corpus, e.g. `br 0601` for `.../meta/br/0601`.
pub fn meta_label(iri: &str) -> Option<String> {
    let captures = META_IRI.as_ref().ok()?.captures(iri)?;
    Some(format!(
        "{} {}",
        captures.get(1)?.as_str(),
        captures.get(2)?.as_str()
    ))
}

/// Whether `path` has the `<xx>/<rest>` shape of metadata paths.
pub fn is_meta_path(path: &str) -> bool {
    META_PATH
        .as_ref()
        .is_ok_and(|pattern| pattern.is_match(path))
}

/// One family of linked-data resources, e.g. the citation index or the metadata corpus.
#[derive(Clone)]
pub struct ResourceClass {
    pub name: String,
    pub base_url: String,
    pub local_url: String,
    pub context_path: Option<String>,
    pub from_triplestore: Option<TriplestoreClient>,
    pub label_fn: Option<LabelFn>,
}

impl Debug for ResourceClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClass")
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("local_url", &self.local_url)
            .field("context_path", &self.context_path)
            .field(
                "from_triplestore",
                &self.from_triplestore.as_ref().map(TriplestoreClient::endpoint),
            )
            .field("label_fn", &self.label_fn.is_some())
            .finish()
    }
}

impl ResourceClass {
    /// The citation index, labelled with [index_label].
    pub fn index(
        base_url: impl Into<String>,
        local_url: impl Into<String>,
        context_path: Option<String>,
        from_triplestore: Option<TriplestoreClient>,
    ) -> Self {
        Self {
            name: "index".to_owned(),
            base_url: base_url.into(),
            local_url: local_url.into(),
            context_path,
            from_triplestore,
            label_fn: Some(Arc::new(index_label)),
        }
    }

    /// The metadata corpus, labelled with [meta_label].
    pub fn meta(
        base_url: impl Into<String>,
        local_url: impl Into<String>,
        context_path: Option<String>,
        from_triplestore: Option<TriplestoreClient>,
    ) -> Self {
        Self {
            name: "meta".to_owned(),
            base_url: base_url.into(),
            local_url: local_url.into(),
            context_path,
            from_triplestore,
            label_fn: Some(Arc::new(meta_label)),
        }
    }

    /// Applies the label function of this class. [None] if there is none or it cannot label
    /// `iri`.
    pub fn label(&self, iri: &str) -> Option<String> {
        self.label_fn.as_ref().and_then(|label_fn| label_fn(iri))
    }

    /// The IRI of the resource at `path` below the mount point of this class.
    pub fn resource_iri(&self, path: &str) -> String {
        [
            self.base_url.trim_end_matches('/'),
            self.local_url.trim_matches('/'),
            path.trim_start_matches('/'),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("/")
    }
}

/// Settings shared by every resource class.
///
/// The file-system layout fields describe where a file-backed director keeps its data.
#[derive(Debug, Clone, Default)]
pub struct DirectorSettings {
    pub index_base_path: Option<String>,
    pub html_dir: PathBuf,
    pub label_conf: serde_json::Value,
    pub tmp_dir: Option<PathBuf>,
    pub dir_split_number: u32,
    pub file_split_number: u32,
    pub default_dir: String,
}

/// Resolves the paths of one resource class through a [LinkedDataDirector].
#[derive(Clone)]
pub struct ContentNegotiation {
    director: Arc<dyn LinkedDataDirector>,
    settings: Arc<DirectorSettings>,
    class: ResourceClass,
}

impl ContentNegotiation {
    pub fn new(
        director: Arc<dyn LinkedDataDirector>,
        settings: Arc<DirectorSettings>,
        class: ResourceClass,
    ) -> Self {
        Self {
            director,
            settings,
            class,
        }
    }

    pub fn class(&self) -> &ResourceClass {
        &self.class
    }

    /// Resolves `path`. Failures of the director are reported as [ResolutionOutcome::NotFound].
    pub async fn resolve(&self, path: Option<&str>, accept: Option<&Accept>) -> ResolutionOutcome {
        let path = path.unwrap_or_default();
        debug!("Resolving '{path}' in class '{}'", self.class.name);
        let request = LinkedDataRequest {
            path,
            class: &self.class,
            settings: &self.settings,
            accept,
        };
        match self.director.redirect(request).await {
            Ok(Some(representation)) => representation.into(),
            Ok(None) => ResolutionOutcome::NotFound,
            Err(error) => {
                warn!(
                    "Could not resolve '{path}' in class '{}': {error}",
                    self.class.name
                );
                ResolutionOutcome::NotFound
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DirectorError;
    use async_trait::async_trait;
    use oc_gateway_model::Representation;

    #[test]
    fn index_labels() {
        assert_eq!(
            index_label("https://w3id.org/oc/index/ci/0610-0620").as_deref(),
            Some("oci:0610-0620")
        );
        assert_eq!(
            index_label("https://w3id.org/oc/index/pa/1").as_deref(),
            Some("provenance agent 1")
        );
        assert_eq!(
            index_label("https://w3id.org/oc/index").as_deref(),
            Some("INDEX")
        );
    }

    #[test]
    fn meta_labels() {
        assert_eq!(
            meta_label("https://w3id.org/oc/meta/br/0601").as_deref(),
            Some("br 0601")
        );
        assert_eq!(meta_label("https://w3id.org/oc/index/ci/1"), None);
    }

    #[test]
    fn meta_paths() {
        assert!(is_meta_path("br/0601"));
        assert!(!is_meta_path("br"));
        assert!(!is_meta_path("bra/0601"));
    }

    #[test]
    fn resource_iris() {
        let class = ResourceClass::index("https://w3id.org/oc/", "/index/", None, None);
        assert_eq!(
            class.resource_iri("ci/0610-0620"),
            "https://w3id.org/oc/index/ci/0610-0620"
        );
        assert_eq!(class.resource_iri(""), "https://w3id.org/oc/index");
        assert_eq!(class.label("https://w3id.org/oc/index").as_deref(), Some("INDEX"));
    }

    struct EchoDirector;

    #[async_trait]
    impl LinkedDataDirector for EchoDirector {
        async fn redirect(
            &self,
            request: LinkedDataRequest<'_>,
        ) -> Result<Option<Representation>, DirectorError> {
            match request.path {
                "missing" => Ok(None),
                "broken" => Err(DirectorError::Status(500)),
                path => Ok(Some(Representation::new(
                    request.class.resource_iri(path),
                    "text/plain",
                ))),
            }
        }
    }

    fn negotiation() -> ContentNegotiation {
        ContentNegotiation::new(
            Arc::new(EchoDirector),
            Arc::new(DirectorSettings::default()),
            ResourceClass::meta("https://w3id.org/oc", "meta", None, None),
        )
    }

    #[tokio::test]
    async fn resolves_through_director() {
        let outcome = negotiation().resolve(Some("br/0601"), None).await;
        assert_eq!(
            outcome,
            ResolutionOutcome::Content(Representation::new(
                "https://w3id.org/oc/meta/br/0601",
                "text/plain"
            ))
        );
    }

    #[tokio::test]
    async fn director_failures_are_not_found() {
        assert!(negotiation().resolve(Some("missing"), None).await.is_not_found());
        assert!(negotiation().resolve(Some("broken"), None).await.is_not_found());
    }
}
