use super::split_extension;
use crate::collaborators::{DirectorError, LinkedDataDirector, LinkedDataRequest};
use crate::graph::{serialize_graph, GraphFormat};
use async_trait::async_trait;
use oc_gateway_model::Representation;
use oxrdf::{NamedNode, Triple};
use oxrdfio::{RdfFormat, RdfParser};
use tracing::debug;

const N_TRIPLES: &str = "application/n-triples";

/// Describes linked-data resources with the statements the triplestore of their class holds
/// about them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriplestoreDirector;

#[async_trait]
impl LinkedDataDirector for TriplestoreDirector {
    async fn redirect(
        &self,
        request: LinkedDataRequest<'_>,
    ) -> Result<Option<Representation>, DirectorError> {
        let class = request.class;
        let client = class
            .from_triplestore
            .as_ref()
            .ok_or_else(|| DirectorError::NoTriplestore(class.name.clone()))?;

        let (path, format) = match split_extension(request.path) {
            (path, Some(extension)) => match GraphFormat::from_extension(extension) {
                Some(format) => (path, format),
                None => (
                    request.path,
                    GraphFormat::negotiate(request.accept, GraphFormat::Turtle),
                ),
            },
            (path, None) => (
                path,
                GraphFormat::negotiate(request.accept, GraphFormat::Turtle),
            ),
        };

        let iri = class.resource_iri(path);
        let node = NamedNode::new(iri.as_str()).map_err(|_| DirectorError::InvalidIri(iri.clone()))?;
        let query = format!("CONSTRUCT {{ {node} ?p ?o }} WHERE {{ {node} ?p ?o }}");
        let response = client.query(&query, N_TRIPLES).await?;
        if !response.is_ok() {
            return Err(DirectorError::Status(response.status));
        }

        let triples = RdfParser::from_format(RdfFormat::NTriples)
            .for_reader(response.body.as_slice())
            .map(|quad| quad.map(Triple::from))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| DirectorError::Parse(error.to_string()))?;
        if triples.is_empty() {
            debug!("No statements about {iri}");
            return Ok(None);
        }

        let label = class
            .label(&iri)
            .ok_or_else(|| DirectorError::MissingLabel(iri.clone()))?;
        debug!("Describing {iri} ({label}) as {format:?}");
        let body = serialize_graph(&triples, format, class.context_path.as_deref())?;
        Ok(Some(
            Representation::new(body, format.media_type()).with_label(label),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DirectorSettings, ResourceClass};
    use headers::{Header, HeaderValue};
    use headers_accept::Accept;
    use oc_gateway_sparql::TriplestoreClient;
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DESCRIPTION: &str = "<https://w3id.org/oc/meta/br/0601> <http://purl.org/dc/terms/title> \"A title\" .\n";

    async fn meta_class(server: &MockServer) -> ResourceClass {
        let client = TriplestoreClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        ResourceClass::meta("https://w3id.org/oc", "meta", None, Some(client))
    }

    async fn resolve(
        class: &ResourceClass,
        path: &str,
        accept: Option<&Accept>,
    ) -> Result<Option<Representation>, DirectorError> {
        let settings = DirectorSettings::default();
        TriplestoreDirector
            .redirect(LinkedDataRequest {
                path,
                class,
                settings: &settings,
                accept,
            })
            .await
    }

    async fn mount_description(server: &MockServer, body: &str) {
        Mock::given(method("POST"))
            .and(header("accept", N_TRIPLES))
            .and(body_string_contains("CONSTRUCT"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", N_TRIPLES)
                    .set_body_string(body),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn extension_selects_format() {
        let server = MockServer::start().await;
        mount_description(&server, DESCRIPTION).await;

        let representation = resolve(&meta_class(&server).await, "br/0601.nt", None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(representation.media_type, "application/n-triples");
        assert_eq!(representation.label.as_deref(), Some("br 0601"));
        assert!(String::from_utf8(representation.body)
            .unwrap()
            .contains("\"A title\""));
    }

    #[tokio::test]
    async fn accept_selects_format() {
        let server = MockServer::start().await;
        mount_description(&server, DESCRIPTION).await;
        let accept =
            Accept::decode(&mut [HeaderValue::from_static("application/ld+json")].iter()).unwrap();

        let representation = resolve(&meta_class(&server).await, "br/0601", Some(&accept))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(representation.media_type, "application/ld+json");
    }

    #[tokio::test]
    async fn turtle_is_the_default() {
        let server = MockServer::start().await;
        mount_description(&server, DESCRIPTION).await;

        let representation = resolve(&meta_class(&server).await, "br/0601", None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(representation.media_type, "text/turtle");
    }

    #[tokio::test]
    async fn empty_description_is_no_representation() {
        let server = MockServer::start().await;
        mount_description(&server, "").await;

        let representation = resolve(&meta_class(&server).await, "br/0601", None)
            .await
            .unwrap();
        assert_eq!(representation, None);
    }

    #[tokio::test]
    async fn unlabelled_resource_fails() {
        let server = MockServer::start().await;
        mount_description(
            &server,
            "<https://w3id.org/oc/meta> <http://purl.org/dc/terms/title> \"Meta\" .\n",
        )
        .await;

        let error = resolve(&meta_class(&server).await, "", None)
            .await
            .unwrap_err();
        assert!(matches!(error, DirectorError::MissingLabel(_)));
    }

    #[tokio::test]
    async fn class_without_triplestore_fails() {
        let class = ResourceClass::index("https://w3id.org/oc", "index", None, None);
        let error = resolve(&class, "ci/0610-0620", None).await.unwrap_err();
        assert!(matches!(error, DirectorError::NoTriplestore(_)));
    }
}
