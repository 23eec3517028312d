use super::split_extension;
use crate::collaborators::{CitationDataProvider, DirectorError, VirtualEntityDirector};
use crate::graph::GraphFormat;
use async_trait::async_trait;
use headers_accept::Accept;
use oc_gateway_model::{canonicalize_identifier, Representation, OCI_PREFIX};
use std::sync::Arc;
use tracing::debug;

/// Serves citations as virtual entities below `ci/<id>`.
#[derive(Clone)]
pub struct CitationVirtualDirector {
    provider: Arc<dyn CitationDataProvider>,
}

impl CitationVirtualDirector {
    pub fn new(provider: Arc<dyn CitationDataProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl VirtualEntityDirector for CitationVirtualDirector {
    async fn redirect(
        &self,
        path: &str,
        accept: Option<&Accept>,
    ) -> Result<Option<Representation>, DirectorError> {
        let (path, extension) = split_extension(path.trim_start_matches('/'));
        let Some(id) = path.strip_prefix("ci/") else {
            debug!("'{path}' is not a virtual citation");
            return Ok(None);
        };
        let format = match extension {
            Some(extension) => match GraphFormat::from_extension(extension) {
                Some(format) => format,
                None => return Ok(None),
            },
            None => GraphFormat::negotiate(accept, GraphFormat::RdfXml),
        };

        let identifier = format!("{OCI_PREFIX}{}", canonicalize_identifier(id));
        let data = self
            .provider
            .citation_data(&identifier, format.citation_format())
            .await?;
        Ok(data.map(|body| {
            Representation::new(body, format.media_type())
                .with_cors()
                .with_label(identifier)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderError;
    use oc_gateway_model::CitationFormat;

    struct FixedProvider;

    #[async_trait]
    impl CitationDataProvider for FixedProvider {
        async fn citation_data(
            &self,
            identifier: &str,
            format: CitationFormat,
        ) -> Result<Option<Vec<u8>>, ProviderError> {
            Ok((identifier == "oci:0610-0620").then(|| format.extension().as_bytes().to_vec()))
        }
    }

    fn director() -> CitationVirtualDirector {
        CitationVirtualDirector::new(Arc::new(FixedProvider))
    }

    #[tokio::test]
    async fn rdf_xml_is_the_default() {
        let representation = director()
            .redirect("ci/0610-0620", None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(representation.media_type, "application/rdf+xml");
        assert_eq!(representation.body, b"xml");
        assert_eq!(representation.label.as_deref(), Some("oci:0610-0620"));
    }

    #[tokio::test]
    async fn extension_selects_format() {
        let representation = director()
            .redirect("/ci/0610-0620.ttl", None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(representation.media_type, "text/turtle");
    }

    #[tokio::test]
    async fn unknown_entities_are_absent() {
        assert_eq!(director().redirect("ci/0000-0000", None).await.unwrap(), None);
        assert_eq!(director().redirect("br/0601", None).await.unwrap(), None);
        assert_eq!(
            director().redirect("ci/0610-0620.html", None).await.unwrap(),
            None
        );
    }
}
