use crate::collaborators::{CitationDataProvider, PageRenderer};
use oc_gateway_model::{
    canonicalize_identifier, CitationFormat, IdentifierToken, Representation, ResolutionOutcome,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

const DEFAULT_BYPASS_EXTENSION: &str = "rdf";

/// Query parameters accepted by the identifier resolver.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OciParams {
    pub oci: Option<String>,
    pub format: Option<String>,
}

/// Resolves Open Citation Identifiers into citation data or into the generic linked-data view.
#[derive(Clone)]
pub struct OciResolver {
    base_url: String,
    virtual_local_url: String,
    provider: Arc<dyn CitationDataProvider>,
    pages: Arc<dyn PageRenderer>,
}

impl OciResolver {
    pub fn new(
        base_url: impl Into<String>,
        virtual_local_url: impl Into<String>,
        provider: Arc<dyn CitationDataProvider>,
        pages: Arc<dyn PageRenderer>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            virtual_local_url: virtual_local_url.into(),
            provider,
            pages,
        }
    }

    /// Resolves a path token such as `/0610-0620.csv`.
    ///
    /// The `oci` parameter takes precedence over the token and redirects to the canonical URL of
    /// the identifier. A token with a citation-data extension is answered with the data itself,
    /// any other token is redirected to the virtual citation entity.
    pub async fn resolve(&self, token: Option<&str>, params: &OciParams) -> ResolutionOutcome {
        if let Some(oci) = params.oci.as_deref().filter(|oci| !oci.trim().is_empty()) {
            return self.bypass(oci, params.format.as_deref());
        }

        let Some(token) = token.filter(|token| !token.trim().is_empty()) else {
            return match self.pages.oci_index().await {
                Some(page) => page.into(),
                None => ResolutionOutcome::NotFound,
            };
        };

        let Some(token) = IdentifierToken::parse(token) else {
            debug!("Token '{token}' is not an identifier");
            return ResolutionOutcome::NotFound;
        };

        match token.extension().and_then(CitationFormat::from_extension) {
            Some(format) => self.citation_data(&token, format).await,
            None => ResolutionOutcome::redirect(format!(
                "{}{}ci{}",
                self.base_url,
                self.virtual_local_url,
                token.canonical_id()
            )),
        }
    }

    fn bypass(&self, oci: &str, format: Option<&str>) -> ResolutionOutcome {
        let extension = format
            .map(|format| format.trim().to_lowercase())
            .filter(|format| !format.is_empty())
            .unwrap_or_else(|| DEFAULT_BYPASS_EXTENSION.to_owned());
        ResolutionOutcome::redirect(format!(
            "{}/oci/{}.{extension}",
            self.base_url,
            canonicalize_identifier(oci)
        ))
    }

    async fn citation_data(
        &self,
        token: &IdentifierToken,
        format: CitationFormat,
    ) -> ResolutionOutcome {
        let identifier = token.citation_identifier();
        debug!("Requesting {identifier} as {format}");
        match self.provider.citation_data(&identifier, format).await {
            Ok(Some(body)) => Representation::new(body, format.media_type())
                .with_cors()
                .into(),
            Ok(None) => ResolutionOutcome::NotFound,
            Err(error) => {
                warn!("Could not retrieve {identifier} as {format}: {error}");
                ResolutionOutcome::NotFound
            }
        }
    }
}
