use crate::classifier::classify_query;
use crate::client::{TriplestoreClient, UpstreamResponse};
use crate::request::{FormParameters, SparqlPayload, SparqlRequest};
use crate::{SPARQL_RESULTS_JSON, SPARQL_RESULTS_XML};
use oc_gateway_model::{GatewayError, Representation, ResolutionOutcome, INVALID_REQUEST_MESSAGE};
use std::fmt::{Display, Formatter};

/// The logical triplestores behind the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    Index,
    Meta,
}

impl StoreKind {
    pub fn name(self) -> &'static str {
        match self {
            StoreKind::Index => "index",
            StoreKind::Meta => "meta",
        }
    }
}

impl Display for StoreKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A read-only SPARQL endpoint in front of one triplestore.
///
/// Every request is classified before any network call is made. Updates are rejected, everything
/// else is relayed to the triplestore with the transport of the incoming request. A form or query
/// string is read-only only if it has no `update` parameter and none of its `query` values is an
/// update.
#[derive(Debug, Clone)]
pub struct SparqlEndpoint {
    kind: StoreKind,
    client: TriplestoreClient,
}

impl SparqlEndpoint {
    pub fn new(kind: StoreKind, client: TriplestoreClient) -> Self {
        Self { kind, client }
    }

    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    pub async fn handle(&self, request: &SparqlRequest) -> ResolutionOutcome {
        match self.try_handle(request).await {
            Ok(outcome) => outcome,
            Err(error) => error.into(),
        }
    }

    async fn try_handle(
        &self,
        request: &SparqlRequest,
    ) -> Result<ResolutionOutcome, GatewayError> {
        match request.payload() {
            SparqlPayload::QueryString(query_string) => {
                if query_string.trim().is_empty() {
                    return Ok(ResolutionOutcome::redirect("/"));
                }
                let parameters = FormParameters::parse(query_string);
                if parameters.has_update {
                    tracing::warn!(store = %self.kind, "Rejected request with an update parameter");
                    return Err(GatewayError::SecurityRejection);
                }
                if parameters.queries.is_empty() {
                    return Err(GatewayError::MalformedRequest(
                        INVALID_REQUEST_MESSAGE.to_owned(),
                    ));
                }
                for query in &parameters.queries {
                    self.ensure_read_only(query)?;
                }
                self.forward(request, query_string).await
            }
            SparqlPayload::Query(query) => {
                self.ensure_read_only(query)?;
                self.forward(request, query).await
            }
            SparqlPayload::Unsupported => {
                tracing::debug!(
                    store = %self.kind,
                    content_type = ?request.content_type,
                    "Unsupported content type, redirecting to home"
                );
                Ok(ResolutionOutcome::redirect("/"))
            }
        }
    }

    fn ensure_read_only(&self, query: &str) -> Result<(), GatewayError> {
        if classify_query(query).is_update {
            tracing::warn!(store = %self.kind, "Rejected SPARQL Update request");
            return Err(GatewayError::SecurityRejection);
        }
        Ok(())
    }

    async fn forward(
        &self,
        request: &SparqlRequest,
        payload: &str,
    ) -> Result<ResolutionOutcome, GatewayError> {
        let accept = effective_accept(request.accept.as_deref());
        let response = self
            .client
            .forward(
                request.transport,
                payload,
                request.content_type.as_deref(),
                accept,
            )
            .await;

        let response = match response {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(store = %self.kind, %error, "Triplestore is unreachable");
                return Err(GatewayError::UpstreamFailure {
                    status: 502,
                    content_type: Some("text/plain".to_owned()),
                    body: b"The triplestore could not be reached.".to_vec(),
                });
            }
        };

        if !response.is_ok() {
            tracing::debug!(
                store = %self.kind,
                status = response.status,
                transport = ?request.transport,
                "Triplestore rejected the query"
            );
            let UpstreamResponse {
                status,
                content_type,
                body,
            } = response;
            return Err(GatewayError::UpstreamFailure {
                status,
                content_type,
                body,
            });
        }

        let media_type = results_media_type(response.content_type.as_deref());
        Ok(Representation::new(response.body, media_type)
            .with_cors()
            .into())
    }
}

/// The `Accept` header sent upstream. Missing, empty and wildcard values default to SPARQL XML
/// results.
fn effective_accept(accept: Option<&str>) -> &str {
    match accept.map(str::trim) {
        None | Some("" | "*/*") => SPARQL_RESULTS_XML,
        Some(accept) => accept,
    }
}

/// The content type exposed to the client. Plain JSON from the triplestore is SPARQL JSON results.
fn results_media_type(content_type: Option<&str>) -> String {
    let Some(content_type) = content_type else {
        return "application/octet-stream".to_owned();
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if essence == "application/json" {
        SPARQL_RESULTS_JSON.to_owned()
    } else {
        content_type.to_owned()
    }
}
