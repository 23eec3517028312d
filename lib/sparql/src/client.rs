use crate::Transport;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

/// Errors of the transport between the gateway and a triplestore.
///
/// Non-success statuses are not errors; they are returned as part of [UpstreamResponse].
#[derive(Debug, thiserror::Error)]
pub enum TriplestoreError {
    #[error("Could not create the HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request to '{endpoint}' failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

/// A response of a triplestore, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// HTTP client bound to a single SPARQL endpoint.
#[derive(Debug, Clone)]
pub struct TriplestoreClient {
    endpoint: String,
    client: Client,
}

impl TriplestoreClient {
    /// Creates a client whose requests fail once `timeout` has elapsed.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, TriplestoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TriplestoreError::Client)?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Relays a SPARQL protocol payload.
    ///
    /// GET requests append `payload` as the query string of the endpoint, POST requests send it as
    /// the body.
    pub async fn forward(
        &self,
        transport: Transport,
        payload: &str,
        content_type: Option<&str>,
        accept: &str,
    ) -> Result<UpstreamResponse, TriplestoreError> {
        let request = match transport {
            Transport::Get => self.client.get(format!("{}?{payload}", self.endpoint)),
            Transport::Post => self.client.post(&self.endpoint).body(payload.to_owned()),
        };
        let request = match content_type {
            Some(content_type) => request.header(CONTENT_TYPE, content_type),
            None => request,
        };
        self.send(request.header(ACCEPT, accept)).await
    }

    /// Sends `query` as a form-encoded POST request.
    pub async fn query(
        &self,
        query: &str,
        accept: &str,
    ) -> Result<UpstreamResponse, TriplestoreError> {
        let request = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, accept)
            .form(&[("query", query)]);
        self.send(request).await
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<UpstreamResponse, TriplestoreError> {
        let response = request.send().await.map_err(|source| self.request_error(source))?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response
            .bytes()
            .await
            .map_err(|source| self.request_error(source))?;
        Ok(UpstreamResponse {
            status,
            content_type,
            body: body.to_vec(),
        })
    }

    fn request_error(&self, source: reqwest::Error) -> TriplestoreError {
        TriplestoreError::Request {
            endpoint: self.endpoint.clone(),
            source,
        }
    }
}
