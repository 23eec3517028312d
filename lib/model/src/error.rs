use crate::ResolutionOutcome;
use thiserror::Error;

/// Message returned whenever a SPARQL Update operation is rejected.
pub const UPDATE_REJECTED_MESSAGE: &str = "SPARQL Update queries are not permitted.";

/// Message returned for SPARQL requests that do not carry a query.
pub const INVALID_REQUEST_MESSAGE: &str = "Not a valid request";

/// The failures the gateway can report to a client.
///
/// Every variant maps onto a [ResolutionOutcome]; no internal detail of the cause is kept.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// A SPARQL Update operation was attempted.
    #[error("SPARQL Update queries are not permitted.")]
    SecurityRejection,
    /// A required parameter is missing or the request has an unusable shape.
    #[error("{0}")]
    MalformedRequest(String),
    /// The upstream triplestore answered with a non-success status.
    #[error("Upstream responded with status {status}")]
    UpstreamFailure {
        status: u16,
        content_type: Option<String>,
        body: Vec<u8>,
    },
    /// The requested identifier or resource could not be found.
    #[error("Not found")]
    LookupMiss,
}

impl From<GatewayError> for ResolutionOutcome {
    fn from(value: GatewayError) -> Self {
        match value {
            GatewayError::SecurityRejection => {
                ResolutionOutcome::Forbidden(UPDATE_REJECTED_MESSAGE.to_owned())
            }
            GatewayError::MalformedRequest(message) => ResolutionOutcome::BadRequest(message),
            GatewayError::UpstreamFailure {
                status,
                content_type,
                body,
            } => ResolutionOutcome::UpstreamError {
                status,
                content_type,
                body,
            },
            GatewayError::LookupMiss => ResolutionOutcome::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn security_rejection_is_forbidden() {
        let outcome = ResolutionOutcome::from(GatewayError::SecurityRejection);
        assert_eq!(
            outcome,
            ResolutionOutcome::Forbidden("SPARQL Update queries are not permitted.".to_owned())
        );
    }

    #[test]
    fn upstream_failure_is_relayed() {
        let outcome = ResolutionOutcome::from(GatewayError::UpstreamFailure {
            status: 500,
            content_type: Some("text/plain".to_owned()),
            body: b"boom".to_vec(),
        });
        assert_eq!(
            outcome,
            ResolutionOutcome::UpstreamError {
                status: 500,
                content_type: Some("text/plain".to_owned()),
                body: b"boom".to_vec(),
            }
        );
    }
}
