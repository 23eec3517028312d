use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use oc_gateway_model::ResolutionOutcome;
use tracing::debug;

/// Turns a [ResolutionOutcome] into an HTTP response.
pub struct OutcomeResponse(pub ResolutionOutcome);

impl From<ResolutionOutcome> for OutcomeResponse {
    fn from(value: ResolutionOutcome) -> Self {
        Self(value)
    }
}

impl IntoResponse for OutcomeResponse {
    fn into_response(self) -> Response {
        match self.0 {
            ResolutionOutcome::Content(representation) => {
                let mut headers = HeaderMap::new();
                insert_content_type(&mut headers, &representation.media_type);
                if representation.cors {
                    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
                    headers.insert(
                        ACCESS_CONTROL_ALLOW_CREDENTIALS,
                        HeaderValue::from_static("true"),
                    );
                }
                if let Some(label) = &representation.label {
                    debug!("Serving '{label}' as {}", representation.media_type);
                }
                (StatusCode::OK, headers, representation.body).into_response()
            }
            ResolutionOutcome::Redirect(location) => Redirect::to(&location).into_response(),
            ResolutionOutcome::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            ResolutionOutcome::Forbidden(message) => {
                (StatusCode::FORBIDDEN, message).into_response()
            }
            ResolutionOutcome::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            ResolutionOutcome::UpstreamError {
                status,
                content_type,
                body,
            } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                let mut headers = HeaderMap::new();
                if let Some(content_type) = &content_type {
                    insert_content_type(&mut headers, content_type);
                }
                (status, headers, body).into_response()
            }
        }
    }
}

fn insert_content_type(headers: &mut HeaderMap, media_type: &str) {
    match HeaderValue::from_str(media_type) {
        Ok(value) => {
            headers.insert(CONTENT_TYPE, value);
        }
        Err(_) => debug!("Dropping invalid content type '{media_type}'"),
    }
}
