use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::error::DomainError;
use crate::domain::error::ErrorKind;

pub mod login;
pub mod register;

/// Header installed by the request-id middleware and echoed in error bodies.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id assigned by the middleware, empty if the layer is absent.
pub fn request_id_from(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// A failed request: the domain error plus the context needed to render
/// and log it.
#[derive(Debug)]
pub struct ApiError {
    op: &'static str,
    request_id: String,
    error: DomainError,
}

impl ApiError {
    pub fn new(op: &'static str, request_id: impl Into<String>, error: DomainError) -> Self {
        Self {
            op,
            request_id: request_id.into(),
            error,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.kind().status();

        // Only internal errors log full detail; every other kind is
        // already client-safe and stays quiet.
        if self.error.kind() == ErrorKind::Internal {
            tracing::error!(
                op = self.op,
                code = %self.error.kind(),
                error = %self.error.root_cause(),
                "request failed"
            );
        }

        (
            status,
            Json(json!({
                "error": self.error,
                "request_id": self.request_id,
            })),
        )
            .into_response()
    }
}
