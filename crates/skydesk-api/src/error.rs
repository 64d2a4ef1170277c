//! Request-boundary errors and their JSON bodies.

use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Message returned for unparseable bodies unless raw errors are exposed.
pub const MALFORMED_BODY: &str = "malformed request body";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("IP address required")]
    AddressRequired,

    #[error("Device not found")]
    DeviceNotFound,

    /// Body was not JSON. Carries the message sent back to the caller.
    #[error("{0}")]
    MalformedBody(String),

    /// An extractor refused the request before the handler ran
    /// (oversized body, undecodable path segment).
    #[error("{1}")]
    Rejected(StatusCode, String),
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::AddressRequired => StatusCode::BAD_REQUEST,
            ApiError::DeviceNotFound => StatusCode::NOT_FOUND,
            ApiError::MalformedBody(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Rejected(status, _) => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::DeviceNotFound => json!({
                "status": "error",
                "error": self.to_string(),
            }),
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
