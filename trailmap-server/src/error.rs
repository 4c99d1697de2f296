//! Error responses: `ApiError` to HTTP status mapping and JSON bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use trailmap_api::ApiError;

/// Errors a handler can return.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Anything the store or query layer rejected.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Request body failed to parse as JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed or missing request parameter.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource missing at the routing layer.
    #[error("{0}")]
    NotFound(String),
}

impl ServerError {
    /// Map error to a stable machine-readable kind string
    pub fn kind(&self) -> &'static str {
        match self {
            // Domain validation failures
            ServerError::Api(ApiError::Core(_)) => "validation",
            ServerError::Api(ApiError::Spatial(_)) => "invalid_geometry",

            // Entity lookups and references
            ServerError::Api(ApiError::NotFound { .. }) => "not_found",
            ServerError::Api(ApiError::DanglingPark(_)) => "referential",

            // Request-shape errors
            ServerError::Api(ApiError::BadRequest(_)) => "bad_request",
            ServerError::Json(_) => "json_parse",
            ServerError::BadRequest(_) => "bad_request",
            ServerError::NotFound(_) => "not_found",

            // Server-side failures
            ServerError::Api(ApiError::Snapshot(_)) => "internal",
            ServerError::Api(ApiError::Json(_)) => "internal",
            ServerError::Api(ApiError::Io(_)) => "internal",
            ServerError::Api(ApiError::Internal(_)) => "internal",
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Lookups
            ServerError::Api(ApiError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,

            // Client errors
            ServerError::Api(ApiError::Core(_)) => StatusCode::BAD_REQUEST,
            ServerError::Api(ApiError::Spatial(_)) => StatusCode::BAD_REQUEST,
            ServerError::Api(ApiError::DanglingPark(_)) => StatusCode::BAD_REQUEST,
            ServerError::Api(ApiError::BadRequest(_)) => StatusCode::BAD_REQUEST,
            ServerError::Json(_) => StatusCode::BAD_REQUEST,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,

            // Server-side failures
            ServerError::Api(ApiError::Snapshot(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Api(ApiError::Json(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Api(ApiError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Api(ApiError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// A 400 with a caller-supplied message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ServerError::BadRequest(msg.into())
    }

    /// A 404 with a caller-supplied message.
    pub fn not_found(msg: impl Into<String>) -> Self {
        ServerError::NotFound(msg.into())
    }

    /// A 500 wrapping [`ApiError::Internal`].
    pub fn internal(msg: impl Into<String>) -> Self {
        ServerError::Api(ApiError::Internal(msg.into()))
    }
}

/// Wire shape of an error reply.
#[derive(Serialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// HTTP status, duplicated into the body.
    pub status: u16,
    /// Machine-readable error kind (e.g. "validation", "not_found")
    pub kind: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let kind = self.kind();

        let body = ErrorResponse {
            error: self.to_string(),
            status: status.as_u16(),
            kind: kind.to_string(),
        };

        let json = serde_json::to_string(&body).unwrap_or_else(|_| {
            format!(
                r#"{{"error":"{}","status":{},"kind":"{}"}}"#,
                self,
                status.as_u16(),
                kind
            )
        });

        (status, [("content-type", "application/json")], json).into_response()
    }
}

/// Handler result alias.
pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use trailmap_core::CoreError;

    #[test]
    fn status_mapping() {
        let not_found = ServerError::Api(ApiError::not_found("park", 42));
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.kind(), "not_found");

        let validation = ServerError::Api(ApiError::Core(CoreError::validation(
            "name",
            "must not be empty",
        )));
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(validation.kind(), "validation");

        let dangling = ServerError::Api(ApiError::DanglingPark(9));
        assert_eq!(dangling.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(dangling.kind(), "referential");

        let io = ServerError::Api(ApiError::io("disk error"));
        assert_eq!(io.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_body_shape() {
        let err = ServerError::bad_request("lat and lng are required");
        let body = serde_json::to_value(ErrorResponse {
            error: err.to_string(),
            status: err.status_code().as_u16(),
            kind: err.kind().to_string(),
        })
        .unwrap();
        assert_eq!(body["status"], 400);
        assert_eq!(body["kind"], "bad_request");
        assert_eq!(body["error"], "Bad request: lat and lng are required");
    }
}
