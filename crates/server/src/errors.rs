use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use service::VehicleError;

/// Error body shared by every JSON endpoint: `{"error": <title>, "message": <detail>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, message: Option<String>) -> Self {
        let error = error.into();
        let message = message.unwrap_or_else(|| error.clone());
        Self { status, error, message }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", Some(message.into()))
    }

    /// 500 with a generic body; the cause only goes to the log.
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        error!(error = %cause, "internal error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some("Internal error".into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.error, "message": self.message }))).into_response()
    }
}

impl From<VehicleError> for JsonApiError {
    fn from(e: VehicleError) -> Self {
        match e {
            VehicleError::Unauthenticated | VehicleError::Unauthorized => {
                JsonApiError::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some(e.to_string()))
            }
            VehicleError::NotFound => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string())),
            VehicleError::BadRequest(msg) => JsonApiError::bad_request(msg),
            VehicleError::Repository(_) => JsonApiError::internal(format!("[{}] {}", e.code(), e)),
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        JsonApiError::bad_request(rejection.body_text())
    }
}
