use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use meetkit_core::CoreError;
use serde::Serialize;

/// Error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub code: &'static str,
    pub detail: String,
}

/// Handler failure mapped onto an HTTP status.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub detail: String,
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let (status, code) = match &err {
            CoreError::MeetingNotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            CoreError::InvalidRequest(_) | CoreError::TimeOutOfRange(_) => {
                (StatusCode::BAD_REQUEST, "invalid_request")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };
        Self {
            status,
            code,
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(status = %self.status, code = self.code, detail = %self.detail, "request failed");
        (
            self.status,
            Json(ErrorResponse {
                status: "error",
                code: self.code,
                detail: self.detail,
            }),
        )
            .into_response()
    }
}
