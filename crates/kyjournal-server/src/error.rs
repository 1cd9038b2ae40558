use axum::Json;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use kyjournal_report::{GenerateError, ValidationError};

use crate::html;

/// Request-level failures, mapped onto the error taxonomy:
/// validation → 400, transient service failure → 502, missing/invalid
/// credential → 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Generate(#[from] GenerateError),
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Generate(GenerateError::Config(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Generate(GenerateError::Transient(_)) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Whether the user can fix this by correcting the form and resubmitting.
    pub fn is_user_error(&self) -> bool {
        self.status() == StatusCode::BAD_REQUEST
    }

    /// HTML rendering for the form flow.
    pub fn into_page(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "report generation failed");
        }
        (status, Html(html::error_page(&self))).into_response()
    }
}

/// JSON rendering for the API flow.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "report generation failed");
        }
        let body = json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Validation(ValidationError::MissingProjectName).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Generate(GenerateError::Config("no key".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Generate(GenerateError::Transient("down".into())).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::BadRequest("broken multipart".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_user_error_classification() {
        assert!(ApiError::Validation(ValidationError::MissingActivities).is_user_error());
        assert!(!ApiError::Generate(GenerateError::Transient("down".into())).is_user_error());
    }
}
