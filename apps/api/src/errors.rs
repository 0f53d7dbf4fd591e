use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::assistant::SessionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Gone: {0}")]
    Gone(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        use crate::assistant::panel::SubmitRejected;

        match err {
            SessionError::NotFound(_) => AppError::NotFound(err.to_string()),
            SessionError::Rejected(SubmitRejected::EmptyInput) => {
                AppError::Validation(err.to_string())
            }
            SessionError::Rejected(SubmitRejected::ReplyPending) => {
                AppError::Conflict(err.to_string())
            }
            SessionError::Closed(_) => AppError::Gone(err.to_string()),
            SessionError::Full { .. } => AppError::ServiceUnavailable(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Gone(msg) => (StatusCode::GONE, "GONE", msg.clone()),
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    msg.clone(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::panel::SubmitRejected;
    use uuid::Uuid;

    fn status_of(err: SessionError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn test_session_errors_map_to_status_codes() {
        let id = Uuid::new_v4();
        assert_eq!(status_of(SessionError::NotFound(id)), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(SessionError::Rejected(SubmitRejected::EmptyInput)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(SessionError::Rejected(SubmitRejected::ReplyPending)),
            StatusCode::CONFLICT
        );
        assert_eq!(status_of(SessionError::Closed(id)), StatusCode::GONE);
        assert_eq!(
            status_of(SessionError::Full { limit: 1 }),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_internal_error_hides_details() {
        let response = AppError::Internal(anyhow::anyhow!("secret detail")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
