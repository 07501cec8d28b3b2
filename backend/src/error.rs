//! Application error handling
//!
//! Converts internal errors to HTTP responses. General API errors use the
//! `{"error": {"code", "message"}}` envelope; the recommendation endpoint
//! keeps its flat `{"error": "<message>"}` body.

use crate::services::recommendation::RecommendationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fitcoach_shared::{ErrorDetail, ErrorResponse, RecommendationFailure};
use thiserror::Error;
use tracing::{error, warn};

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::Database(err) => {
                error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: None,
            },
        });

        (status, body).into_response()
    }
}

impl IntoResponse for RecommendationError {
    fn into_response(self) -> Response {
        let status = match &self {
            RecommendationError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            RecommendationError::InvalidRequest(_) | RecommendationError::Precondition(_) => {
                StatusCode::BAD_REQUEST
            }
            RecommendationError::Repository { context, source } => {
                warn!(error = ?source, "{}", context);
                StatusCode::BAD_REQUEST
            }
        };

        let body = Json(RecommendationFailure {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use fitcoach_shared::AuthError;

    #[test]
    fn test_validation_error_status() {
        let error = ApiError::Validation("Invalid input".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_status() {
        let error = ApiError::NotFound("Measurement not found".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unauthorized_error_status() {
        let error = ApiError::Unauthorized("Invalid token".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_recommendation_error_status() {
        let unauthorized = RecommendationError::Unauthorized(AuthError::MissingToken).into_response();
        assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);

        let missing = RecommendationError::Precondition("Profile does not exist".to_string()).into_response();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

        let io = RecommendationError::repository("Failed to load profile", anyhow::anyhow!("timeout"))
            .into_response();
        assert_eq!(io.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_recommendation_error_body_is_flat() {
        let response = RecommendationError::Precondition("Cannot find a suitable plan.".to_string()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: RecommendationFailure = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "Cannot find a suitable plan.");
    }
}
