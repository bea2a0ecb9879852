use analytics::AnalyticsError;
use auth::AuthError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::DbError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
    #[error("Missing or expired session")]
    Unauthorized,
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(DbError::NotFound(id)) => (
                StatusCode::NOT_FOUND,
                format!("Employee {} was not found", id),
            ),
            AppError::Database(DbError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::Auth(AuthError::MissingCredentials) => (
                StatusCode::BAD_REQUEST,
                "Provide username & password".to_string(),
            ),
            AppError::Auth(AuthError::UsernameTaken(_)) => {
                (StatusCode::CONFLICT, "Username taken".to_string())
            }
            AppError::Auth(AuthError::InvalidCredentials) => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            AppError::Auth(auth_err) => {
                tracing::error!(error = ?auth_err, "Auth error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal authentication error occurred".to_string(),
                )
            }
            AppError::Analytics(analytics_err) => {
                tracing::error!(error = ?analytics_err, "Analytics error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred during analysis".to_string(),
                )
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Please log in".to_string()),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
