//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use evenshare_core::validation::ValidationError;
use evenshare_db::repositories::{ExpenseError, GroupError, MemberError};
use evenshare_shared::AppError;
use serde_json::json;
use tracing::error;

/// Result type for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// An `AppError` rendered as `{ "error": code, "message": text }`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Internal details stay in the logs
        let message = if self.0.is_internal() {
            error!(error = %self.0, "Request failed");
            "An error occurred".to_string()
        } else {
            self.0.to_string()
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self(e.into())
    }
}

impl From<GroupError> for ApiError {
    fn from(e: GroupError) -> Self {
        Self(e.into())
    }
}

impl From<MemberError> for ApiError {
    fn from(e: MemberError) -> Self {
        Self(e.into())
    }
}

impl From<ExpenseError> for ApiError {
    fn from(e: ExpenseError) -> Self {
        Self(e.into())
    }
}
