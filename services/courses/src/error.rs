use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use fixoo_core::error::error_response;

/// Courses service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum CoursesServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Never says why: not enrolled and not owner look the same.
    #[error("not accessible")]
    Forbidden,
    #[error("user already has access to this course")]
    AlreadyEnrolled,
    #[error("user must have role {expected}")]
    InvalidRole { expected: &'static str },
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl CoursesServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Forbidden => "FORBIDDEN",
            Self::AlreadyEnrolled => "ALREADY_ENROLLED",
            Self::InvalidRole { .. } => "INVALID_ROLE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for CoursesServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) | Self::InvalidRole { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::AlreadyEnrolled => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        error_response(status, self.kind(), self.to_string())
    }
}
