use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use fixoo_core::error::error_response;
use fixoo_domain::phone::PhoneError;
use fixoo_domain::verification::{OtpCodeError, UnknownPurpose};

/// Auth service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("phone already registered")]
    PhoneAlreadyRegistered,
    #[error("user not found")]
    UserNotFound,
    #[error("too many requests, retry in {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },
    #[error("invalid verification code")]
    InvalidCode,
    #[error("verification code expired")]
    ExpiredCode,
    #[error("failed to deliver verification code")]
    DeliveryFailed,
    #[error("invalid phone or password")]
    InvalidCredentials,
    #[error("invalid refresh token")]
    InvalidRefreshToken,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AuthServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::PhoneAlreadyRegistered => "PHONE_ALREADY_REGISTERED",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::InvalidCode => "INVALID_CODE",
            Self::ExpiredCode => "EXPIRED_CODE",
            Self::DeliveryFailed => "DELIVERY_FAILED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidCode | Self::ExpiredCode => StatusCode::BAD_REQUEST,
            Self::PhoneAlreadyRegistered => StatusCode::CONFLICT,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::DeliveryFailed => StatusCode::BAD_GATEWAY,
            Self::InvalidCredentials | Self::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PhoneError> for AuthServiceError {
    fn from(e: PhoneError) -> Self {
        Self::Validation(e.to_string())
    }
}

impl From<OtpCodeError> for AuthServiceError {
    fn from(e: OtpCodeError) -> Self {
        Self::Validation(e.to_string())
    }
}

impl From<UnknownPurpose> for AuthServiceError {
    fn from(e: UnknownPurpose) -> Self {
        Self::Validation(e.to_string())
    }
}

impl IntoResponse for AuthServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // TraceLayer already records every status; only the 500 cause chain is logged here.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        if let Self::RateLimited { retry_after_secs } = self {
            let body = serde_json::json!({
                "kind": self.kind(),
                "message": self.to_string(),
                "retry_after_secs": retry_after_secs,
            });
            return (
                status,
                [(header::RETRY_AFTER, retry_after_secs.to_string())],
                axum::Json(body),
            )
                .into_response();
        }
        error_response(status, self.kind(), self.to_string())
    }
}
