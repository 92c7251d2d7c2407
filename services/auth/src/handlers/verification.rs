use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use fixoo_core::extract::ApiJson;

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::verification::{
    ConfirmVerificationInput, ConfirmVerificationUseCase, RequestVerificationInput,
    RequestVerificationUseCase,
};

// ── POST /auth/verification ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RequestVerificationRequest {
    pub phone: String,
    #[serde(rename = "type")]
    pub purpose: String,
}

#[derive(Serialize)]
pub struct RequestVerificationResponse {
    pub ttl_seconds: i64,
}

pub async fn request_verification(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RequestVerificationRequest>,
) -> Result<(StatusCode, Json<RequestVerificationResponse>), AuthServiceError> {
    let usecase = RequestVerificationUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        sms: state.sms_sender(),
        clock: state.clock(),
        codes: state.code_generator(),
    };
    let out = usecase
        .execute(RequestVerificationInput {
            phone: body.phone,
            purpose: body.purpose,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RequestVerificationResponse {
            ttl_seconds: out.ttl_seconds,
        }),
    ))
}

// ── POST /auth/verification/confirm ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct ConfirmVerificationRequest {
    pub phone: String,
    #[serde(rename = "type")]
    pub purpose: String,
    pub code: String,
}

#[derive(Serialize)]
pub struct ConfirmVerificationResponse {
    pub verified: bool,
}

pub async fn confirm_verification(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ConfirmVerificationRequest>,
) -> Result<Json<ConfirmVerificationResponse>, AuthServiceError> {
    let usecase = ConfirmVerificationUseCase {
        otps: state.otp_repo(),
        clock: state.clock(),
    };
    let out = usecase
        .execute(ConfirmVerificationInput {
            phone: body.phone,
            purpose: body.purpose,
            code: body.code,
        })
        .await?;
    Ok(Json(ConfirmVerificationResponse {
        verified: out.verified,
    }))
}
