use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use fixoo_auth_types::identity::Identity;
use fixoo_core::extract::ApiJson;

use crate::domain::types::PublicUser;
use crate::error::AuthServiceError;
use crate::handlers::token::SessionResponse;
use crate::state::AppState;
use crate::usecase::account::{
    ChangePasswordInput, ChangePasswordUseCase, ChangePhoneInput, ChangePhoneUseCase,
    GetMeUseCase, RegisterInput, RegisterUseCase, ResetPasswordInput, ResetPasswordUseCase,
};

#[derive(Serialize)]
pub struct UserResponse {
    pub user: PublicUser,
}

// ── POST /auth/register ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub phone: String,
    pub code: String,
    pub full_name: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AuthServiceError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        accounts: state.account_repo(),
        clock: state.clock(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(RegisterInput {
            phone: body.phone,
            code: body.code,
            full_name: body.full_name,
            password: body.password,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse::new(out.user, out.tokens)),
    ))
}

// ── POST /auth/password/reset ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub phone: String,
    pub code: String,
    pub new_password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ResetPasswordRequest>,
) -> Result<StatusCode, AuthServiceError> {
    let usecase = ResetPasswordUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        accounts: state.account_repo(),
        clock: state.clock(),
    };
    usecase
        .execute(ResetPasswordInput {
            phone: body.phone,
            code: body.code,
            new_password: body.new_password,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PATCH /auth/phone ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChangePhoneRequest {
    pub new_phone: String,
    pub code: String,
}

pub async fn change_phone(
    State(state): State<AppState>,
    identity: Identity,
    ApiJson(body): ApiJson<ChangePhoneRequest>,
) -> Result<Json<UserResponse>, AuthServiceError> {
    let usecase = ChangePhoneUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        accounts: state.account_repo(),
        clock: state.clock(),
    };
    let user = usecase
        .execute(ChangePhoneInput {
            user_id: identity.user_id,
            new_phone: body.new_phone,
            code: body.code,
        })
        .await?;
    Ok(Json(UserResponse { user }))
}

// ── PATCH /auth/password ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

pub async fn change_password(
    State(state): State<AppState>,
    identity: Identity,
    ApiJson(body): ApiJson<ChangePasswordRequest>,
) -> Result<StatusCode, AuthServiceError> {
    let usecase = ChangePasswordUseCase {
        users: state.user_repo(),
        accounts: state.account_repo(),
    };
    usecase
        .execute(ChangePasswordInput {
            user_id: identity.user_id,
            current_password: body.current_password,
            new_password: body.new_password,
            confirm_password: body.confirm_password,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /auth/me ─────────────────────────────────────────────────────────────

pub async fn me(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<UserResponse>, AuthServiceError> {
    let usecase = GetMeUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(UserResponse { user }))
}
