use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use fixoo_core::extract::ApiJson;

use crate::domain::types::{PublicUser, TokenPair};
use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::token::{LoginInput, LoginUseCase, RefreshTokenUseCase};

/// Body returned by register and login.
#[derive(Serialize)]
pub struct SessionResponse {
    pub user: PublicUser,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

impl SessionResponse {
    pub fn new(user: PublicUser, tokens: TokenPair) -> Self {
        Self { user, tokens }
    }
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<SessionResponse>, AuthServiceError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(LoginInput {
            phone: body.phone,
            password: body.password,
        })
        .await?;
    Ok(Json(SessionResponse::new(out.user, out.tokens)))
}

// ── POST /auth/token/refresh ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

pub async fn refresh_token(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RefreshTokenRequest>,
) -> Result<Json<TokenPair>, AuthServiceError> {
    let usecase = RefreshTokenUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    Ok(Json(usecase.execute(&body.refresh_token).await?))
}
