use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{EncodingKey, Header, encode};
use tracing::info;

use fixoo_auth_types::token::{
    ACCESS_TOKEN_EXP, JwtClaims, REFRESH_TOKEN_EXP, TokenType, validate_refresh_token,
};
use fixoo_domain::id::UserId;
use fixoo_domain::phone::Phone;

use crate::domain::repository::UserRepository;
use crate::domain::types::{AuthUser, PublicUser, TokenPair};
use crate::error::AuthServiceError;
use crate::usecase::password::verify_password_off_thread;

fn now_secs() -> Result<u64, AuthServiceError> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AuthServiceError::Internal(e.into()))?;
    Ok(elapsed.as_secs())
}

fn sign(
    user: &AuthUser,
    typ: TokenType,
    exp: u64,
    secret: &str,
) -> Result<String, AuthServiceError> {
    let claims = JwtClaims {
        sub: user.id.to_string(),
        phone: user.phone.clone(),
        role: user.role,
        typ,
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthServiceError::Internal(e.into()))
}

/// Sign a fresh access (15 minutes) and refresh (7 days) token for `user`.
pub fn issue_token_pair(user: &AuthUser, secret: &str) -> Result<TokenPair, AuthServiceError> {
    let now = now_secs()?;
    let access_token_exp = now + ACCESS_TOKEN_EXP;
    Ok(TokenPair {
        access_token: sign(user, TokenType::Access, access_token_exp, secret)?,
        access_token_exp,
        refresh_token: sign(user, TokenType::Refresh, now + REFRESH_TOKEN_EXP, secret)?,
    })
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub phone: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub user: PublicUser,
    pub tokens: TokenPair,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, AuthServiceError> {
        let phone = Phone::parse(&input.phone)?;

        // Unknown phone and wrong password are indistinguishable to the caller.
        let user = self
            .users
            .find_active_by_phone(phone.as_str())
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;
        if !verify_password_off_thread(&input.password, &user.password_hash).await? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let tokens = issue_token_pair(&user, &self.jwt_secret)?;
        info!(user_id = %user.id, "user logged in");
        Ok(LoginOutput {
            user: user.to_public(),
            tokens,
        })
    }
}

// ── RefreshToken ─────────────────────────────────────────────────────────────

pub struct RefreshTokenUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> RefreshTokenUseCase<U> {
    /// Rotate both tokens. Role and phone are re-read from storage so changes
    /// since the last login take effect.
    pub async fn execute(&self, refresh_token: &str) -> Result<TokenPair, AuthServiceError> {
        let claims = validate_refresh_token(refresh_token, &self.jwt_secret)
            .map_err(|_| AuthServiceError::InvalidRefreshToken)?;

        let user_id = claims
            .sub
            .parse::<UserId>()
            .map_err(|_| AuthServiceError::InvalidRefreshToken)?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or(AuthServiceError::InvalidRefreshToken)?;

        issue_token_pair(&user, &self.jwt_secret)
    }
}
