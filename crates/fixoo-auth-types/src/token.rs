//! JWT layout and validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "issuer", test))]
use serde::Serialize;

use fixoo_domain::id::UserId;
use fixoo_domain::user::UserRole;

/// Access-token lifetime in seconds (15 minutes). Role and account state are
/// read from the token, so this bounds how long a demotion or deactivation
/// takes to reach other services; refresh re-reads both.
pub const ACCESS_TOKEN_EXP: u64 = 900;

/// Refresh-token lifetime in seconds (7 days).
pub const REFRESH_TOKEN_EXP: u64 = 604_800;

/// Discriminates access from refresh tokens so one cannot stand in for the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(any(feature = "issuer", test), derive(Serialize))]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// User identity extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: UserId,
    pub phone: String,
    pub role: UserRole,
    pub exp: u64,
}

/// Errors returned by token validation.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("wrong token type")]
    WrongType,
}

/// JWT claims payload shared by issuance (auth service) and validation (all services).
///
/// | Field | Meaning |
/// |-------|---------|
/// | `sub` | user id (UUID string) |
/// | `phone` | phone the identity was verified with |
/// | `role` | [`UserRole`] wire name |
/// | `typ` | [`TokenType`] |
/// | `exp` | expiration, seconds since UNIX epoch |
///
/// [`Serialize`] requires the `issuer` feature.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "issuer", test), derive(Serialize))]
pub struct JwtClaims {
    pub sub: String,
    pub phone: String,
    pub role: UserRole,
    pub typ: TokenType,
    pub exp: u64,
}

/// HS256, `exp` checked with the default 60s leeway, `sub` and `exp` required.
fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

fn decode_typed(token: &str, secret: &str, expected: TokenType) -> Result<JwtClaims, AuthError> {
    let claims = decode_jwt(token, secret)?;
    if claims.typ != expected {
        return Err(AuthError::WrongType);
    }
    Ok(claims)
}

/// Validate an access token, returning the identity it carries.
/// Refresh tokens are rejected with [`AuthError::WrongType`].
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let claims = decode_typed(token, secret, TokenType::Access)?;
    let user_id = claims
        .sub
        .parse::<UserId>()
        .map_err(|_| AuthError::Malformed)?;
    Ok(TokenInfo {
        user_id,
        phone: claims.phone,
        role: claims.role,
        exp: claims.exp,
    })
}

/// Validate a refresh token and return its raw claims. Access tokens are
/// rejected with [`AuthError::WrongType`].
#[cfg(any(feature = "issuer", test))]
pub fn validate_refresh_token(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    decode_typed(token, secret, TokenType::Refresh)
}
