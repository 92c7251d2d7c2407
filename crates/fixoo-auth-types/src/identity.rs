//! Bearer-token identity extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::header::AUTHORIZATION;
use http::request::Parts;

use fixoo_domain::entitlement::Actor;
use fixoo_domain::id::UserId;
use fixoo_domain::user::UserRole;

use crate::token::validate_access_token;

/// Router state that knows the HS256 secret access tokens are signed with.
pub trait JwtSecret {
    fn jwt_secret(&self) -> &str;
}

/// Authenticated caller, taken from an `Authorization: Bearer <access token>` header.
///
/// Returns 401 if the header is absent, is not a bearer credential, or carries a token
/// that fails validation (bad signature, expired, refresh token). Role checks (403)
/// are left to handlers and use cases.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: UserId,
    pub role: UserRole,
    pub phone: String,
}

impl Identity {
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.user_id,
            role: self.role,
        }
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

impl<S> FromRequestParts<S> for Identity
where
    S: JwtSecret + Send + Sync,
{
    type Rejection = StatusCode;

    // Validation is synchronous, so the returned future borrows nothing from
    // `parts` or `state`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = match bearer_token(parts) {
            None => Err(StatusCode::UNAUTHORIZED),
            Some(token) => validate_access_token(token, state.jwt_secret())
                .map(|info| Self {
                    user_id: info.user_id,
                    role: info.role,
                    phone: info.phone,
                })
                .map_err(|e| {
                    tracing::debug!(error = %e, "access token rejected");
                    StatusCode::UNAUTHORIZED
                }),
        };

        async move { result }
    }
}
