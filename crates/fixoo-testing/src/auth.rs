//! Mock auth helpers for integration tests.
//!
//! Services authenticate callers by validating a bearer access token. `MockAuth` mints
//! one with the test secret so requests can be issued as any user and role without
//! going through the auth service.

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use jsonwebtoken::{EncodingKey, Header, encode};

use fixoo_auth_types::token::{ACCESS_TOKEN_EXP, JwtClaims, TokenType};
use fixoo_domain::id::UserId;
use fixoo_domain::user::UserRole;

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: UserId,
    pub role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: UserId, role: UserRole) -> Self {
        Self { user_id, role }
    }

    /// A valid access token signed with `secret`.
    pub fn access_token(&self, secret: &str) -> String {
        let exp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock before UNIX epoch")
            .as_secs()
            + ACCESS_TOKEN_EXP;
        let claims = JwtClaims {
            sub: self.user_id.to_string(),
            phone: "+998900000000".to_owned(),
            role: self.role,
            typ: TokenType::Access,
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("failed to sign test token")
    }

    /// `Authorization: Bearer <token>` header value.
    pub fn bearer(&self, secret: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", self.access_token(secret)))
            .expect("token is a valid header value")
    }

    /// Return headers as if the client had logged in.
    pub fn headers(&self, secret: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, self.bearer(secret));
        map
    }
}
