use anyhow::Context as _;

use crate::infra::sms::SmsConfig;

/// Default Eskiz API root.
pub const DEFAULT_SMS_BASE_URL: &str = "https://notify.eskiz.uz/api";

/// Default sender id registered with the gateway.
pub const DEFAULT_SMS_FROM: &str = "4546";

/// Auth service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AuthConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing JWT access and refresh tokens.
    pub jwt_secret: String,
    /// TCP port to listen on (default 3112). Env var: `AUTH_PORT`.
    pub auth_port: u16,
    /// SMS gateway settings. Env vars: `SMS_BASE_URL`, `SMS_LOGIN`, `SMS_PASSWORD`, `SMS_FROM`.
    pub sms: SmsConfig,
}

impl AuthConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            auth_port: std::env::var("AUTH_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3112),
            sms: SmsConfig {
                base_url: std::env::var("SMS_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_SMS_BASE_URL.to_owned()),
                login: required("SMS_LOGIN")?,
                password: required("SMS_PASSWORD")?,
                from: std::env::var("SMS_FROM").unwrap_or_else(|_| DEFAULT_SMS_FROM.to_owned()),
            },
        })
    }
}

fn required(name: &str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("{name} must be set"))
}
