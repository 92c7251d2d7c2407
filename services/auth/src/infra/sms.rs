//! Eskiz SMS gateway client.
//!
//! The gateway authenticates with a bearer token obtained from `/auth/login`.
//! Tokens are valid for 30 days; the client caches one for 29 and logs in
//! again lazily on the first send after that.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use fixoo_domain::phone::Phone;

use crate::domain::repository::{SmsError, SmsSender};

const TOKEN_LIFETIME: Duration = Duration::from_secs(29 * 24 * 60 * 60);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Gateway statuses that mean the message was accepted for delivery.
const ACCEPTED_STATUSES: [&str; 2] = ["waiting", "success"];

#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub base_url: String,
    pub login: String,
    pub password: String,
    pub from: String,
}

#[derive(Deserialize)]
struct LoginResponse {
    data: LoginData,
}

#[derive(Deserialize)]
struct LoginData {
    token: String,
}

#[derive(Deserialize)]
struct SendResponse {
    status: String,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Cheap to clone; clones share the HTTP pool and the cached token.
#[derive(Clone)]
pub struct EskizSmsClient {
    http: reqwest::Client,
    config: Arc<SmsConfig>,
    token: Arc<Mutex<Option<CachedToken>>>,
}

impl EskizSmsClient {
    pub fn new(config: SmsConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            config: Arc::new(config),
            token: Arc::new(Mutex::new(None)),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    async fn bearer_token(&self) -> Result<String, SmsError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.expires_at > Instant::now()) {
            return Ok(token.value.clone());
        }

        let response: LoginResponse = self
            .http
            .post(self.url("/auth/login"))
            .form(&[
                ("email", self.config.login.as_str()),
                ("password", self.config.password.as_str()),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SmsError::Transport(format!("login: {e}")))?
            .json()
            .await
            .map_err(|e| SmsError::Transport(format!("login response: {e}")))?;

        info!("sms gateway token refreshed");
        let value = response.data.token;
        *cached = Some(CachedToken {
            value: value.clone(),
            expires_at: Instant::now() + TOKEN_LIFETIME,
        });
        Ok(value)
    }

    async fn forget_token(&self) {
        *self.token.lock().await = None;
    }
}

impl SmsSender for EskizSmsClient {
    async fn send(&self, phone: &Phone, message: &str) -> Result<(), SmsError> {
        let token = self.bearer_token().await?;

        let response = self
            .http
            .post(self.url("/message/sms/send"))
            .bearer_auth(token)
            .form(&[
                ("mobile_phone", phone.digits()),
                ("message", message),
                ("from", self.config.from.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SmsError::Transport(e.to_string()))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            // Revoked early; the next send logs in again.
            self.forget_token().await;
        }

        let body: SendResponse = response
            .error_for_status()
            .map_err(|e| SmsError::Transport(e.to_string()))?
            .json()
            .await
            .map_err(|e| SmsError::Transport(format!("send response: {e}")))?;

        debug!(%phone, status = %body.status, "sms gateway answered");
        if ACCEPTED_STATUSES.contains(&body.status.as_str()) {
            Ok(())
        } else {
            Err(SmsError::Rejected(body.status))
        }
    }
}
