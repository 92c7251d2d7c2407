use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use fixoo_domain::id::{OtpId, UserId};
use fixoo_domain::phone::Phone;
use fixoo_domain::user::UserRole;
use fixoo_domain::verification::{OTP_TTL_SECS, OtpCode, OtpPurpose};

/// Minimum password length accepted on registration and reset.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A verification code as stored. `used` flips to `true` once and never back.
#[derive(Debug, Clone)]
pub struct OneTimeCode {
    pub id: OtpId,
    pub phone: Phone,
    pub purpose: OtpPurpose,
    pub code: OtpCode,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
}

impl OneTimeCode {
    pub fn issue(phone: Phone, purpose: OtpPurpose, code: OtpCode, now: DateTime<Utc>) -> Self {
        Self {
            id: OtpId::new(),
            phone,
            purpose,
            code,
            created_at: now,
            expires_at: now + Duration::seconds(OTP_TTL_SECS),
            used: false,
        }
    }

    /// Expiry is strict: a code is dead at `expires_at` itself.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Result of an atomic issuance attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueOutcome {
    Issued,
    /// The newest code for the key is younger than the cooldown; nothing was written.
    CoolingDown { last_issued_at: DateTime<Utc> },
}

/// Full account record. Carries the password hash, so it is never serialized;
/// responses use [`PublicUser`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: UserId,
    pub phone: String,
    pub email: Option<String>,
    pub full_name: String,
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl AuthUser {
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            phone: self.phone.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            role: self.role,
            created_at: self.created_at,
        }
    }
}

/// Account projection returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: UserId,
    pub phone: String,
    pub email: Option<String>,
    pub full_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Account to insert on registration.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: UserId,
    pub phone: Phone,
    pub full_name: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Signed access/refresh pair handed to the client.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}
