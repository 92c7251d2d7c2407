#![allow(async_fn_in_trait)]

use chrono::{DateTime, Duration, Utc};

use fixoo_domain::id::{OtpId, UserId};
use fixoo_domain::phone::Phone;
use fixoo_domain::verification::{OtpCode, OtpPurpose};

use crate::domain::types::{AuthUser, IssueOutcome, NewUser, OneTimeCode};
use crate::error::AuthServiceError;

/// Storage for verification codes.
pub trait OtpRepository: Send + Sync {
    /// Atomically, per (phone, purpose): if the newest stored code was created
    /// less than `cooldown` before `code.created_at`, return
    /// [`IssueOutcome::CoolingDown`] and write nothing. Otherwise delete every
    /// prior code for the key and insert `code`.
    async fn replace_if_cooled_down(
        &self,
        code: &OneTimeCode,
        cooldown: Duration,
    ) -> Result<IssueOutcome, AuthServiceError>;

    /// Remove a code regardless of its state (compensation after a failed send).
    async fn delete(&self, id: OtpId) -> Result<(), AuthServiceError>;

    /// Newest unused code matching all three keys, expired or not.
    async fn find_unused(
        &self,
        phone: &Phone,
        purpose: OtpPurpose,
        code: &OtpCode,
    ) -> Result<Option<OneTimeCode>, AuthServiceError>;

    /// Mark a code used if it is still unused. Returns `false` when another
    /// caller consumed it first.
    async fn consume(&self, id: OtpId) -> Result<bool, AuthServiceError>;
}

/// Read access to accounts.
pub trait UserRepository: Send + Sync {
    async fn find_active_by_phone(&self, phone: &str)
    -> Result<Option<AuthUser>, AuthServiceError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<AuthUser>, AuthServiceError>;
}

/// Account mutations that complete a verification. Each method consumes the
/// code and applies the change in one transaction; a code consumed
/// concurrently yields [`AuthServiceError::InvalidCode`] and nothing is written.
pub trait AccountRepository: Send + Sync {
    /// Fails with [`AuthServiceError::PhoneAlreadyRegistered`] on a phone collision.
    async fn register(&self, otp_id: OtpId, user: &NewUser) -> Result<AuthUser, AuthServiceError>;

    async fn reset_password(
        &self,
        otp_id: OtpId,
        user_id: UserId,
        password_hash: &str,
    ) -> Result<(), AuthServiceError>;

    /// Fails with [`AuthServiceError::PhoneAlreadyRegistered`] on a phone collision.
    async fn change_phone(
        &self,
        otp_id: OtpId,
        user_id: UserId,
        new_phone: &Phone,
    ) -> Result<AuthUser, AuthServiceError>;

    /// Replace the password of a signed-in user. Needs no code; the caller has
    /// already checked the current password.
    async fn change_password(
        &self,
        user_id: UserId,
        password_hash: &str,
    ) -> Result<(), AuthServiceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    #[error("sms gateway unreachable: {0}")]
    Transport(String),
    #[error("sms gateway rejected the message with status {0}")]
    Rejected(String),
}

/// Outbound SMS delivery.
pub trait SmsSender: Send + Sync {
    async fn send(&self, phone: &Phone, message: &str) -> Result<(), SmsError>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of fresh verification codes.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> OtpCode;
}
