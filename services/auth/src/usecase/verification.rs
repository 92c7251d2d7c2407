use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use fixoo_domain::phone::Phone;
use fixoo_domain::verification::{OTP_COOLDOWN_SECS, OTP_TTL_SECS, OtpCode, OtpPurpose};

use crate::domain::repository::{Clock, CodeGenerator, OtpRepository, SmsSender, UserRepository};
use crate::domain::types::{IssueOutcome, OneTimeCode};
use crate::error::AuthServiceError;

/// SMS text for a code. The code is the only variable part.
pub fn sms_message(purpose: OtpPurpose, code: &OtpCode) -> String {
    match purpose {
        OtpPurpose::Registration => format!(
            "Fixoo platformasidan ro'yxatdan o'tish uchun tasdiqlash kodi: {code}. Kodni hech kimga bermang!"
        ),
        OtpPurpose::PasswordReset => format!(
            "Fixoo platformasida parolingizni tiklash uchun tasdiqlash kodi: {code}. Kodni hech kimga bermang!"
        ),
        OtpPurpose::PhoneChange => format!(
            "Fixoo platformasida telefoningizni o'zgartirish uchun tasdiqlash kodi: {code}. Kodni hech kimga bermang!"
        ),
    }
}

/// Whole seconds until the cooldown that started at `last_issued_at` ends, rounded up, at least 1.
pub fn retry_after_secs(last_issued_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let remaining = last_issued_at + Duration::seconds(OTP_COOLDOWN_SECS) - now;
    let millis = u64::try_from(remaining.num_milliseconds()).unwrap_or(0);
    millis.div_ceil(1000).max(1)
}

/// Find the unused code a caller presented and reject it if expired. Does not consume.
pub async fn find_live_code<O: OtpRepository>(
    otps: &O,
    now: DateTime<Utc>,
    phone: &Phone,
    purpose: OtpPurpose,
    code: &OtpCode,
) -> Result<OneTimeCode, AuthServiceError> {
    let record = otps
        .find_unused(phone, purpose, code)
        .await?
        .ok_or(AuthServiceError::InvalidCode)?;
    if record.is_expired_at(now) {
        return Err(AuthServiceError::ExpiredCode);
    }
    Ok(record)
}

// ── RequestVerification ──────────────────────────────────────────────────────

pub struct RequestVerificationInput {
    pub phone: String,
    pub purpose: String,
}

#[derive(Debug)]
pub struct RequestVerificationOutput {
    pub ttl_seconds: i64,
}

pub struct RequestVerificationUseCase<U, O, S, C, G>
where
    U: UserRepository,
    O: OtpRepository,
    S: SmsSender,
    C: Clock,
    G: CodeGenerator,
{
    pub users: U,
    pub otps: O,
    pub sms: S,
    pub clock: C,
    pub codes: G,
}

impl<U, O, S, C, G> RequestVerificationUseCase<U, O, S, C, G>
where
    U: UserRepository,
    O: OtpRepository,
    S: SmsSender,
    C: Clock,
    G: CodeGenerator,
{
    pub async fn execute(
        &self,
        input: RequestVerificationInput,
    ) -> Result<RequestVerificationOutput, AuthServiceError> {
        let phone = Phone::parse(&input.phone)?;
        let purpose: OtpPurpose = input.purpose.parse()?;

        match purpose {
            OtpPurpose::Registration => {
                if self.users.find_active_by_phone(phone.as_str()).await?.is_some() {
                    return Err(AuthServiceError::PhoneAlreadyRegistered);
                }
            }
            OtpPurpose::PasswordReset => {
                if self.users.find_active_by_phone(phone.as_str()).await?.is_none() {
                    return Err(AuthServiceError::UserNotFound);
                }
            }
            // Whether the new phone is free is checked when the change is applied.
            OtpPurpose::PhoneChange => {}
        }

        let now = self.clock.now();
        let record = OneTimeCode::issue(phone, purpose, self.codes.generate(), now);
        let outcome = self
            .otps
            .replace_if_cooled_down(&record, Duration::seconds(OTP_COOLDOWN_SECS))
            .await?;
        if let IssueOutcome::CoolingDown { last_issued_at } = outcome {
            return Err(AuthServiceError::RateLimited {
                retry_after_secs: retry_after_secs(last_issued_at, now),
            });
        }

        let message = sms_message(purpose, &record.code);
        if let Err(e) = self.sms.send(&record.phone, &message).await {
            warn!(phone = %record.phone, %purpose, error = %e, "verification sms not delivered");
            // Drop the undelivered code so it neither verifies nor holds the cooldown.
            self.otps.delete(record.id).await?;
            return Err(AuthServiceError::DeliveryFailed);
        }

        info!(phone = %record.phone, %purpose, "verification code issued");
        Ok(RequestVerificationOutput {
            ttl_seconds: OTP_TTL_SECS,
        })
    }
}

// ── ConfirmVerification ──────────────────────────────────────────────────────

pub struct ConfirmVerificationInput {
    pub phone: String,
    pub purpose: String,
    pub code: String,
}

#[derive(Debug)]
pub struct ConfirmVerificationOutput {
    pub verified: bool,
}

pub struct ConfirmVerificationUseCase<O: OtpRepository, C: Clock> {
    pub otps: O,
    pub clock: C,
}

impl<O: OtpRepository, C: Clock> ConfirmVerificationUseCase<O, C> {
    pub async fn execute(
        &self,
        input: ConfirmVerificationInput,
    ) -> Result<ConfirmVerificationOutput, AuthServiceError> {
        let phone = Phone::parse(&input.phone)?;
        let purpose: OtpPurpose = input.purpose.parse()?;
        let code = OtpCode::parse(&input.code)?;

        let record = find_live_code(&self.otps, self.clock.now(), &phone, purpose, &code).await?;
        if !self.otps.consume(record.id).await? {
            return Err(AuthServiceError::InvalidCode);
        }

        info!(%phone, %purpose, "verification code consumed");
        Ok(ConfirmVerificationOutput { verified: true })
    }
}
