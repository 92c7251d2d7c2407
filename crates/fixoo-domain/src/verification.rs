//! One-time verification code types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of ASCII digits in a verification code.
pub const OTP_CODE_LEN: usize = 6;

/// Lifetime of an issued code in seconds.
pub const OTP_TTL_SECS: i64 = 300;

/// Minimum gap between two issuances for the same (phone, purpose) in seconds.
pub const OTP_COOLDOWN_SECS: i64 = 60;

/// Why a code was issued. Rate limits and invalidation are scoped per purpose.
///
/// Wire format: `"register"`, `"reset_password"`, `"edit_phone"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OtpPurpose {
    #[serde(rename = "register")]
    Registration,
    #[serde(rename = "reset_password")]
    PasswordReset,
    #[serde(rename = "edit_phone")]
    PhoneChange,
}

impl OtpPurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registration => "register",
            Self::PasswordReset => "reset_password",
            Self::PhoneChange => "edit_phone",
        }
    }
}

impl fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("type must be one of register, reset_password, edit_phone")]
pub struct UnknownPurpose(pub String);

impl FromStr for OtpPurpose {
    type Err = UnknownPurpose;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "register" => Ok(Self::Registration),
            "reset_password" => Ok(Self::PasswordReset),
            "edit_phone" => Ok(Self::PhoneChange),
            other => Err(UnknownPurpose(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("code must be exactly {OTP_CODE_LEN} digits")]
pub struct OtpCodeError;

/// A six-digit code. Leading zeros are significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OtpCode(String);

impl OtpCode {
    pub fn parse(raw: &str) -> Result<Self, OtpCodeError> {
        if raw.len() == OTP_CODE_LEN && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(OtpCodeError)
        }
    }

    /// Build a code from the low six decimal digits of `n`, zero-padded.
    pub fn from_number(n: u32) -> Self {
        Self(format!("{:06}", n % 1_000_000))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
