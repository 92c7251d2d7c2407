//! Phone number value object.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Country prefix accepted by the platform.
pub const PHONE_PREFIX: &str = "+998";

/// Number of subscriber digits after [`PHONE_PREFIX`].
pub const PHONE_DIGITS: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhoneError {
    #[error("phone must start with {PHONE_PREFIX}")]
    MissingPrefix,
    #[error("phone must have {PHONE_DIGITS} digits after {PHONE_PREFIX}")]
    BadLength,
    #[error("phone must contain only digits after {PHONE_PREFIX}")]
    NonDigit,
}

/// A validated phone number in `+998XXXXXXXXX` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    pub fn parse(raw: &str) -> Result<Self, PhoneError> {
        let rest = raw
            .strip_prefix(PHONE_PREFIX)
            .ok_or(PhoneError::MissingPrefix)?;
        if rest.len() != PHONE_DIGITS {
            return Err(PhoneError::BadLength);
        }
        if !rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PhoneError::NonDigit);
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Digits only, without the leading `+` (the form SMS gateways expect).
    pub fn digits(&self) -> &str {
        &self.0[1..]
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Phone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Phone::parse(&raw).map_err(serde::de::Error::custom)
    }
}
