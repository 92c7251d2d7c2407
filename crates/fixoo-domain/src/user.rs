//! User domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Platform role of a user account.
///
/// Wire and storage format: `"ADMIN"`, `"MENTOR"`, `"ASSISTANT"`, `"STUDENT"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Mentor,
    Assistant,
    Student,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Mentor => "MENTOR",
            Self::Assistant => "ASSISTANT",
            Self::Student => "STUDENT",
        }
    }

    /// Staff roles run courses; students consume them.
    pub fn is_staff(self) -> bool {
        !matches!(self, Self::Student)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string cannot be parsed as a [`UserRole`].
#[derive(Debug, Error)]
#[error("unknown user role: {0:?}")]
pub struct UnknownRole(pub String);

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "MENTOR" => Ok(Self::Mentor),
            "ASSISTANT" => Ok(Self::Assistant),
            "STUDENT" => Ok(Self::Student),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}
