//! Auth types shared across Fixoo services.
//!
//! Provides the JWT claim layout, access-token validation, and the bearer
//! [`identity::Identity`] extractor.

pub mod identity;
pub mod token;
