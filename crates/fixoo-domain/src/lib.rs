//! Domain types shared across all Fixoo services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod entitlement;
pub mod id;
pub mod phone;
pub mod user;
pub mod verification;
