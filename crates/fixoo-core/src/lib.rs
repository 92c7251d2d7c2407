//! HTTP plumbing shared by Fixoo services: error rendering, JSON extraction,
//! health checks, request-id/trace layers and tracing setup.

pub mod error;
pub mod extract;
pub mod health;
pub mod middleware;
pub mod tracing;
