use chrono::{DateTime, Utc};
use rand::RngExt;

use fixoo_domain::verification::OtpCode;

use crate::domain::repository::{Clock, CodeGenerator};

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Uniform codes over `000000..=999999`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> OtpCode {
        OtpCode::from_number(rand::rng().random_range(0..1_000_000))
    }
}
