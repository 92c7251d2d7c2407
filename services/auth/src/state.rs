use sea_orm::DatabaseConnection;

use fixoo_auth_types::identity::JwtSecret;

use crate::infra::clock::{RandomCodeGenerator, SystemClock};
use crate::infra::db::{DbAccountRepository, DbOtpRepository, DbUserRepository};
use crate::infra::sms::EskizSmsClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub sms: EskizSmsClient,
    pub jwt_secret: String,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }

    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn sms_sender(&self) -> EskizSmsClient {
        self.sms.clone()
    }

    pub fn clock(&self) -> SystemClock {
        SystemClock
    }

    pub fn code_generator(&self) -> RandomCodeGenerator {
        RandomCodeGenerator
    }
}

impl JwtSecret for AppState {
    fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
}
