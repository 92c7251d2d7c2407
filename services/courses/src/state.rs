use sea_orm::DatabaseConnection;

use fixoo_auth_types::identity::JwtSecret;

use crate::infra::db::{
    DbContentRepository, DbCourseGraphRepository, DbEnrollmentRepository, DbUserDirectory,
};
use crate::usecase::entitlement::ResolveEntitlementUseCase;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
}

impl AppState {
    pub fn course_graph(&self) -> DbCourseGraphRepository {
        DbCourseGraphRepository {
            db: self.db.clone(),
        }
    }

    pub fn enrollment_repo(&self) -> DbEnrollmentRepository {
        DbEnrollmentRepository {
            db: self.db.clone(),
        }
    }

    pub fn user_directory(&self) -> DbUserDirectory {
        DbUserDirectory {
            db: self.db.clone(),
        }
    }

    pub fn content_repo(&self) -> DbContentRepository {
        DbContentRepository {
            db: self.db.clone(),
        }
    }

    pub fn entitlement(
        &self,
    ) -> ResolveEntitlementUseCase<DbCourseGraphRepository, DbEnrollmentRepository> {
        ResolveEntitlementUseCase {
            graph: self.course_graph(),
            enrollments: self.enrollment_repo(),
        }
    }
}

impl JwtSecret for AppState {
    fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
}
