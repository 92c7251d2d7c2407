use anyhow::Context as _;

/// Courses service configuration loaded from environment variables.
#[derive(Debug)]
pub struct CoursesConfig {
    /// PostgreSQL connection URL. The `users` table of the auth service must be
    /// reachable through it.
    pub database_url: String,
    /// HMAC secret shared with the auth service for validating access tokens.
    pub jwt_secret: String,
    /// TCP port to listen on (default 3113). Env var: `COURSES_PORT`.
    pub courses_port: u16,
}

impl CoursesConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            jwt_secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            courses_port: std::env::var("COURSES_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3113),
        })
    }
}
