use sea_orm::Database;
use tracing::info;

use fixoo_core::tracing::init_tracing;
use fixoo_courses::config::CoursesConfig;
use fixoo_courses::router::build_router;
use fixoo_courses::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("fixoo_courses=info,tower_http=info");

    let config = CoursesConfig::from_env()?;
    let db = Database::connect(&config.database_url).await?;

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.courses_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("courses service listening on {addr}");
    axum::serve(listener, router).await?;
    Ok(())
}
