use sea_orm::Database;
use tracing::info;

use fixoo_auth::config::AuthConfig;
use fixoo_auth::infra::sms::EskizSmsClient;
use fixoo_auth::router::build_router;
use fixoo_auth::state::AppState;
use fixoo_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real deployments set the variables directly.
    dotenvy::dotenv().ok();
    init_tracing("fixoo_auth=info,tower_http=info");

    let config = AuthConfig::from_env()?;

    let db = Database::connect(&config.database_url).await?;
    let sms = EskizSmsClient::new(config.sms)?;

    let state = AppState {
        db,
        sms,
        jwt_secret: config.jwt_secret,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.auth_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("auth service listening on {addr}");
    axum::serve(listener, router).await?;
    Ok(())
}
