use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, patch, post},
};

use fixoo_core::health::{database_ready, healthz};
use fixoo_core::middleware::with_http_layers;

use crate::handlers::{
    account::{change_password, change_phone, me, register, reset_password},
    token::{login, refresh_token},
    verification::{confirm_verification, request_verification},
};
use crate::state::AppState;

async fn readyz(State(state): State<AppState>) -> StatusCode {
    database_ready(&state.db).await
}

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Verification codes
        .route("/auth/verification", post(request_verification))
        .route("/auth/verification/confirm", post(confirm_verification))
        // Account completion
        .route("/auth/register", post(register))
        .route("/auth/password/reset", post(reset_password))
        .route("/auth/phone", patch(change_phone))
        .route("/auth/password", patch(change_password))
        .route("/auth/me", get(me))
        // Session
        .route("/auth/login", post(login))
        .route("/auth/token/refresh", post(refresh_token))
        .with_state(state);
    with_http_layers(router)
}
