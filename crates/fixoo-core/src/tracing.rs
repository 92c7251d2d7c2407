use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured JSON stdout tracing. Call once at service startup.
///
/// The filter comes from `RUST_LOG`; when unset, `default_directive` is used
/// (e.g. `"fixoo_auth=info,tower_http=info"`). Subsequent calls are ignored.
pub fn init_tracing(default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json())
        .try_init();
}
