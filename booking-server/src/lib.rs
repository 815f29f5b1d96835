use std::sync::Arc;

use anyhow::Result;
use booking_axum::{AppState, BookingApp};
use booking_core::config::{HTTP_HOST, HTTP_PORT};
use booking_core::{BookingConfig, BookingError, HttpMailer, Mailer, MemoryMailer, MemoryStore};

pub const ENV_PREFIX: &str = "BOOKING";

/// Defaults overlaid with `BOOKING__*` environment variables.
pub fn load_config() -> BookingConfig {
    let mut config = BookingConfig::with_defaults();
    config.load_env(ENV_PREFIX);
    config
}

/// Wire store, mailer and routes. Fails on a malformed `mail.endpoint`.
pub fn build(config: &BookingConfig) -> Result<BookingApp> {
    let snapshot = config.snapshot();

    let mailer: Arc<dyn Mailer> = match HttpMailer::from_config(&snapshot)? {
        Some(mailer) => Arc::new(mailer),
        None => {
            tracing::warn!("mail.endpoint not set; emails are kept in memory and not delivered");
            Arc::new(MemoryMailer::new())
        }
    };

    let store = Arc::new(MemoryStore::new());

    let state = AppState::new(store, mailer, snapshot);
    Ok(BookingApp::new(state))
}

/// `host:port` to bind; the port must be numeric.
pub fn listen_addr(config: &BookingConfig) -> Result<String> {
    let snapshot = config.snapshot();
    let host = snapshot.get(HTTP_HOST).unwrap_or("127.0.0.1");
    let port = match snapshot.get(HTTP_PORT) {
        None => 3030,
        Some(raw) => snapshot.get_usize(HTTP_PORT).ok_or_else(|| {
            BookingError::bad_request(format!("Invalid {HTTP_PORT} '{raw}'")).into_anyhow()
        })?,
    };
    Ok(format!("{host}:{port}"))
}
