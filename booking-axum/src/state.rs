use std::sync::Arc;

use booking_core::{ConfigSnapshot, DocumentStore, Mailer, PayoutService};

/// Shared handler state. Cloned per request; everything inside is `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub mailer: Arc<dyn Mailer>,
    pub payouts: PayoutService,
    pub config: Arc<ConfigSnapshot>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        mailer: Arc<dyn Mailer>,
        config: ConfigSnapshot,
    ) -> Self {
        Self {
            payouts: PayoutService::new(store),
            mailer,
            config: Arc::new(config),
        }
    }
}
