//! # Configuration
//!
//! A plain string key/value store, read through an immutable
//! [`ConfigSnapshot`] once the application is wired.
//!
//! ```rust
//! use booking_core::BookingConfig;
//!
//! let mut config = BookingConfig::with_defaults();
//! config.set("http.port", "8080");
//!
//! let snapshot = config.snapshot();
//! assert_eq!(snapshot.get("http.port"), Some("8080"));
//! assert_eq!(snapshot.get("session.cookie"), Some("__session"));
//! ```
//!
//! ## Environment overrides
//! `load_env("BOOKING")` maps `BOOKING__MAIL__ENDPOINT=https://...`
//! to the key `mail.endpoint`.

use std::collections::HashMap;

pub const HTTP_HOST: &str = "http.host";
pub const HTTP_PORT: &str = "http.port";
pub const SESSION_COOKIE: &str = "session.cookie";
pub const SESSION_SECURE: &str = "session.secure";
pub const MAIL_ENDPOINT: &str = "mail.endpoint";
pub const MAIL_API_KEY: &str = "mail.api_key";
pub const MAIL_FROM: &str = "mail.from";

pub const DEFAULT_SESSION_COOKIE: &str = "__session";

#[derive(Debug, Default)]
pub struct BookingConfig {
    values: HashMap<String, String>,
}

impl BookingConfig {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut config = Self::new();
        config.set(HTTP_HOST, "127.0.0.1");
        config.set(HTTP_PORT, "3030");
        config.set(SESSION_COOKIE, DEFAULT_SESSION_COOKIE);
        config.set(SESSION_SECURE, "true");
        config
    }

    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Overlay every `{prefix}__A__B` variable from the process
    /// environment as key `a.b`.
    pub fn load_env(&mut self, prefix: &str) {
        self.load_vars(prefix, std::env::vars());
    }

    pub(crate) fn load_vars<I>(&mut self, prefix: &str, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let prefix = format!("{prefix}__");
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(&prefix) {
                let normalized = stripped.to_lowercase().replace("__", ".");
                self.set(normalized, value);
            }
        }
    }

    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot::new(self.values.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigSnapshot {
    map: HashMap<String, String>,
}

impl ConfigSnapshot {
    pub(crate) fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key).and_then(|v| v.parse::<usize>().ok())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.parse::<bool>().ok())
    }

    /// Name of the cookie that carries the session.
    pub fn session_cookie(&self) -> &str {
        self.get(SESSION_COOKIE)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(DEFAULT_SESSION_COOKIE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_vars_overlay_defaults() {
        let mut config = BookingConfig::with_defaults();
        config.load_vars(
            "BOOKING",
            vec![
                ("BOOKING__HTTP__PORT".to_string(), "9000".to_string()),
                ("BOOKING__MAIL__API_KEY".to_string(), "k".to_string()),
                ("OTHER__HTTP__PORT".to_string(), "1".to_string()),
                ("BOOKINGHTTP".to_string(), "x".to_string()),
            ],
        );

        let snapshot = config.snapshot();
        assert_eq!(snapshot.get_usize(HTTP_PORT), Some(9000));
        assert_eq!(snapshot.get(MAIL_API_KEY), Some("k"));
        assert_eq!(snapshot.get(HTTP_HOST), Some("127.0.0.1"));
        assert!(!config.has("bookinghttp"));
    }

    #[test]
    fn session_cookie_falls_back_when_blank() {
        let mut config = BookingConfig::new();
        assert_eq!(config.snapshot().session_cookie(), "__session");

        config.set(SESSION_COOKIE, "  ");
        assert_eq!(config.snapshot().session_cookie(), "__session");

        config.set(SESSION_COOKIE, "sid");
        assert_eq!(config.snapshot().session_cookie(), "sid");
    }

    #[test]
    fn typed_getters_ignore_garbage() {
        let mut config = BookingConfig::new();
        config.set(SESSION_SECURE, "yes");
        assert_eq!(config.snapshot().get_bool(SESSION_SECURE), None);

        config.set(SESSION_SECURE, "false");
        assert_eq!(config.snapshot().get_bool(SESSION_SECURE), Some(false));
    }
}
