//! Session termination.
//!
//! Logout only clears the client-held cookie. There is no server-side
//! session record to invalidate here.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use booking_core::config::SESSION_SECURE;
use serde_json::json;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/logout", post(logout))
}

/// `Set-Cookie` value that makes the browser drop `name` immediately.
pub fn removal_cookie(name: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{name}=; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly; SameSite=Lax"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

fn carries_cookie(headers: &HeaderMap, name: &str) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(k, _)| k == name)
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let name = state.config.session_cookie();
    let secure = state.config.get_bool(SESSION_SECURE).unwrap_or(true);

    tracing::info!(had_session = carries_cookie(&headers, name), "session.logout");

    (
        [(header::SET_COOKIE, removal_cookie(name, secure))],
        Json(json!({ "success": true })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn removal_cookie_expires_immediately() {
        let c = removal_cookie("__session", true);
        assert!(c.starts_with("__session=;"));
        assert!(c.contains("Max-Age=0"));
        assert!(c.ends_with("; Secure"));
        assert!(!removal_cookie("__session", false).contains("Secure"));
    }

    #[test]
    fn finds_cookie_among_others() {
        let mut headers = HeaderMap::new();
        assert!(!carries_cookie(&headers, "__session"));

        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; __session=abc"),
        );
        assert!(carries_cookie(&headers, "__session"));
        assert!(!carries_cookie(&headers, "__sess"));
    }
}
