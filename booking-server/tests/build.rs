use axum::body::Body;
use axum::http::Request;
use booking_core::config::{HTTP_PORT, MAIL_ENDPOINT};
use booking_core::{BookingConfig, BookingError, ErrorKind};
use booking_server::{build, listen_addr};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

#[tokio::test]
async fn built_app_serves_logout() {
    let app = build(&BookingConfig::with_defaults()).unwrap();

    let res = app
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 200);
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"success": true}));
}

#[tokio::test]
async fn fresh_store_has_no_bookings() {
    let app = build(&BookingConfig::with_defaults()).unwrap();

    let res = app
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/bookings/b1/payout/hold")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 404);
}

#[test]
fn builds_with_mail_relay_configured() {
    let mut config = BookingConfig::with_defaults();
    config.set(MAIL_ENDPOINT, "https://relay.test/send");
    config.set(HTTP_PORT, "8088");

    assert!(build(&config).is_ok());
    assert_eq!(listen_addr(&config).unwrap(), "127.0.0.1:8088");
}

#[test]
fn malformed_mail_endpoint_fails_build() {
    let mut config = BookingConfig::with_defaults();
    config.set(MAIL_ENDPOINT, "relay without scheme");

    let err = build(&config).err().unwrap();
    assert_eq!(BookingError::kind_of(&err), Some(ErrorKind::BadRequest));
}

#[test]
fn non_numeric_port_is_rejected() {
    let mut config = BookingConfig::with_defaults();
    config.set(HTTP_PORT, "http");
    assert!(listen_addr(&config).is_err());

    assert_eq!(listen_addr(&BookingConfig::new()).unwrap(), "127.0.0.1:3030");
}
