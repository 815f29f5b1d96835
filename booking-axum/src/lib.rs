//! booking-axum: Axum adapter for the booking backend.
//!
//! Routes:
//! - `POST /logout`
//! - `GET  /bookings/{id}`
//! - `POST /bookings/{id}/payout/hold`
//! - `POST /notifications/dispute`
//! - `POST /notifications/review-request`
//! - `GET  /health`

pub mod app;
pub mod rest;
pub mod session;
pub mod state;
mod error;

pub use app::BookingApp;
pub use error::ApiError;
pub use state::AppState;
