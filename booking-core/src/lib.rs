//! booking-core: framework-agnostic core of the booking marketplace backend.
//!
//! Operations take their collaborators (document store, mailer) as
//! explicit arguments or constructor inputs; nothing here holds global
//! state.

pub mod config;
pub mod errors;
pub mod mail;
pub mod notify;
pub mod payout;
pub mod store;
pub mod user;

pub use config::{BookingConfig, ConfigSnapshot};
pub use errors::{BookingError, ErrorKind};
pub use mail::{EmailMessage, HttpMailer, Mailer, MemoryMailer};
pub use notify::{send_dispute_notification, send_review_request};
pub use payout::{Booking, PayoutService, PayoutStatus};
pub use store::{Document, DocumentStore, MemoryStore};
pub use user::{Role, User};
