//! Fixed-template email triggers.
//!
//! Each trigger makes exactly one `Mailer::send` call and hands back the
//! mailer's result untouched. Retrying is left to the caller.

use anyhow::Result;

use crate::mail::{EmailMessage, Mailer};

pub const DISPUTE_SUBJECT: &str = "A dispute has been opened";
pub const DISPUTE_TEMPLATE: &str = "dispute-notification";

pub const REVIEW_REQUEST_SUBJECT: &str = "How was your booking? Leave a review";
pub const REVIEW_REQUEST_TEMPLATE: &str = "review-request";

pub fn dispute_message(to: &str, dispute_id: &str) -> EmailMessage {
    EmailMessage::new(to, DISPUTE_SUBJECT, DISPUTE_TEMPLATE).with_datum("disputeId", dispute_id)
}

pub fn review_request_message(to: &str, booking_id: &str) -> EmailMessage {
    EmailMessage::new(to, REVIEW_REQUEST_SUBJECT, REVIEW_REQUEST_TEMPLATE)
        .with_datum("bookingId", booking_id)
}

pub async fn send_dispute_notification(
    mailer: &dyn Mailer,
    to: &str,
    dispute_id: &str,
) -> Result<()> {
    tracing::info!(to = to, dispute_id = dispute_id, "notify.dispute");
    mailer.send(dispute_message(to, dispute_id)).await
}

pub async fn send_review_request(mailer: &dyn Mailer, to: &str, booking_id: &str) -> Result<()> {
    tracing::info!(to = to, booking_id = booking_id, "notify.review_request");
    mailer.send(review_request_message(to, booking_id)).await
}
