use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use booking_core::{notify, payout::PayoutStatus, Booking, BookingError};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::{ApiError, AppState};

fn map_json_rejection(rejection: JsonRejection) -> ApiError {
    BookingError::bad_request("Failed to parse the request body as JSON")
        .with_errors(json!({"_schema": [rejection.to_string()]}))
        .into()
}

fn validated<T: Validate>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    let Json(body) = body.map_err(map_json_rejection)?;
    body.validate().map_err(|errs| {
        let errors = serde_json::to_value(&errs).unwrap_or_else(|_| json!({}));
        BookingError::unprocessable("Request validation failed").with_errors(errors)
    })?;
    Ok(body)
}

pub fn bookings_router() -> Router<AppState> {
    Router::new()
        .route("/bookings/{id}", get(get_booking))
        .route("/bookings/{id}/payout/hold", post(hold_payout))
}

pub fn notifications_router() -> Router<AppState> {
    Router::new()
        .route("/notifications/dispute", post(notify_dispute))
        .route("/notifications/review-request", post(notify_review_request))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, ApiError> {
    Ok(Json(state.payouts.booking(&id).await?))
}

async fn hold_payout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.payouts.hold(&id).await?;
    Ok(Json(json!({
        "success": true,
        "bookingId": id,
        "payoutStatus": PayoutStatus::Held,
    })))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DisputeNotice {
    #[validate(email)]
    pub to: String,
    #[validate(length(min = 1))]
    pub dispute_id: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequestNotice {
    #[validate(email)]
    pub to: String,
    #[validate(length(min = 1))]
    pub booking_id: String,
}

async fn notify_dispute(
    State(state): State<AppState>,
    body: Result<Json<DisputeNotice>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let notice = validated(body)?;
    notify::send_dispute_notification(state.mailer.as_ref(), &notice.to, &notice.dispute_id)
        .await?;
    Ok(Json(json!({ "success": true })))
}

async fn notify_review_request(
    State(state): State<AppState>,
    body: Result<Json<ReviewRequestNotice>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let notice = validated(body)?;
    notify::send_review_request(state.mailer.as_ref(), &notice.to, &notice.booking_id).await?;
    Ok(Json(json!({ "success": true })))
}
