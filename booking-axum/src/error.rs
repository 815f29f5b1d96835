use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use booking_core::BookingError;

#[derive(Debug)]
pub struct ApiError(pub anyhow::Error);

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self(e)
    }
}

impl From<BookingError> for ApiError {
    fn from(e: BookingError) -> Self {
        Self(e.into_anyhow())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Keep structured fields even when wrapped by anyhow contexts
        let err = match self.0.chain().find_map(|e| e.downcast_ref::<BookingError>()) {
            Some(err) => err.sanitize_for_client(),
            None => BookingError::general_error(self.0.to_string()),
        };

        let status = StatusCode::from_u16(err.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(err.to_json())).into_response()
    }
}
