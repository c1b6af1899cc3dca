use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rove_core::BookingError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    /// Supplier reported a terminal booking failure.
    BookingFailed(String),
    /// Transient condition; the caller may retry the whole request.
    ServiceUnavailable(String),
    /// Poll budget exhausted: the booking is unconfirmed, not failed.
    /// Deliberately not an error status on the wire.
    Unconfirmed { partner_order_id: String },
    Anyhow(anyhow::Error),
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::NotFound => AppError::NotFound("Booking not found".to_string()),
            BookingError::Terminal(status) => AppError::BookingFailed(status.to_string()),
            BookingError::PollTimeout { partner_order_id, .. } => {
                AppError::Unconfirmed { partner_order_id }
            }
            e if e.is_transient() => AppError::ServiceUnavailable(e.to_string()),
            e => AppError::Anyhow(e.into()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Anyhow(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
            }
            AppError::BookingFailed(status) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": "booking failed", "supplier_status": status })),
            )
                .into_response(),
            AppError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": msg, "retryable": true })),
            )
                .into_response(),
            AppError::Unconfirmed { partner_order_id } => (
                StatusCode::ACCEPTED,
                Json(json!({
                    "partner_order_id": partner_order_id,
                    "booking_status": "unconfirmed",
                    "message": "booking status unknown, check later",
                })),
            )
                .into_response(),
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal Server Error" })),
                )
                    .into_response()
            }
        }
    }
}
