use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use rove_core::store::BookingRecord;
use rove_order::{BookingConfirmation, BookingDetails, CancellationOutcome, CreateBookingRequest};
use serde::Deserialize;
use tracing::info;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings", post(create_booking).get(list_bookings))
        .route("/v1/bookings/{order_id}", get(get_booking))
        .route("/v1/bookings/{order_id}/cancel", post(cancel_booking))
}

async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<Json<BookingConfirmation>, AppError> {
    let confirmation = state.orchestrator.create_booking(request).await?;
    info!(
        partner_order_id = %confirmation.partner_order_id,
        status = %confirmation.booking_status,
        "booking created"
    );
    Ok(Json(confirmation))
}

#[derive(Debug, Deserialize)]
struct ListParams {
    #[serde(default = "default_limit")]
    limit: i64,
    #[serde(default)]
    offset: i64,
}

fn default_limit() -> i64 {
    100
}

async fn list_bookings(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<BookingRecord>>, AppError> {
    let bookings = state.orchestrator.list_bookings(params.limit, params.offset).await?;
    Ok(Json(bookings))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<BookingDetails>, AppError> {
    let details = state.orchestrator.get_booking(&order_id).await?;
    Ok(Json(details))
}

async fn cancel_booking(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<CancellationOutcome>, AppError> {
    let outcome = state.orchestrator.cancel_booking(&order_id).await?;
    Ok(Json(outcome))
}
