use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use rove_order::StatusNotification;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/webhooks/booking-status", post(booking_status))
}

/// POST /v1/webhooks/booking-status
/// Receives pushed booking status changes from the supplier. The delivery
/// contract requires a 200 acknowledgement even when the internal update
/// fails; reconciliation happens on the next push or an order lookup.
async fn booking_status(
    State(state): State<AppState>,
    Json(notification): Json<StatusNotification>,
) -> (StatusCode, Json<serde_json::Value>) {
    tracing::info!(
        partner_order_id = %notification.partner_order_id,
        status = %notification.status,
        "booking status webhook received"
    );

    if let Err(e) = state.orchestrator.apply_status_update(&notification).await {
        tracing::error!(
            partner_order_id = %notification.partner_order_id,
            error = %e,
            "webhook update failed, acknowledging anyway"
        );
    }

    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}
