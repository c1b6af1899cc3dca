use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use rove_core::supplier::PrebookRequest;
use rove_core::BookingError;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/prebook", post(prebook))
}

/// Rate verification passthrough. The supplier re-prices the rate on every
/// call, so the response must never be cached.
async fn prebook(
    State(state): State<AppState>,
    Json(request): Json<PrebookRequest>,
) -> Result<impl IntoResponse, AppError> {
    let reply = state
        .supplier
        .prebook(&request)
        .await
        .map_err(BookingError::from)?;

    Ok(([(header::CACHE_CONTROL, "no-store")], Json(reply)))
}
