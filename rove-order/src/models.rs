use chrono::NaiveDate;
use rove_core::store::BookingRecord;
use rove_core::supplier::{ContactInfo, Guest, Holder};
use rove_core::BookingStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// One booking submission as it enters the orchestrator. Lives only for the
/// duration of the request; its outcome is captured in the BookingRecord.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingRequest {
    pub book_hash: String,
    pub hotel_id: String,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
    #[serde(default = "default_language")]
    pub language: String,
    pub user: ContactInfo,
    #[serde(default = "default_payment_type")]
    pub payment_type: String,
    pub holder: Holder,
    pub guests: Vec<Guest>,
    pub total_amount: f64,
    pub currency: String,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_payment_type() -> String {
    "deposit".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingConfirmation {
    pub partner_order_id: String,
    pub supplier_order_id: Option<String>,
    pub booking_status: BookingStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingDetails {
    pub record: BookingRecord,
    pub supplier_info: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CancellationOutcome {
    pub partner_order_id: String,
    pub status: BookingStatus,
}

/// Inbound webhook payload: the supplier pushing a status change for one of
/// our partner order ids.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusNotification {
    pub partner_order_id: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub order_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub poll_interval: Duration,
    pub poll_max_attempts: u32,
    pub cancel_retry_delay: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        OrchestratorConfig {
            poll_interval: Duration::from_secs(1),
            poll_max_attempts: 120,
            cancel_retry_delay: Duration::from_secs(2),
        }
    }
}
