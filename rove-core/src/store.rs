use crate::status::BookingStatus;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Durable record of one booking attempt, keyed by partner order id.
/// `supplier_order_id`, once set, is never cleared or reassigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: Uuid,
    pub partner_order_id: String,
    pub supplier_order_id: Option<String>,
    pub status: BookingStatus,
    pub hotel_id: String,
    pub checkin_date: NaiveDate,
    pub checkout_date: NaiveDate,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub total_amount: f64,
    pub currency: String,
    pub book_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub partner_order_id: String,
    pub status: BookingStatus,
    pub hotel_id: String,
    pub checkin_date: NaiveDate,
    pub checkout_date: NaiveDate,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub total_amount: f64,
    pub currency: String,
    pub book_hash: String,
}

/// Partial update applied by the orchestrator at state transitions.
/// A `None` field leaves the column untouched; there is deliberately no way
/// to clear `supplier_order_id`.
#[derive(Debug, Clone, Default)]
pub struct BookingUpdate {
    pub status: Option<BookingStatus>,
    pub supplier_order_id: Option<String>,
}

impl BookingUpdate {
    pub fn status(status: BookingStatus) -> Self {
        BookingUpdate { status: Some(status), supplier_order_id: None }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.supplier_order_id.is_none()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("booking not found: {0}")]
    NotFound(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(err: impl std::fmt::Display) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Persistence collaborator consumed by the orchestrator. Mutated only at
/// booking state transitions; the audit log is best-effort and must never
/// fail the caller.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn create_booking(&self, booking: NewBooking) -> Result<BookingRecord, StoreError>;

    async fn find_by_partner_order_id(&self, partner_order_id: &str) -> Result<Option<BookingRecord>, StoreError>;

    async fn find_by_supplier_order_id(&self, supplier_order_id: &str) -> Result<Option<BookingRecord>, StoreError>;

    async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<BookingRecord>, StoreError>;

    async fn update_booking(&self, partner_order_id: &str, update: BookingUpdate) -> Result<BookingRecord, StoreError>;

    /// Guarded variant of `update_booking` for status writers (poll loop,
    /// cancellation, webhook): a non-terminal status never overwrites a
    /// terminal record, and the guard is evaluated atomically with the
    /// write. `Ok(None)` means the guard rejected the transition.
    async fn apply_status_transition(&self, partner_order_id: &str, update: BookingUpdate) -> Result<Option<BookingRecord>, StoreError>;

    /// Record one supplier API exchange against a booking. Implementations
    /// swallow their own failures; callers treat this as fire-and-forget.
    async fn append_audit_log(&self, booking_id: Uuid, endpoint: &str, request: &Value, response: &Value);
}
