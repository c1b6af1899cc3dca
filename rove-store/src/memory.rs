use async_trait::async_trait;
use chrono::Utc;
use rove_core::store::{BookingRecord, BookingStore, BookingUpdate, NewBooking, StoreError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub booking_id: Uuid,
    pub endpoint: String,
    pub request: Value,
    pub response: Value,
}

/// In-memory booking store with the same semantics as the Postgres repo.
/// Used by tests and by local runs without a configured database.
#[derive(Default)]
pub struct MemoryBookingStore {
    records: RwLock<HashMap<String, BookingRecord>>,
    logs: RwLock<Vec<AuditEntry>>,
    fail_updates: AtomicBool,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, update_booking and apply_status_transition return a
    /// backend error. Lets tests verify that post-confirmation persistence
    /// failures are swallowed.
    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    pub async fn audit_entries(&self) -> Vec<AuditEntry> {
        self.logs.read().await.clone()
    }

    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn create_booking(&self, booking: NewBooking) -> Result<BookingRecord, StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&booking.partner_order_id) {
            return Err(StoreError::Backend(format!(
                "duplicate partner_order_id: {}",
                booking.partner_order_id
            )));
        }

        let now = Utc::now();
        let record = BookingRecord {
            id: Uuid::new_v4(),
            partner_order_id: booking.partner_order_id.clone(),
            supplier_order_id: None,
            status: booking.status,
            hotel_id: booking.hotel_id,
            checkin_date: booking.checkin_date,
            checkout_date: booking.checkout_date,
            guest_name: booking.guest_name,
            guest_email: booking.guest_email,
            guest_phone: booking.guest_phone,
            total_amount: booking.total_amount,
            currency: booking.currency,
            book_hash: booking.book_hash,
            created_at: now,
            updated_at: now,
        };

        records.insert(booking.partner_order_id, record.clone());
        Ok(record)
    }

    async fn find_by_partner_order_id(&self, partner_order_id: &str) -> Result<Option<BookingRecord>, StoreError> {
        Ok(self.records.read().await.get(partner_order_id).cloned())
    }

    async fn find_by_supplier_order_id(&self, supplier_order_id: &str) -> Result<Option<BookingRecord>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|r| r.supplier_order_id.as_deref() == Some(supplier_order_id))
            .cloned())
    }

    async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<BookingRecord>, StoreError> {
        let records = self.records.read().await;
        let mut all: Vec<BookingRecord> = records.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn update_booking(&self, partner_order_id: &str, update: BookingUpdate) -> Result<BookingRecord, StoreError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("simulated storage failure".to_string()));
        }

        let mut records = self.records.write().await;
        let record = records
            .get_mut(partner_order_id)
            .ok_or_else(|| StoreError::NotFound(partner_order_id.to_string()))?;

        if let Some(status) = update.status {
            record.status = status;
        }
        if let Some(supplier_order_id) = update.supplier_order_id {
            record.supplier_order_id = Some(supplier_order_id);
        }
        record.updated_at = Utc::now();

        Ok(record.clone())
    }

    async fn apply_status_transition(&self, partner_order_id: &str, update: BookingUpdate) -> Result<Option<BookingRecord>, StoreError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("simulated storage failure".to_string()));
        }

        let mut records = self.records.write().await;
        let record = records
            .get_mut(partner_order_id)
            .ok_or_else(|| StoreError::NotFound(partner_order_id.to_string()))?;

        // Guard checked under the same write lock as the mutation.
        if let Some(status) = &update.status {
            if !status.is_terminal() && record.status.is_terminal() {
                return Ok(None);
            }
        }

        if let Some(status) = update.status {
            record.status = status;
        }
        if let Some(supplier_order_id) = update.supplier_order_id {
            record.supplier_order_id = Some(supplier_order_id);
        }
        record.updated_at = Utc::now();

        Ok(Some(record.clone()))
    }

    async fn append_audit_log(&self, booking_id: Uuid, endpoint: &str, request: &Value, response: &Value) {
        self.logs.write().await.push(AuditEntry {
            booking_id,
            endpoint: endpoint.to_string(),
            request: request.clone(),
            response: response.clone(),
        });
    }
}
