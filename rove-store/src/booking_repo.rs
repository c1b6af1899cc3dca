use async_trait::async_trait;
use rove_core::store::{BookingRecord, BookingStore, BookingUpdate, NewBooking, StoreError};
use rove_core::BookingStatus;
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

/// Postgres-backed booking store. Runtime queries rather than compile-time
/// checked macros so the crate builds without a live database.
pub struct PgBookingStore {
    pool: Pool<Postgres>,
}

impl PgBookingStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn record_from_row(row: &PgRow) -> Result<BookingRecord, sqlx::Error> {
    Ok(BookingRecord {
        id: row.try_get("id")?,
        partner_order_id: row.try_get("partner_order_id")?,
        supplier_order_id: row.try_get("supplier_order_id")?,
        status: BookingStatus::from(row.try_get::<String, _>("status")?),
        hotel_id: row.try_get("hotel_id")?,
        checkin_date: row.try_get("checkin_date")?,
        checkout_date: row.try_get("checkout_date")?,
        guest_name: row.try_get("guest_name")?,
        guest_email: row.try_get("guest_email")?,
        guest_phone: row.try_get("guest_phone")?,
        total_amount: row.try_get("total_amount")?,
        currency: row.try_get("currency")?,
        book_hash: row.try_get("book_hash")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn create_booking(&self, booking: NewBooking) -> Result<BookingRecord, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO bookings (
                id, partner_order_id, status, hotel_id, checkin_date, checkout_date,
                guest_name, guest_email, guest_phone, total_amount, currency, book_hash
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&booking.partner_order_id)
        .bind(booking.status.as_str())
        .bind(&booking.hotel_id)
        .bind(booking.checkin_date)
        .bind(booking.checkout_date)
        .bind(&booking.guest_name)
        .bind(&booking.guest_email)
        .bind(&booking.guest_phone)
        .bind(booking.total_amount)
        .bind(&booking.currency)
        .bind(&booking.book_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        let record = record_from_row(&row).map_err(StoreError::backend)?;
        tracing::info!(partner_order_id = %record.partner_order_id, "booking record created");
        Ok(record)
    }

    async fn find_by_partner_order_id(&self, partner_order_id: &str) -> Result<Option<BookingRecord>, StoreError> {
        let row = sqlx::query("SELECT * FROM bookings WHERE partner_order_id = $1")
            .bind(partner_order_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::backend)?;

        row.map(|r| record_from_row(&r)).transpose().map_err(StoreError::backend)
    }

    async fn find_by_supplier_order_id(&self, supplier_order_id: &str) -> Result<Option<BookingRecord>, StoreError> {
        let row = sqlx::query("SELECT * FROM bookings WHERE supplier_order_id = $1")
            .bind(supplier_order_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::backend)?;

        row.map(|r| record_from_row(&r)).transpose().map_err(StoreError::backend)
    }

    async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<BookingRecord>, StoreError> {
        let rows = sqlx::query("SELECT * FROM bookings ORDER BY created_at DESC LIMIT $1 OFFSET $2")
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::backend)?;

        rows.iter().map(record_from_row).collect::<Result<_, _>>().map_err(StoreError::backend)
    }

    async fn update_booking(&self, partner_order_id: &str, update: BookingUpdate) -> Result<BookingRecord, StoreError> {
        // Partial SET list; updated_at always bumps. supplier_order_id can
        // only ever be set, never cleared.
        let mut sets: Vec<String> = Vec::new();
        let mut idx = 1;

        if update.status.is_some() {
            sets.push(format!("status = ${}", idx));
            idx += 1;
        }
        if update.supplier_order_id.is_some() {
            sets.push(format!("supplier_order_id = ${}", idx));
            idx += 1;
        }
        sets.push("updated_at = NOW()".to_string());

        let sql = format!(
            "UPDATE bookings SET {} WHERE partner_order_id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut query = sqlx::query(&sql);
        if let Some(status) = &update.status {
            query = query.bind(status.as_str().to_string());
        }
        if let Some(supplier_order_id) = &update.supplier_order_id {
            query = query.bind(supplier_order_id);
        }
        query = query.bind(partner_order_id);

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::backend)?
            .ok_or_else(|| StoreError::NotFound(partner_order_id.to_string()))?;

        let record = record_from_row(&row).map_err(StoreError::backend)?;
        tracing::info!(partner_order_id, status = %record.status, "booking record updated");
        Ok(record)
    }

    async fn apply_status_transition(&self, partner_order_id: &str, update: BookingUpdate) -> Result<Option<BookingRecord>, StoreError> {
        let mut sets: Vec<String> = Vec::new();
        let mut idx = 1;

        if update.status.is_some() {
            sets.push(format!("status = ${}", idx));
            idx += 1;
        }
        if update.supplier_order_id.is_some() {
            sets.push(format!("supplier_order_id = ${}", idx));
            idx += 1;
        }
        sets.push("updated_at = NOW()".to_string());

        // For a non-terminal status the single-writer guard runs inside the
        // UPDATE itself, so a concurrent terminal write cannot be regressed
        // between a read and this write.
        let guarded = matches!(&update.status, Some(s) if !s.is_terminal());
        let mut sql = format!(
            "UPDATE bookings SET {} WHERE partner_order_id = ${}",
            sets.join(", "),
            idx
        );
        if guarded {
            sql.push_str(&format!(" AND NOT (status = ANY(${}))", idx + 1));
        }
        sql.push_str(" RETURNING *");

        let mut query = sqlx::query(&sql);
        if let Some(status) = &update.status {
            query = query.bind(status.as_str().to_string());
        }
        if let Some(supplier_order_id) = &update.supplier_order_id {
            query = query.bind(supplier_order_id);
        }
        query = query.bind(partner_order_id);
        if guarded {
            let terminal: Vec<String> = BookingStatus::TERMINAL_STATUSES
                .iter()
                .map(|s| s.to_string())
                .collect();
            query = query.bind(terminal);
        }

        let row = query.fetch_optional(&self.pool).await.map_err(StoreError::backend)?;
        match row {
            Some(row) => {
                let record = record_from_row(&row).map_err(StoreError::backend)?;
                tracing::info!(partner_order_id, status = %record.status, "booking status transition applied");
                Ok(Some(record))
            }
            // No row matched: either the record is missing or the guard
            // held the write back. A read distinguishes the two.
            None => match self.find_by_partner_order_id(partner_order_id).await? {
                Some(_) => Ok(None),
                None => Err(StoreError::NotFound(partner_order_id.to_string())),
            },
        }
    }

    async fn append_audit_log(&self, booking_id: Uuid, endpoint: &str, request: &Value, response: &Value) {
        let result = sqlx::query(
            r#"
            INSERT INTO booking_logs (booking_id, endpoint, request, response)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(booking_id)
        .bind(endpoint)
        .bind(request)
        .bind(response)
        .execute(&self.pool)
        .await;

        // Best-effort: an audit failure must never break the booking flow.
        if let Err(e) = result {
            tracing::error!(%booking_id, endpoint, error = %e, "failed to append audit log");
        }
    }
}
