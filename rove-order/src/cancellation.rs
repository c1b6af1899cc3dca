use crate::models::{BookingDetails, CancellationOutcome, StatusNotification};
use crate::orchestrator::BookingOrchestrator;
use rove_core::store::{BookingRecord, BookingUpdate};
use rove_core::supplier::{CancelRequest, OrderInfoRequest};
use rove_core::{BookingError, BookingStatus};

impl BookingOrchestrator {
    /// Look up a booking by partner order id. The local record is
    /// authoritative; when a supplier order id is known, a live enrichment
    /// call is attempted and its failure is non-fatal.
    pub async fn get_booking(&self, order_id: &str) -> Result<BookingDetails, BookingError> {
        let record = self
            .store
            .find_by_partner_order_id(order_id)
            .await?
            .ok_or(BookingError::NotFound)?;

        let supplier_info = match &record.supplier_order_id {
            Some(supplier_order_id) => {
                let request = OrderInfoRequest { order_id: supplier_order_id.clone() };
                match self.supplier.get_order_info(&request).await {
                    Ok(reply) => reply.data,
                    Err(e) => {
                        tracing::warn!(order_id, error = %e, "could not fetch live supplier order info");
                        None
                    }
                }
            }
            None => None,
        };

        Ok(BookingDetails { record, supplier_info })
    }

    pub async fn list_bookings(&self, limit: i64, offset: i64) -> Result<Vec<BookingRecord>, BookingError> {
        Ok(self.store.find_all(limit, offset).await?)
    }

    /// Cancel a confirmed booking. A supplier `timeout` is retried exactly
    /// once after a fixed delay; any other non-ok status is final. On
    /// success the local record moves to `cancelled` unconditionally.
    pub async fn cancel_booking(&self, order_id: &str) -> Result<CancellationOutcome, BookingError> {
        let record = self
            .store
            .find_by_partner_order_id(order_id)
            .await?
            .ok_or(BookingError::NotFound)?;

        // Without a supplier order id there is nothing to cancel upstream.
        let supplier_order_id = record.supplier_order_id.clone().ok_or(BookingError::NotFound)?;
        let request = CancelRequest { order_id: supplier_order_id };

        let mut reply = self.supplier.cancel_order(&request).await?;
        if reply.status == BookingStatus::Timeout {
            tracing::warn!(order_id, "cancellation timed out, retrying once");
            tokio::time::sleep(self.config.cancel_retry_delay).await;
            reply = self.supplier.cancel_order(&request).await?;
        }

        if reply.status != BookingStatus::Ok {
            tracing::error!(order_id, status = %reply.status, "cancellation rejected");
            return Err(BookingError::Terminal(reply.status));
        }

        // The supplier-side cancellation already happened; a local record
        // failure is logged, not escalated.
        if let Err(e) = self
            .store
            .apply_status_transition(&record.partner_order_id, BookingUpdate::status(BookingStatus::Cancelled))
            .await
        {
            tracing::error!(order_id, error = %e, "cancelled upstream but record update failed");
        }

        tracing::info!(order_id, "booking cancelled");
        Ok(CancellationOutcome {
            partner_order_id: record.partner_order_id,
            status: BookingStatus::Cancelled,
        })
    }

    /// Reconcile a pushed status update against the local record.
    /// Single-writer rule: an update carrying a terminal status always
    /// wins; a non-terminal update against an already-terminal record is a
    /// no-op. The record read here only resolves the partner order id; the
    /// guard itself runs atomically inside the store, so a poll task
    /// finishing concurrently cannot be regressed by this write.
    pub async fn apply_status_update(&self, notification: &StatusNotification) -> Result<(), BookingError> {
        let record = match self
            .store
            .find_by_partner_order_id(&notification.partner_order_id)
            .await?
        {
            Some(record) => record,
            None => match &notification.order_id {
                Some(order_id) => self
                    .store
                    .find_by_supplier_order_id(order_id)
                    .await?
                    .ok_or(BookingError::NotFound)?,
                None => return Err(BookingError::NotFound),
            },
        };

        let applied = self
            .store
            .apply_status_transition(
                &record.partner_order_id,
                BookingUpdate {
                    status: Some(notification.status.clone()),
                    supplier_order_id: notification.order_id.clone(),
                },
            )
            .await?;

        match applied {
            Some(record) => tracing::info!(
                partner_order_id = %record.partner_order_id,
                status = %record.status,
                "status update applied"
            ),
            None => tracing::debug!(
                partner_order_id = %record.partner_order_id,
                pushed = %notification.status,
                "ignoring non-terminal update against terminal record"
            ),
        }
        Ok(())
    }
}
