use crate::models::{BookingConfirmation, CreateBookingRequest, OrchestratorConfig};
use rove_core::store::{BookingStore, BookingUpdate, NewBooking};
use rove_core::supplier::{FinishRequest, FormData, FormRequest, StatusRequest, SupplierApi, SupplierError};
use rove_core::{BookingError, BookingStatus, PartnerOrderId};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

const FORM_ENDPOINT: &str = "hotel/order/booking/form/";
const FINISH_ENDPOINT: &str = "hotel/order/booking/finish/";
const STATUS_ENDPOINT: &str = "hotel/order/booking/finish/status/";

/// Drives the three-step booking transaction against the supplier:
/// form creation, finish, and the asynchronous confirmation poll.
///
/// Collaborators are injected so tests can substitute doubles for both the
/// supplier and the store.
pub struct BookingOrchestrator {
    pub(crate) supplier: Arc<dyn SupplierApi>,
    pub(crate) store: Arc<dyn BookingStore>,
    pub(crate) config: OrchestratorConfig,
}

impl BookingOrchestrator {
    pub fn new(supplier: Arc<dyn SupplierApi>, store: Arc<dyn BookingStore>, config: OrchestratorConfig) -> Self {
        Self { supplier, store, config }
    }

    /// Execute one booking attempt end to end. Returns the confirmed
    /// booking, or an error classified per the taxonomy in
    /// [`BookingError`]; `PollTimeout` means "unconfirmed, reconcile
    /// later", not failure.
    pub async fn create_booking(&self, request: CreateBookingRequest) -> Result<BookingConfirmation, BookingError> {
        let (form, form_request) = self.submit_form(&request).await?;

        let record = self
            .store
            .create_booking(new_booking(&form.partner_order_id, &request))
            .await?;
        self.store
            .append_audit_log(
                record.id,
                FORM_ENDPOINT,
                &to_value(&form_request),
                &json!({ "status": "ok", "data": { "partner_order_id": form.partner_order_id } }),
            )
            .await;

        let finish_request = FinishRequest {
            partner_order_id: form.partner_order_id.clone(),
            payment_type: request.payment_type.clone(),
            holder: request.holder.clone(),
            guests: request.guests.clone(),
        };

        // Finish and polling run on a detached task: if the client-facing
        // request is dropped mid-flight, the supplier-side booking may
        // already be irreversible, so the pipeline keeps going and persists
        // its outcome regardless.
        let supplier = Arc::clone(&self.supplier);
        let store = Arc::clone(&self.store);
        let config = self.config.clone();
        let record_id = record.id;
        let partner_order_id = form.partner_order_id;

        let pipeline = tokio::spawn(async move {
            finish_and_confirm(supplier, store, config, record_id, partner_order_id, finish_request).await
        });

        pipeline
            .await
            .map_err(|e| BookingError::Internal(format!("booking pipeline task failed: {}", e)))?
    }

    /// Step 1: submit the booking form. A `double_booking_form` reply means
    /// our partner order id was already used, so a fresh id is minted and
    /// the form retried exactly once.
    async fn submit_form(&self, request: &CreateBookingRequest) -> Result<(FormData, FormRequest), BookingError> {
        let mut form_request = FormRequest {
            partner_order_id: PartnerOrderId::generate().into_string(),
            book_hash: request.book_hash.clone(),
            user: request.user.clone(),
            language: request.language.clone(),
        };

        let mut reply = self.supplier.create_form(&form_request).await?;

        if reply.status == BookingStatus::DoubleBookingForm {
            tracing::warn!(
                partner_order_id = %form_request.partner_order_id,
                "duplicate booking form detected, regenerating partner order id"
            );
            form_request.partner_order_id = PartnerOrderId::generate().into_string();
            reply = self.supplier.create_form(&form_request).await?;
        }

        match reply.status {
            BookingStatus::Ok => {
                let data = reply.data.ok_or(SupplierError::MissingData {
                    endpoint: FORM_ENDPOINT.to_string(),
                    status: BookingStatus::Ok,
                })?;
                tracing::info!(partner_order_id = %data.partner_order_id, "booking form created");
                Ok((data, form_request))
            }
            status if status.is_retryable() => Err(BookingError::Transient(status)),
            status => {
                tracing::error!(
                    partner_order_id = %form_request.partner_order_id,
                    %status,
                    "booking form rejected"
                );
                Err(BookingError::Terminal(status))
            }
        }
    }
}

/// Step 2 and 3, run detached from the client-facing request.
async fn finish_and_confirm(
    supplier: Arc<dyn SupplierApi>,
    store: Arc<dyn BookingStore>,
    config: OrchestratorConfig,
    record_id: Uuid,
    partner_order_id: String,
    finish_request: FinishRequest,
) -> Result<BookingConfirmation, BookingError> {
    let reply = supplier.finish(&finish_request).await?;
    store
        .append_audit_log(record_id, FINISH_ENDPOINT, &to_value(&finish_request), &to_value(&reply))
        .await;

    match reply.status {
        BookingStatus::Ok => {
            tracing::info!(%partner_order_id, "booking finish initiated");
        }
        BookingStatus::BookingFormExpired => {
            // The form is gone; the caller restarts from step 1 with a new
            // identity. Not retried here.
            tracing::warn!(%partner_order_id, "booking form expired before finish");
            return Err(BookingError::FormExpired);
        }
        status if status.is_retryable() => return Err(BookingError::Transient(status)),
        status => {
            tracing::error!(%partner_order_id, %status, "booking finish rejected");
            record_failure(&store, &partner_order_id, status.clone()).await;
            return Err(BookingError::Terminal(status));
        }
    }

    poll_until_terminal(supplier, store, config, record_id, partner_order_id).await
}

/// Step 3: poll until the supplier reaches a terminal status or the attempt
/// budget runs out.
async fn poll_until_terminal(
    supplier: Arc<dyn SupplierApi>,
    store: Arc<dyn BookingStore>,
    config: OrchestratorConfig,
    record_id: Uuid,
    partner_order_id: String,
) -> Result<BookingConfirmation, BookingError> {
    let status_request = StatusRequest { partner_order_id: partner_order_id.clone() };

    for attempt in 1..=config.poll_max_attempts {
        let reply = supplier.poll_status(&status_request).await?;
        let (status, supplier_order_id) = match reply.data {
            Some(data) => (data.status, data.order_id),
            None => (reply.status, None),
        };

        if status.is_terminal_success() {
            store
                .append_audit_log(
                    record_id,
                    STATUS_ENDPOINT,
                    &to_value(&status_request),
                    &json!({ "status": status, "data": { "order_id": supplier_order_id } }),
                )
                .await;

            // The supplier booking is already confirmed; a persistence
            // failure here is logged, never surfaced as a booking failure.
            let update = BookingUpdate {
                status: Some(status.clone()),
                supplier_order_id: supplier_order_id.clone(),
            };
            if let Err(e) = store.apply_status_transition(&partner_order_id, update).await {
                tracing::error!(%partner_order_id, error = %e, "booking confirmed but record update failed");
            }

            tracing::info!(%partner_order_id, attempt, "booking confirmed");
            return Ok(BookingConfirmation { partner_order_id, supplier_order_id, booking_status: status });
        }

        if status.is_terminal_failure() {
            tracing::error!(%partner_order_id, %status, attempt, "booking failed with terminal status");
            record_failure(&store, &partner_order_id, status.clone()).await;
            return Err(BookingError::Terminal(status));
        }

        // processing, timeout, unknown, or anything unrecognized: wait and
        // try again within the attempt budget.
        tracing::debug!(%partner_order_id, %status, attempt, "booking still processing");
        tokio::time::sleep(config.poll_interval).await;
    }

    // Supplier-side state is unknown, not failed: the record stays
    // non-terminal for webhook or lookup reconciliation.
    tracing::warn!(%partner_order_id, attempts = config.poll_max_attempts, "status polling exhausted");
    Err(BookingError::PollTimeout { partner_order_id, attempts: config.poll_max_attempts })
}

async fn record_failure(store: &Arc<dyn BookingStore>, partner_order_id: &str, status: BookingStatus) {
    if let Err(e) = store.apply_status_transition(partner_order_id, BookingUpdate::status(status)).await {
        tracing::error!(partner_order_id, error = %e, "failed to record booking failure status");
    }
}

fn new_booking(partner_order_id: &str, request: &CreateBookingRequest) -> NewBooking {
    NewBooking {
        partner_order_id: partner_order_id.to_string(),
        status: BookingStatus::FormCreated,
        hotel_id: request.hotel_id.clone(),
        checkin_date: request.checkin,
        checkout_date: request.checkout,
        guest_name: format!("{} {}", request.holder.name, request.holder.surname),
        guest_email: request.user.email.clone(),
        guest_phone: request.user.phone.clone(),
        total_amount: request.total_amount,
        currency: request.currency.clone(),
        book_hash: request.book_hash.clone(),
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
