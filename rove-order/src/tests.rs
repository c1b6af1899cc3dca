use crate::models::{CreateBookingRequest, OrchestratorConfig, StatusNotification};
use crate::orchestrator::BookingOrchestrator;
use async_trait::async_trait;
use rove_core::store::{BookingStore, BookingUpdate, NewBooking};
use rove_core::supplier::{
    CancelRequest, ContactInfo, FinishData, FinishRequest, FormData, FormRequest, Guest, Holder,
    OrderInfoRequest, PrebookRequest, StatusData, StatusRequest, SupplierApi, SupplierError,
    SupplierReply,
};
use rove_core::{BookingError, BookingStatus};
use rove_store::MemoryBookingStore;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted supplier double: each operation pops its next reply from a
/// queue. A form reply with status ok and no payload echoes the request's
/// partner order id, like the real supplier does.
#[derive(Default)]
struct ScriptedSupplier {
    form_replies: Mutex<VecDeque<SupplierReply<FormData>>>,
    finish_replies: Mutex<VecDeque<SupplierReply<FinishData>>>,
    poll_replies: Mutex<VecDeque<SupplierReply<StatusData>>>,
    cancel_replies: Mutex<VecDeque<SupplierReply<StatusData>>>,
    repeat_last_poll: bool,
    fail_order_info: bool,
    form_ids: Mutex<Vec<String>>,
    poll_calls: AtomicU32,
    cancel_calls: AtomicU32,
}

impl ScriptedSupplier {
    fn new() -> Self {
        Self::default()
    }

    fn script_form(&self, status: &str) {
        self.form_replies
            .lock()
            .unwrap()
            .push_back(SupplierReply { data: None, status: BookingStatus::from(status) });
    }

    fn script_finish(&self, status: &str) {
        self.finish_replies.lock().unwrap().push_back(SupplierReply {
            data: Some(FinishData { order_id: None }),
            status: BookingStatus::from(status),
        });
    }

    fn script_poll(&self, status: &str, order_id: Option<&str>) {
        self.poll_replies.lock().unwrap().push_back(SupplierReply {
            data: Some(StatusData {
                status: BookingStatus::from(status),
                order_id: order_id.map(String::from),
            }),
            status: BookingStatus::Ok,
        });
    }

    fn script_cancel(&self, status: &str) {
        self.cancel_replies.lock().unwrap().push_back(SupplierReply {
            data: None,
            status: BookingStatus::from(status),
        });
    }

    fn form_ids(&self) -> Vec<String> {
        self.form_ids.lock().unwrap().clone()
    }
}

#[async_trait]
impl SupplierApi for ScriptedSupplier {
    async fn prebook(&self, _request: &PrebookRequest) -> Result<SupplierReply<Value>, SupplierError> {
        Ok(SupplierReply { data: Some(json!({"book_hash": "p-verified"})), status: BookingStatus::Ok })
    }

    async fn create_form(&self, request: &FormRequest) -> Result<SupplierReply<FormData>, SupplierError> {
        self.form_ids.lock().unwrap().push(request.partner_order_id.clone());
        let mut reply = self
            .form_replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected create_form call");
        if reply.status == BookingStatus::Ok && reply.data.is_none() {
            reply.data = Some(FormData { partner_order_id: request.partner_order_id.clone() });
        }
        Ok(reply)
    }

    async fn finish(&self, _request: &FinishRequest) -> Result<SupplierReply<FinishData>, SupplierError> {
        Ok(self
            .finish_replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected finish call"))
    }

    async fn poll_status(&self, _request: &StatusRequest) -> Result<SupplierReply<StatusData>, SupplierError> {
        self.poll_calls.fetch_add(1, Ordering::SeqCst);
        let mut replies = self.poll_replies.lock().unwrap();
        if self.repeat_last_poll && replies.len() == 1 {
            return Ok(replies.front().cloned().unwrap());
        }
        Ok(replies.pop_front().expect("unexpected poll_status call"))
    }

    async fn get_order_info(&self, request: &OrderInfoRequest) -> Result<SupplierReply<Value>, SupplierError> {
        if self.fail_order_info {
            return Err(SupplierError::Transport {
                endpoint: "hotel/order/info/".to_string(),
                message: "connection refused".to_string(),
            });
        }
        Ok(SupplierReply {
            data: Some(json!({"order_id": request.order_id, "status": "completed"})),
            status: BookingStatus::Ok,
        })
    }

    async fn cancel_order(&self, _request: &CancelRequest) -> Result<SupplierReply<StatusData>, SupplierError> {
        self.cancel_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .cancel_replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected cancel_order call"))
    }
}

fn booking_request() -> CreateBookingRequest {
    CreateBookingRequest {
        book_hash: "p-abc123".to_string(),
        hotel_id: "gran_hotel_madrid".to_string(),
        checkin: chrono::NaiveDate::from_ymd_opt(2026, 9, 10).unwrap(),
        checkout: chrono::NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
        language: "en".to_string(),
        user: ContactInfo { email: "ana@example.com".to_string(), phone: Some("+34600000000".to_string()) },
        payment_type: "deposit".to_string(),
        holder: Holder { name: "Ana".to_string(), surname: "Reyes".to_string() },
        guests: vec![Guest { name: "Ana".to_string(), surname: "Reyes".to_string(), is_child: false }],
        total_amount: 640.0,
        currency: "EUR".to_string(),
    }
}

fn fast_config() -> OrchestratorConfig {
    OrchestratorConfig {
        poll_interval: Duration::from_millis(0),
        poll_max_attempts: 120,
        cancel_retry_delay: Duration::from_millis(0),
    }
}

fn orchestrator(supplier: Arc<ScriptedSupplier>, store: Arc<MemoryBookingStore>) -> BookingOrchestrator {
    BookingOrchestrator::new(supplier, store, fast_config())
}

/// Seed a record the way a completed booking would have left it.
async fn seed_confirmed(store: &MemoryBookingStore, partner_order_id: &str, supplier_order_id: Option<&str>) {
    store
        .create_booking(NewBooking {
            partner_order_id: partner_order_id.to_string(),
            status: BookingStatus::FormCreated,
            hotel_id: "gran_hotel_madrid".to_string(),
            checkin_date: chrono::NaiveDate::from_ymd_opt(2026, 9, 10).unwrap(),
            checkout_date: chrono::NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
            guest_name: "Ana Reyes".to_string(),
            guest_email: "ana@example.com".to_string(),
            guest_phone: None,
            total_amount: 640.0,
            currency: "EUR".to_string(),
            book_hash: "p-abc123".to_string(),
        })
        .await
        .unwrap();
    store
        .update_booking(
            partner_order_id,
            BookingUpdate {
                status: Some(BookingStatus::Ok),
                supplier_order_id: supplier_order_id.map(String::from),
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_scenario_a_confirms_after_processing_polls() {
    let supplier = Arc::new(ScriptedSupplier::new());
    supplier.script_form("ok");
    supplier.script_finish("ok");
    supplier.script_poll("processing", None);
    supplier.script_poll("processing", None);
    supplier.script_poll("ok", Some("SUP-1001"));

    let store = Arc::new(MemoryBookingStore::new());
    let result = orchestrator(supplier.clone(), store.clone())
        .create_booking(booking_request())
        .await
        .unwrap();

    assert_eq!(result.booking_status, BookingStatus::Ok);
    assert_eq!(result.supplier_order_id.as_deref(), Some("SUP-1001"));
    assert_eq!(supplier.poll_calls.load(Ordering::SeqCst), 3);

    // Exactly one record, keyed by the returned partner order id.
    assert_eq!(store.record_count().await, 1);
    let record = store
        .find_by_partner_order_id(&result.partner_order_id)
        .await
        .unwrap()
        .expect("record should exist under the returned id");
    assert_eq!(record.status, BookingStatus::Ok);
    assert_eq!(record.supplier_order_id.as_deref(), Some("SUP-1001"));
}

#[tokio::test]
async fn test_scenario_b_duplicate_form_regenerates_id() {
    let supplier = Arc::new(ScriptedSupplier::new());
    supplier.script_form("double_booking_form");
    supplier.script_form("ok");
    supplier.script_finish("ok");
    supplier.script_poll("ok", Some("SUP-1002"));

    let store = Arc::new(MemoryBookingStore::new());
    let result = orchestrator(supplier.clone(), store.clone())
        .create_booking(booking_request())
        .await
        .unwrap();

    let ids = supplier.form_ids();
    assert_eq!(ids.len(), 2, "exactly one form retry");
    assert_ne!(ids[0], ids[1], "retry must carry a freshly minted id");
    assert_eq!(result.partner_order_id, ids[1]);
    assert!(store.find_by_partner_order_id(&ids[0]).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_form_retried_exactly_once() {
    let supplier = Arc::new(ScriptedSupplier::new());
    supplier.script_form("double_booking_form");
    supplier.script_form("double_booking_form");

    let store = Arc::new(MemoryBookingStore::new());
    let err = orchestrator(supplier.clone(), store.clone())
        .create_booking(booking_request())
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::Terminal(BookingStatus::DoubleBookingForm)));
    assert_eq!(supplier.form_ids().len(), 2);
    assert_eq!(store.record_count().await, 0);
}

#[tokio::test]
async fn test_form_terminal_failure_leaves_no_record() {
    let supplier = Arc::new(ScriptedSupplier::new());
    supplier.script_form("soldout");

    let store = Arc::new(MemoryBookingStore::new());
    let err = orchestrator(supplier, store.clone())
        .create_booking(booking_request())
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::Terminal(BookingStatus::Soldout)));
    assert_eq!(store.record_count().await, 0);
}

#[tokio::test]
async fn test_form_retryable_status_is_transient() {
    let supplier = Arc::new(ScriptedSupplier::new());
    supplier.script_form("timeout");

    let store = Arc::new(MemoryBookingStore::new());
    let err = orchestrator(supplier, store)
        .create_booking(booking_request())
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::Transient(BookingStatus::Timeout)));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_scenario_d_finish_failure_skips_polling() {
    let supplier = Arc::new(ScriptedSupplier::new());
    supplier.script_form("ok");
    supplier.script_finish("booking_finish_did_not_succeed");

    let store = Arc::new(MemoryBookingStore::new());
    let err = orchestrator(supplier.clone(), store.clone())
        .create_booking(booking_request())
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::Terminal(BookingStatus::BookingFinishDidNotSucceed)));
    assert_eq!(supplier.poll_calls.load(Ordering::SeqCst), 0, "no polling after a terminal finish");

    // The record captures the failure rather than implying success.
    let record = store
        .find_by_partner_order_id(&supplier.form_ids()[0])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.status, BookingStatus::BookingFinishDidNotSucceed);
}

#[tokio::test]
async fn test_expired_form_surfaces_as_restartable() {
    let supplier = Arc::new(ScriptedSupplier::new());
    supplier.script_form("ok");
    supplier.script_finish("booking_form_expired");

    let store = Arc::new(MemoryBookingStore::new());
    let err = orchestrator(supplier.clone(), store.clone())
        .create_booking(booking_request())
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::FormExpired));
    // Record stays in its non-terminal form_created state.
    let record = store
        .find_by_partner_order_id(&supplier.form_ids()[0])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.status, BookingStatus::FormCreated);
}

#[tokio::test]
async fn test_scenario_c_poll_exhaustion_raises_poll_timeout() {
    let mut supplier = ScriptedSupplier::new();
    supplier.repeat_last_poll = true;
    let supplier = Arc::new(supplier);
    supplier.script_form("ok");
    supplier.script_finish("ok");
    supplier.script_poll("processing", None);

    let store = Arc::new(MemoryBookingStore::new());
    let err = orchestrator(supplier.clone(), store.clone())
        .create_booking(booking_request())
        .await
        .unwrap_err();

    match err {
        BookingError::PollTimeout { attempts, .. } => assert_eq!(attempts, 120),
        other => panic!("expected PollTimeout, got {:?}", other),
    }
    assert_eq!(supplier.poll_calls.load(Ordering::SeqCst), 120);

    // Not marked failed: supplier-side state is unknown, not failed.
    let record = store
        .find_by_partner_order_id(&supplier.form_ids()[0])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.status, BookingStatus::FormCreated);
    assert!(!record.status.is_terminal());
}

#[tokio::test]
async fn test_poll_stops_on_first_terminal_failure() {
    let supplier = Arc::new(ScriptedSupplier::new());
    supplier.script_form("ok");
    supplier.script_finish("ok");
    supplier.script_poll("processing", None);
    supplier.script_poll("soldout", None);
    supplier.script_poll("ok", Some("SUP-never-reached"));

    let store = Arc::new(MemoryBookingStore::new());
    let err = orchestrator(supplier.clone(), store.clone())
        .create_booking(booking_request())
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::Terminal(BookingStatus::Soldout)));
    assert_eq!(supplier.poll_calls.load(Ordering::SeqCst), 2, "stops on first terminal failure");

    let record = store
        .find_by_partner_order_id(&supplier.form_ids()[0])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.status, BookingStatus::Soldout);
}

#[tokio::test]
async fn test_retryable_poll_statuses_keep_polling() {
    let supplier = Arc::new(ScriptedSupplier::new());
    supplier.script_form("ok");
    supplier.script_finish("ok");
    supplier.script_poll("timeout", None);
    supplier.script_poll("unknown", None);
    supplier.script_poll("ok", Some("SUP-1006"));

    let store = Arc::new(MemoryBookingStore::new());
    let result = orchestrator(supplier.clone(), store)
        .create_booking(booking_request())
        .await
        .unwrap();

    // timeout/unknown mid-poll are not terminal: the loop keeps going.
    assert_eq!(result.booking_status, BookingStatus::Ok);
    assert_eq!(result.supplier_order_id.as_deref(), Some("SUP-1006"));
    assert_eq!(supplier.poll_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_unrecognized_poll_status_keeps_polling() {
    let supplier = Arc::new(ScriptedSupplier::new());
    supplier.script_form("ok");
    supplier.script_finish("ok");
    supplier.script_poll("queued_for_review", None);
    supplier.script_poll("confirmed", Some("SUP-1003"));

    let store = Arc::new(MemoryBookingStore::new());
    let result = orchestrator(supplier.clone(), store)
        .create_booking(booking_request())
        .await
        .unwrap();

    assert_eq!(result.booking_status, BookingStatus::Confirmed);
    assert_eq!(supplier.poll_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_confirmed_booking_survives_persistence_failure() {
    let supplier = Arc::new(ScriptedSupplier::new());
    supplier.script_form("ok");
    supplier.script_finish("ok");
    supplier.script_poll("ok", Some("SUP-1004"));

    let store = Arc::new(MemoryBookingStore::new());
    let orch = orchestrator(supplier, store.clone());

    // Break updates after the record is created: create_booking inserts,
    // the final confirmation write will fail and must be swallowed.
    store.set_fail_updates(true);
    let result = orch.create_booking(booking_request()).await.unwrap();

    assert_eq!(result.booking_status, BookingStatus::Ok);
    assert_eq!(result.supplier_order_id.as_deref(), Some("SUP-1004"));
}

#[tokio::test]
async fn test_audit_log_written_for_booking_steps() {
    let supplier = Arc::new(ScriptedSupplier::new());
    supplier.script_form("ok");
    supplier.script_finish("ok");
    supplier.script_poll("ok", Some("SUP-1005"));

    let store = Arc::new(MemoryBookingStore::new());
    orchestrator(supplier, store.clone())
        .create_booking(booking_request())
        .await
        .unwrap();

    let entries = store.audit_entries().await;
    let endpoints: Vec<&str> = entries.iter().map(|e| e.endpoint.as_str()).collect();
    assert_eq!(
        endpoints,
        vec![
            "hotel/order/booking/form/",
            "hotel/order/booking/finish/",
            "hotel/order/booking/finish/status/",
        ]
    );

    // Each entry records the decoded reply envelope, not a synthesized one.
    assert_eq!(entries[1].response["status"], "ok");
    assert_eq!(entries[2].response["data"]["order_id"], "SUP-1005");
}

#[tokio::test]
async fn test_get_booking_enriches_with_supplier_info() {
    let supplier = Arc::new(ScriptedSupplier::new());
    let store = Arc::new(MemoryBookingStore::new());
    seed_confirmed(&store, "ROVE-1-seeded", Some("SUP-2001")).await;

    let details = orchestrator(supplier, store)
        .get_booking("ROVE-1-seeded")
        .await
        .unwrap();

    assert_eq!(details.record.partner_order_id, "ROVE-1-seeded");
    let info = details.supplier_info.expect("live info expected");
    assert_eq!(info["order_id"], "SUP-2001");
}

#[tokio::test]
async fn test_get_booking_enrichment_failure_is_non_fatal() {
    let mut supplier = ScriptedSupplier::new();
    supplier.fail_order_info = true;
    let supplier = Arc::new(supplier);
    let store = Arc::new(MemoryBookingStore::new());
    seed_confirmed(&store, "ROVE-1-seeded", Some("SUP-2001")).await;

    let details = orchestrator(supplier, store)
        .get_booking("ROVE-1-seeded")
        .await
        .unwrap();

    assert!(details.supplier_info.is_none());
    assert_eq!(details.record.status, BookingStatus::Ok);
}

#[tokio::test]
async fn test_get_booking_unknown_id_is_not_found() {
    let supplier = Arc::new(ScriptedSupplier::new());
    let store = Arc::new(MemoryBookingStore::new());

    let err = orchestrator(supplier, store)
        .get_booking("ROVE-0-missing")
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::NotFound));
}

#[tokio::test]
async fn test_cancel_retries_once_on_timeout() {
    let supplier = Arc::new(ScriptedSupplier::new());
    supplier.script_cancel("timeout");
    supplier.script_cancel("ok");

    let store = Arc::new(MemoryBookingStore::new());
    seed_confirmed(&store, "ROVE-1-seeded", Some("SUP-2002")).await;

    let outcome = orchestrator(supplier.clone(), store.clone())
        .cancel_booking("ROVE-1-seeded")
        .await
        .unwrap();

    assert_eq!(outcome.status, BookingStatus::Cancelled);
    assert_eq!(supplier.cancel_calls.load(Ordering::SeqCst), 2);

    let record = store.find_by_partner_order_id("ROVE-1-seeded").await.unwrap().unwrap();
    assert_eq!(record.status, BookingStatus::Cancelled);
    assert_eq!(record.supplier_order_id.as_deref(), Some("SUP-2002"));
}

#[tokio::test]
async fn test_cancel_fails_deterministically_after_second_timeout() {
    let supplier = Arc::new(ScriptedSupplier::new());
    supplier.script_cancel("timeout");
    supplier.script_cancel("timeout");

    let store = Arc::new(MemoryBookingStore::new());
    seed_confirmed(&store, "ROVE-1-seeded", Some("SUP-2003")).await;

    let err = orchestrator(supplier.clone(), store.clone())
        .cancel_booking("ROVE-1-seeded")
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::Terminal(BookingStatus::Timeout)));
    assert_eq!(supplier.cancel_calls.load(Ordering::SeqCst), 2, "retried exactly once");
}

#[tokio::test]
async fn test_cancel_without_supplier_order_id_is_not_found() {
    let supplier = Arc::new(ScriptedSupplier::new());
    let store = Arc::new(MemoryBookingStore::new());
    seed_confirmed(&store, "ROVE-1-seeded", None).await;

    let err = orchestrator(supplier.clone(), store)
        .cancel_booking("ROVE-1-seeded")
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::NotFound));
    assert_eq!(supplier.cancel_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_webhook_non_terminal_is_noop_against_terminal_record() {
    let supplier = Arc::new(ScriptedSupplier::new());
    let store = Arc::new(MemoryBookingStore::new());
    seed_confirmed(&store, "ROVE-1-seeded", Some("SUP-2004")).await;

    orchestrator(supplier, store.clone())
        .apply_status_update(&StatusNotification {
            partner_order_id: "ROVE-1-seeded".to_string(),
            status: BookingStatus::Processing,
            order_id: None,
        })
        .await
        .unwrap();

    let record = store.find_by_partner_order_id("ROVE-1-seeded").await.unwrap().unwrap();
    assert_eq!(record.status, BookingStatus::Ok, "terminal record must not regress");
}

#[tokio::test]
async fn test_webhook_terminal_update_wins() {
    let supplier = Arc::new(ScriptedSupplier::new());
    let store = Arc::new(MemoryBookingStore::new());
    seed_confirmed(&store, "ROVE-1-seeded", None).await;
    store
        .update_booking("ROVE-1-seeded", BookingUpdate::status(BookingStatus::FormCreated))
        .await
        .unwrap();

    orchestrator(supplier, store.clone())
        .apply_status_update(&StatusNotification {
            partner_order_id: "ROVE-1-seeded".to_string(),
            status: BookingStatus::Confirmed,
            order_id: Some("SUP-2005".to_string()),
        })
        .await
        .unwrap();

    let record = store.find_by_partner_order_id("ROVE-1-seeded").await.unwrap().unwrap();
    assert_eq!(record.status, BookingStatus::Confirmed);
    assert_eq!(record.supplier_order_id.as_deref(), Some("SUP-2005"));
}

#[tokio::test]
async fn test_webhook_falls_back_to_supplier_order_id_lookup() {
    let supplier = Arc::new(ScriptedSupplier::new());
    let store = Arc::new(MemoryBookingStore::new());
    seed_confirmed(&store, "ROVE-1-seeded", Some("SUP-2006")).await;

    orchestrator(supplier, store.clone())
        .apply_status_update(&StatusNotification {
            partner_order_id: "unknown-to-us".to_string(),
            status: BookingStatus::Cancelled,
            order_id: Some("SUP-2006".to_string()),
        })
        .await
        .unwrap();

    let record = store.find_by_partner_order_id("ROVE-1-seeded").await.unwrap().unwrap();
    assert_eq!(record.status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn test_webhook_unknown_booking_is_not_found() {
    let supplier = Arc::new(ScriptedSupplier::new());
    let store = Arc::new(MemoryBookingStore::new());

    let err = orchestrator(supplier, store)
        .apply_status_update(&StatusNotification {
            partner_order_id: "ROVE-0-missing".to_string(),
            status: BookingStatus::Ok,
            order_id: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::NotFound));
}

#[tokio::test]
async fn test_list_bookings_pages_through_records() {
    let supplier = Arc::new(ScriptedSupplier::new());
    let store = Arc::new(MemoryBookingStore::new());
    seed_confirmed(&store, "ROVE-1-seeded", None).await;
    tokio::time::sleep(Duration::from_millis(2)).await;
    seed_confirmed(&store, "ROVE-2-seeded", None).await;

    let orch = orchestrator(supplier, store);
    let page = orch.list_bookings(1, 0).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].partner_order_id, "ROVE-2-seeded");

    let rest = orch.list_bookings(10, 1).await.unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].partner_order_id, "ROVE-1-seeded");
}
