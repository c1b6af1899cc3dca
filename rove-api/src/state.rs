use rove_core::store::BookingStore;
use rove_core::supplier::SupplierApi;
use rove_order::BookingOrchestrator;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<BookingOrchestrator>,
    pub supplier: Arc<dyn SupplierApi>,
    pub store: Arc<dyn BookingStore>,
}
