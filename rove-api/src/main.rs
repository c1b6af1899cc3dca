use rove_api::{app, AppState};
use rove_core::store::BookingStore;
use rove_order::{BookingOrchestrator, OrchestratorConfig};
use rove_store::{DbClient, MemoryBookingStore, PgBookingStore};
use rove_supplier::HttpSupplierClient;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rove_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = rove_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Rove API on port {}", config.server.port);

    let supplier = HttpSupplierClient::new(config.supplier.clone())
        .expect("Failed to build supplier client");
    let supplier: Arc<dyn rove_core::supplier::SupplierApi> = Arc::new(supplier);

    let store: Arc<dyn BookingStore> = match &config.database.url {
        Some(url) => {
            let db = DbClient::new(url).await.expect("Failed to connect to database");
            db.migrate().await.expect("Failed to run migrations");
            Arc::new(PgBookingStore::new(db.pool))
        }
        None => {
            tracing::warn!("No database configured, using in-memory booking store");
            Arc::new(MemoryBookingStore::new())
        }
    };

    let orchestrator_config = OrchestratorConfig {
        poll_interval: Duration::from_millis(config.booking.poll_interval_ms),
        poll_max_attempts: config.booking.poll_max_attempts,
        cancel_retry_delay: Duration::from_millis(config.booking.cancel_retry_delay_ms),
    };

    let orchestrator = BookingOrchestrator::new(
        supplier.clone(),
        store.clone(),
        orchestrator_config,
    );

    let app_state = AppState {
        orchestrator: Arc::new(orchestrator),
        supplier,
        store,
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
