pub mod cancellation;
pub mod models;
pub mod orchestrator;

#[cfg(test)]
mod tests;

pub use models::{
    BookingConfirmation, BookingDetails, CancellationOutcome, CreateBookingRequest,
    OrchestratorConfig, StatusNotification,
};
pub use orchestrator::BookingOrchestrator;
