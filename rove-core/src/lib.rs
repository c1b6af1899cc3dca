pub mod error;
pub mod ids;
pub mod status;
pub mod store;
pub mod supplier;

pub use error::BookingError;
pub use ids::PartnerOrderId;
pub use status::BookingStatus;
pub use store::{BookingRecord, BookingStore, BookingUpdate, NewBooking, StoreError};
pub use supplier::{SupplierApi, SupplierError, SupplierReply};
