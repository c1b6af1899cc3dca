use crate::status::BookingStatus;
use crate::store::StoreError;
use crate::supplier::SupplierError;

/// Error taxonomy for the booking pipeline. The variants matter more than
/// the messages: callers branch on them to decide between retrying,
/// surfacing a final failure, or reporting "unconfirmed, reconcile later".
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    /// Network trouble or a retryable supplier status (`timeout`/`unknown`).
    /// Eligible for a caller-level retry; never retried silently here.
    #[error("supplier reported a transient condition: {0}")]
    Transient(BookingStatus),

    /// A status from the fixed terminal failure set. Never retried.
    #[error("booking failed with supplier status: {0}")]
    Terminal(BookingStatus),

    /// The confirmation poll exhausted its attempt budget while the
    /// supplier-side process may still be in flight. Distinct from
    /// `Terminal`: the booking is unconfirmed, not failed.
    #[error("booking {partner_order_id} unconfirmed after {attempts} status checks")]
    PollTimeout { partner_order_id: String, attempts: u32 },

    /// The booking form is no longer usable; the caller must restart from
    /// form creation with a new partner order id.
    #[error("booking form expired before finish")]
    FormExpired,

    #[error("booking not found")]
    NotFound,

    #[error(transparent)]
    Supplier(#[from] SupplierError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl BookingError {
    /// True when the caller may safely retry the whole request.
    pub fn is_transient(&self) -> bool {
        match self {
            BookingError::Transient(_) | BookingError::FormExpired => true,
            BookingError::Supplier(e) => e.is_transient(),
            _ => false,
        }
    }
}
