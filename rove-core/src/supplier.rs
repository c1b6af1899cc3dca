use crate::status::BookingStatus;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope every supplier endpoint answers with. The application-level
/// `status` is distinct from the HTTP status and is classified by the
/// caller, never reinterpreted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierReply<T> {
    pub data: Option<T>,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holder {
    pub name: String,
    pub surname: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guest {
    pub name: String,
    pub surname: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_child: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormRequest {
    pub partner_order_id: String,
    pub book_hash: String,
    pub user: ContactInfo,
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormData {
    pub partner_order_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishRequest {
    pub partner_order_id: String,
    pub payment_type: String,
    pub holder: Holder,
    pub guests: Vec<Guest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishData {
    pub order_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRequest {
    pub partner_order_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusData {
    pub status: BookingStatus,
    pub order_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderInfoRequest {
    pub order_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelRequest {
    pub order_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrebookRequest {
    pub hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_increase_percent: Option<f64>,
}

/// Single point of outbound communication with the upstream booking API.
/// Implementations own auth, timeout tiers and the transport retry policy;
/// callers own the interpretation of the returned application status.
#[async_trait]
pub trait SupplierApi: Send + Sync {
    /// Verify a rate before booking. Never cached.
    async fn prebook(&self, request: &PrebookRequest) -> Result<SupplierReply<Value>, SupplierError>;

    /// Step 1: create the booking form for a partner order id.
    async fn create_form(&self, request: &FormRequest) -> Result<SupplierReply<FormData>, SupplierError>;

    /// Step 2: submit holder/guest/payment data and start the booking.
    async fn finish(&self, request: &FinishRequest) -> Result<SupplierReply<FinishData>, SupplierError>;

    /// Step 3: query the asynchronous confirmation status.
    async fn poll_status(&self, request: &StatusRequest) -> Result<SupplierReply<StatusData>, SupplierError>;

    /// Fetch the supplier's view of a confirmed order.
    async fn get_order_info(&self, request: &OrderInfoRequest) -> Result<SupplierReply<Value>, SupplierError>;

    /// Cancel a confirmed order by supplier order id.
    async fn cancel_order(&self, request: &CancelRequest) -> Result<SupplierReply<StatusData>, SupplierError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SupplierError {
    #[error("supplier request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    #[error("supplier returned HTTP {status} for {endpoint}")]
    UpstreamStatus { endpoint: String, status: u16 },

    #[error("supplier response from {endpoint} could not be decoded: {message}")]
    Decode { endpoint: String, message: String },

    #[error("supplier reply for {endpoint} carried status {status} with no payload")]
    MissingData { endpoint: String, status: BookingStatus },
}

impl SupplierError {
    /// Transport-level retry eligibility: connection/network trouble or a
    /// 5xx from the supplier. Decode failures and 4xx are not retried.
    pub fn is_transient(&self) -> bool {
        match self {
            SupplierError::Transport { .. } => true,
            SupplierError::UpstreamStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
