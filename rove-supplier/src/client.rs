use crate::config::SupplierConfig;
use async_trait::async_trait;
use rove_core::supplier::{
    CancelRequest, FinishData, FinishRequest, FormData, FormRequest, OrderInfoRequest,
    PrebookRequest, StatusData, StatusRequest, SupplierApi, SupplierError, SupplierReply,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

mod endpoints {
    pub const PREBOOK: &str = "api/b2b/v3/hotel/prebook/";
    pub const BOOKING_FORM: &str = "api/b2b/v3/hotel/order/booking/form/";
    pub const BOOKING_FINISH: &str = "api/b2b/v3/hotel/order/booking/finish/";
    pub const BOOKING_STATUS: &str = "api/b2b/v3/hotel/order/booking/finish/status/";
    pub const ORDER_INFO: &str = "api/b2b/v3/hotel/order/info/";
    pub const ORDER_CANCEL: &str = "api/b2b/v3/hotel/order/cancel/";
}

/// Which timeout tier a call runs under. Configured, not hard-coded per
/// call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationClass {
    Search,
    Prebook,
    Booking,
}

/// HTTP client to the upstream booking API. Owns auth, timeouts and the
/// transport retry policy. Only idempotent reads go through the retrying
/// path; form/finish/cancel get exactly one transport attempt and rely on
/// the orchestrator's domain-level handling instead.
pub struct HttpSupplierClient {
    http: reqwest::Client,
    config: SupplierConfig,
}

impl HttpSupplierClient {
    pub fn new(config: SupplierConfig) -> Result<Self, SupplierError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SupplierError::Transport {
                endpoint: "client".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self { http, config })
    }

    fn timeout_for(&self, class: OperationClass) -> Duration {
        let secs = match class {
            OperationClass::Search => self.config.timeouts.search_secs,
            OperationClass::Prebook => self.config.timeouts.prebook_secs,
            OperationClass::Booking => self.config.timeouts.booking_secs,
        };
        Duration::from_secs(secs)
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }

    async fn post<B, T>(
        &self,
        endpoint: &str,
        body: &B,
        class: OperationClass,
    ) -> Result<SupplierReply<T>, SupplierError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        tracing::debug!(endpoint, "supplier request");

        let response = self
            .http
            .post(self.url_for(endpoint))
            .basic_auth(&self.config.key_id, Some(&self.config.api_key))
            .timeout(self.timeout_for(class))
            .json(body)
            .send()
            .await
            .map_err(|e| SupplierError::Transport {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        let http_status = response.status();
        if http_status.is_server_error() {
            return Err(SupplierError::UpstreamStatus {
                endpoint: endpoint.to_string(),
                status: http_status.as_u16(),
            });
        }

        // 4xx replies still carry the {data, status} envelope; the
        // application status inside is what the orchestrator classifies.
        let reply: SupplierReply<T> =
            response.json().await.map_err(|e| SupplierError::Decode {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(endpoint, status = %reply.status, "supplier response");
        Ok(reply)
    }

    async fn post_with_retry<B, T>(
        &self,
        endpoint: &str,
        body: &B,
        class: OperationClass,
    ) -> Result<SupplierReply<T>, SupplierError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let mut attempt = 1;
        loop {
            match self.post(endpoint, body, class).await {
                Ok(reply) => return Ok(reply),
                Err(e) if e.is_transient() && attempt < self.config.retry.max_attempts => {
                    let delay = self.config.retry.backoff_for(attempt);
                    tracing::warn!(
                        endpoint,
                        attempt,
                        error = %e,
                        delay_ms = delay.as_millis() as u64,
                        "retrying supplier request"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl SupplierApi for HttpSupplierClient {
    async fn prebook(&self, request: &PrebookRequest) -> Result<SupplierReply<Value>, SupplierError> {
        self.post_with_retry(endpoints::PREBOOK, request, OperationClass::Prebook).await
    }

    async fn create_form(&self, request: &FormRequest) -> Result<SupplierReply<FormData>, SupplierError> {
        // Not idempotent: a duplicate submission is surfaced by the supplier
        // as double_booking_form and handled by the orchestrator.
        self.post(endpoints::BOOKING_FORM, request, OperationClass::Booking).await
    }

    async fn finish(&self, request: &FinishRequest) -> Result<SupplierReply<FinishData>, SupplierError> {
        self.post(endpoints::BOOKING_FINISH, request, OperationClass::Booking).await
    }

    async fn poll_status(&self, request: &StatusRequest) -> Result<SupplierReply<StatusData>, SupplierError> {
        self.post_with_retry(endpoints::BOOKING_STATUS, request, OperationClass::Search).await
    }

    async fn get_order_info(&self, request: &OrderInfoRequest) -> Result<SupplierReply<Value>, SupplierError> {
        self.post_with_retry(endpoints::ORDER_INFO, request, OperationClass::Search).await
    }

    async fn cancel_order(&self, request: &CancelRequest) -> Result<SupplierReply<StatusData>, SupplierError> {
        self.post(endpoints::ORDER_CANCEL, request, OperationClass::Booking).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RetryPolicy, TimeoutTiers};

    fn test_config() -> SupplierConfig {
        SupplierConfig {
            base_url: "https://api.example.test/".to_string(),
            key_id: "key".to_string(),
            api_key: "secret".to_string(),
            user_agent: "RoveApi/1.0".to_string(),
            timeouts: TimeoutTiers::default(),
            retry: RetryPolicy::default(),
        }
    }

    #[test]
    fn test_timeout_tier_selection() {
        let client = HttpSupplierClient::new(test_config()).unwrap();
        assert_eq!(client.timeout_for(OperationClass::Search), Duration::from_secs(30));
        assert_eq!(client.timeout_for(OperationClass::Prebook), Duration::from_secs(60));
        assert_eq!(client.timeout_for(OperationClass::Booking), Duration::from_secs(120));
    }

    #[test]
    fn test_url_join_strips_trailing_slash() {
        let client = HttpSupplierClient::new(test_config()).unwrap();
        assert_eq!(
            client.url_for(endpoints::BOOKING_FORM),
            "https://api.example.test/api/b2b/v3/hotel/order/booking/form/"
        );
    }
}
