use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct SupplierConfig {
    pub base_url: String,
    pub key_id: String,
    pub api_key: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub timeouts: TimeoutTiers,
    #[serde(default)]
    pub retry: RetryPolicy,
}

fn default_user_agent() -> String {
    "RoveApi/1.0".to_string()
}

/// Timeout budget per operation class. Booking-class calls wait out the
/// supplier's asynchronous confirmation window, so they get the long tier.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeoutTiers {
    #[serde(default = "default_search_secs")]
    pub search_secs: u64,
    #[serde(default = "default_prebook_secs")]
    pub prebook_secs: u64,
    #[serde(default = "default_booking_secs")]
    pub booking_secs: u64,
}

fn default_search_secs() -> u64 { 30 }
fn default_prebook_secs() -> u64 { 60 }
fn default_booking_secs() -> u64 { 120 }

impl Default for TimeoutTiers {
    fn default() -> Self {
        TimeoutTiers {
            search_secs: default_search_secs(),
            prebook_secs: default_prebook_secs(),
            booking_secs: default_booking_secs(),
        }
    }
}

/// Bounded transport retry for idempotent reads. Writes never use this.
#[derive(Debug, Clone, Deserialize)]
pub struct RetryPolicy {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_backoff_ms")]
    pub base_backoff_ms: u64,
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

fn default_max_attempts() -> u32 { 3 }
fn default_base_backoff_ms() -> u64 { 100 }
fn default_max_backoff_ms() -> u64 { 10_000 }

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: default_max_attempts(),
            base_backoff_ms: default_base_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

impl RetryPolicy {
    /// Exponential delay before the given retry (1-based attempt that just
    /// failed), capped at `max_backoff_ms`.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        let delay = self.base_backoff_ms.saturating_mul(1u64 << exp);
        Duration::from_millis(delay.min(self.max_backoff_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy { max_attempts: 5, base_backoff_ms: 100, max_backoff_ms: 400 };
        assert_eq!(policy.backoff_for(1), Duration::from_millis(100));
        assert_eq!(policy.backoff_for(2), Duration::from_millis(200));
        assert_eq!(policy.backoff_for(3), Duration::from_millis(400));
        assert_eq!(policy.backoff_for(4), Duration::from_millis(400));
    }

    #[test]
    fn test_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);

        let tiers = TimeoutTiers::default();
        assert!(tiers.search_secs < tiers.prebook_secs);
        assert!(tiers.prebook_secs < tiers.booking_secs);
    }
}
