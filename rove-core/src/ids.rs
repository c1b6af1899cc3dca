use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Locally-minted correlation identifier tying together the booking form,
/// finish and status-poll calls for one logical booking attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartnerOrderId(String);

impl PartnerOrderId {
    /// Mint a fresh id. Format: ROVE-{unix_millis}-{short_uuid}, so ids sort
    /// roughly by creation time and stay unique across a fleet.
    pub fn generate() -> Self {
        let timestamp = chrono::Utc::now().timestamp_millis();
        let short_id = &Uuid::new_v4().simple().to_string()[..8];
        PartnerOrderId(format!("ROVE-{}-{}", timestamp, short_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for PartnerOrderId {
    fn from(s: String) -> Self {
        PartnerOrderId(s)
    }
}

impl From<&str> for PartnerOrderId {
    fn from(s: &str) -> Self {
        PartnerOrderId(s.to_string())
    }
}

impl fmt::Display for PartnerOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
