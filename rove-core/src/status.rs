use serde::{Deserialize, Serialize};
use std::fmt;

/// Supplier-reported booking status, mapped 1:1 from the wire plus the two
/// locally-assigned states (`form_created`, `cancelled`). Statuses the
/// supplier may add later land in `Other` and round-trip losslessly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    Processing,
    Ok,
    Confirmed,
    Timeout,
    Unknown,
    ThreeDs,
    Block,
    BookLimit,
    BookingFinishDidNotSucceed,
    Provider,
    Soldout,
    DoubleBookingForm,
    BookingFormExpired,
    FormCreated,
    Cancelled,
    Other(String),
}

impl BookingStatus {
    /// Wire form of every terminal status. Storage-level transition guards
    /// use this set so they agree with `is_terminal`.
    pub const TERMINAL_STATUSES: [&'static str; 9] = [
        "ok",
        "confirmed",
        "cancelled",
        "3ds",
        "block",
        "book_limit",
        "booking_finish_did_not_succeed",
        "provider",
        "soldout",
    ];

    /// Retryable at the domain level: keep polling / try again later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BookingStatus::Timeout | BookingStatus::Unknown)
    }

    /// The fixed terminal failure set. Never retried, always surfaced.
    pub fn is_terminal_failure(&self) -> bool {
        matches!(
            self,
            BookingStatus::ThreeDs
                | BookingStatus::Block
                | BookingStatus::BookLimit
                | BookingStatus::BookingFinishDidNotSucceed
                | BookingStatus::Provider
                | BookingStatus::Soldout
        )
    }

    pub fn is_terminal_success(&self) -> bool {
        matches!(self, BookingStatus::Ok | BookingStatus::Confirmed)
    }

    /// A record in a terminal state never moves back to a non-terminal one.
    pub fn is_terminal(&self) -> bool {
        self.is_terminal_success() || self.is_terminal_failure() || *self == BookingStatus::Cancelled
    }

    pub fn as_str(&self) -> &str {
        match self {
            BookingStatus::Processing => "processing",
            BookingStatus::Ok => "ok",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Timeout => "timeout",
            BookingStatus::Unknown => "unknown",
            BookingStatus::ThreeDs => "3ds",
            BookingStatus::Block => "block",
            BookingStatus::BookLimit => "book_limit",
            BookingStatus::BookingFinishDidNotSucceed => "booking_finish_did_not_succeed",
            BookingStatus::Provider => "provider",
            BookingStatus::Soldout => "soldout",
            BookingStatus::DoubleBookingForm => "double_booking_form",
            BookingStatus::BookingFormExpired => "booking_form_expired",
            BookingStatus::FormCreated => "form_created",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Other(s) => s,
        }
    }
}

impl From<String> for BookingStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "processing" => BookingStatus::Processing,
            "ok" => BookingStatus::Ok,
            "confirmed" => BookingStatus::Confirmed,
            "timeout" => BookingStatus::Timeout,
            "unknown" => BookingStatus::Unknown,
            "3ds" => BookingStatus::ThreeDs,
            "block" => BookingStatus::Block,
            "book_limit" => BookingStatus::BookLimit,
            "booking_finish_did_not_succeed" => BookingStatus::BookingFinishDidNotSucceed,
            "provider" => BookingStatus::Provider,
            "soldout" => BookingStatus::Soldout,
            "double_booking_form" => BookingStatus::DoubleBookingForm,
            "booking_form_expired" => BookingStatus::BookingFormExpired,
            "form_created" => BookingStatus::FormCreated,
            "cancelled" => BookingStatus::Cancelled,
            _ => BookingStatus::Other(s),
        }
    }
}

impl From<&str> for BookingStatus {
    fn from(s: &str) -> Self {
        BookingStatus::from(s.to_string())
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(BookingStatus::Timeout.is_retryable());
        assert!(BookingStatus::Unknown.is_retryable());
        assert!(!BookingStatus::Processing.is_retryable());
        assert!(!BookingStatus::Soldout.is_retryable());
    }

    #[test]
    fn test_terminal_failure_set() {
        for s in ["3ds", "block", "book_limit", "booking_finish_did_not_succeed", "provider", "soldout"] {
            assert!(BookingStatus::from(s).is_terminal_failure(), "{} should be terminal", s);
        }
        for s in ["processing", "ok", "confirmed", "timeout", "unknown", "double_booking_form"] {
            assert!(!BookingStatus::from(s).is_terminal_failure(), "{} should not be terminal failure", s);
        }
    }

    #[test]
    fn test_terminal_success() {
        assert!(BookingStatus::Ok.is_terminal_success());
        assert!(BookingStatus::Confirmed.is_terminal_success());
        assert!(!BookingStatus::Processing.is_terminal_success());
    }

    #[test]
    fn test_cancelled_is_terminal() {
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(!BookingStatus::FormCreated.is_terminal());
    }

    #[test]
    fn test_terminal_wire_set_agrees_with_predicate() {
        for s in BookingStatus::TERMINAL_STATUSES {
            assert!(BookingStatus::from(s).is_terminal(), "{} should be terminal", s);
        }
        for s in ["processing", "timeout", "unknown", "form_created", "double_booking_form"] {
            assert!(!BookingStatus::TERMINAL_STATUSES.contains(&s), "{} is not terminal", s);
        }
    }

    #[test]
    fn test_unrecognized_status_round_trip() {
        let status = BookingStatus::from("rate_not_found");
        assert_eq!(status, BookingStatus::Other("rate_not_found".to_string()));
        assert_eq!(String::from(status), "rate_not_found");
        assert_eq!(String::from(BookingStatus::ThreeDs), "3ds");
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&BookingStatus::BookingFinishDidNotSucceed).unwrap();
        assert_eq!(json, "\"booking_finish_did_not_succeed\"");
        let back: BookingStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, BookingStatus::BookingFinishDidNotSucceed);
    }
}
