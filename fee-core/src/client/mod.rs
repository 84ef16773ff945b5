mod config;

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{FeeResult, VehicleType};

pub use config::ClientConfig;

/// Failure of a single calculation call.
///
/// Nothing here is user-facing text; the form decides what to show.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeeClientError {
    /// The server answered with a non-2xx status.
    #[error("fee service responded with HTTP {status}")]
    Status { status: u16 },

    /// No response arrived within the configured bound.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// No response arrived at all (connection refused, DNS, reset...).
    #[error("network error: {0}")]
    Network(String),

    /// A 2xx response whose body was not a fee breakdown.
    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    /// The call never produced an outcome, e.g. the task running it panicked.
    #[error("fee request aborted: {0}")]
    Aborted(String),
}

impl FeeClientError {
    /// HTTP status code, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// One `GET /calculate` round trip.
///
/// Every call is independent: implementations must not retry, cache, or
/// deduplicate.
#[async_trait]
pub trait FeeClient: Send + Sync {
    async fn calculate_fees(
        &self,
        base_price: Decimal,
        vehicle_type: VehicleType,
    ) -> Result<FeeResult, FeeClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_only_reported_for_http_errors() {
        assert_eq!(FeeClientError::Status { status: 500 }.status(), Some(500));
        assert_eq!(FeeClientError::Network("refused".into()).status(), None);
        assert_eq!(
            FeeClientError::Timeout(Duration::from_secs(5)).status(),
            None
        );
    }

    #[test]
    fn not_found_is_404_only() {
        assert!(FeeClientError::Status { status: 404 }.is_not_found());
        assert!(!FeeClientError::Status { status: 400 }.is_not_found());
        assert!(!FeeClientError::Decode("x".into()).is_not_found());
    }
}
