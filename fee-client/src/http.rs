use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use fee_core::{ClientConfig, FeeClient, FeeClientError, FeeRequest, FeeResult, VehicleType};

/// reqwest-backed client for `GET {base_url}/calculate`.
///
/// The timeout is applied to the whole call, so a slow body read fails the
/// same way a slow connect does.
#[derive(Debug, Clone)]
pub struct HttpFeeClient {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl HttpFeeClient {
    pub fn new(config: &ClientConfig) -> Result<Self, FeeClientError> {
        let endpoint = calculate_endpoint(&config.base_url)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FeeClientError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            timeout: config.timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Non-2xx statuses are handled before decoding, so only transport,
    /// timeout, and body errors reach here.
    fn classify(&self, error: reqwest::Error) -> FeeClientError {
        if error.is_timeout() {
            FeeClientError::Timeout(self.timeout)
        } else if error.is_decode() {
            FeeClientError::Decode(error.to_string())
        } else {
            FeeClientError::Network(error.to_string())
        }
    }
}

/// Joins `base_url` and `calculate`, tolerating a trailing slash on the base.
fn calculate_endpoint(base_url: &str) -> Result<Url, FeeClientError> {
    let joined = format!("{}/calculate", base_url.trim_end_matches('/'));
    Url::parse(&joined)
        .map_err(|e| FeeClientError::Configuration(format!("invalid base url '{base_url}': {e}")))
}

#[async_trait]
impl FeeClient for HttpFeeClient {
    async fn calculate_fees(
        &self,
        base_price: Decimal,
        vehicle_type: VehicleType,
    ) -> Result<FeeResult, FeeClientError> {
        let request = FeeRequest::new(base_price, vehicle_type);
        debug!(%request, endpoint = %self.endpoint, "requesting fee calculation");

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&request.query_pairs())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%request, %status, "fee calculation rejected");
            return Err(FeeClientError::Status {
                status: status.as_u16(),
            });
        }

        let result = response
            .json::<FeeResult>()
            .await
            .map_err(|e| self.classify(e))?;

        debug!(%request, total = %result.total_cost, "fee calculation succeeded");
        Ok(result)
    }
}
