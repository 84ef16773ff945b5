use std::sync::Arc;

use fee_client::HttpFeeClient;
use fee_core::{ClientConfig, FeeClientError};

use crate::controller::FeeFormController;

/// Builds the HTTP client described by `config` and wraps it in a
/// controller with an empty form.
pub fn build_controller(config: &ClientConfig) -> Result<FeeFormController, FeeClientError> {
    let client = HttpFeeClient::new(config)?;
    tracing::debug!(endpoint = %client.endpoint(), timeout = ?config.timeout, "fee client ready");
    Ok(FeeFormController::new(Arc::new(client)))
}
