//! The fee form as an explicit state machine.
//!
//! Every input change goes through a transition method that may hand back a
//! [`FetchCommand`]. Whoever runs the command reports the outcome through
//! [`FeeForm::complete`], which drops it unless it still answers the
//! current inputs.

use fee_core::{FeeClientError, FeeRequest, FeeResult, VehicleType};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::{models::FormState, utils::parse_price_input};

pub const NOT_FOUND_MESSAGE: &str = "Route not found. Please check the backend API.";
pub const UNREACHABLE_MESSAGE: &str = "Unable to reach the fee service. Please try again.";

/// Maps a client failure to the text shown in the error banner.
pub fn error_message(error: &FeeClientError) -> String {
    match error {
        FeeClientError::Status { status: 404 } => NOT_FOUND_MESSAGE.to_string(),
        FeeClientError::Status { status } => {
            format!("Server returned an error (HTTP {status}). Please try again.")
        }
        FeeClientError::Timeout(_)
        | FeeClientError::Network(_)
        | FeeClientError::Decode(_)
        | FeeClientError::Configuration(_)
        | FeeClientError::Aborted(_) => UNREACHABLE_MESSAGE.to_string(),
    }
}

/// A calculation the form wants performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchCommand {
    pub ticket: u64,
    pub request: FeeRequest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPhase {
    /// Inputs incomplete, or nothing has come back yet.
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionStatus {
    Applied,
    /// The outcome belonged to inputs that have since changed or been cleared.
    Stale,
}

#[derive(Clone, Debug, Default)]
pub struct FeeForm {
    /// What the user typed, echoed back into the input.
    base_price_text: String,
    state: FormState,
    result: Option<FeeResult>,
    error_message: Option<String>,
    in_flight: Option<FetchCommand>,
    next_ticket: u64,
}

impl FeeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_price(&self) -> Option<Decimal> {
        self.state.base_price
    }

    pub fn base_price_text(&self) -> &str {
        &self.base_price_text
    }

    pub fn vehicle_type(&self) -> Option<VehicleType> {
        self.state.vehicle_type
    }

    pub fn result(&self) -> Option<&FeeResult> {
        self.result.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// True when the results panel should be revealed.
    pub fn results_visible(&self) -> bool {
        self.result.is_some() && self.error_message.is_none()
    }

    pub fn phase(&self) -> FormPhase {
        if self.is_loading() {
            FormPhase::Loading
        } else if self.error_message.is_some() {
            FormPhase::Failed
        } else if self.result.is_some() {
            FormPhase::Ready
        } else {
            FormPhase::Idle
        }
    }

    /// Sets the base price directly; `None` clears it.
    pub fn set_base_price(
        &mut self,
        price: Option<Decimal>,
    ) -> Option<FetchCommand> {
        self.base_price_text = price.map(|p| p.to_string()).unwrap_or_default();
        if self.state.base_price == price {
            return None;
        }
        self.state.base_price = price;
        self.inputs_changed()
    }

    /// Applies raw text from the base-price input. Text that is not a
    /// number leaves the form without a price.
    pub fn input_base_price(
        &mut self,
        text: &str,
    ) -> Option<FetchCommand> {
        let price = parse_price_input(text).unwrap_or_else(|e| {
            warn!(%e, "ignoring unparseable base price");
            None
        });
        let command = self.set_base_price(price);
        self.base_price_text = text.to_string();
        command
    }

    pub fn set_vehicle_type(
        &mut self,
        vehicle_type: Option<VehicleType>,
    ) -> Option<FetchCommand> {
        if self.state.vehicle_type == vehicle_type {
            return None;
        }
        self.state.vehicle_type = vehicle_type;
        self.inputs_changed()
    }

    /// Applies the `value` of the chosen `<option>`; the empty placeholder
    /// value clears the selection.
    pub fn select_vehicle_type(
        &mut self,
        value: &str,
    ) -> Option<FetchCommand> {
        let vehicle_type = if value.trim().is_empty() {
            None
        } else {
            match value.parse() {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!(%e, "ignoring unknown vehicle type");
                    None
                }
            }
        };
        self.set_vehicle_type(vehicle_type)
    }

    /// Records the outcome of a command issued earlier.
    pub fn complete(
        &mut self,
        ticket: u64,
        outcome: Result<FeeResult, FeeClientError>,
    ) -> CompletionStatus {
        let current = match self.in_flight {
            Some(cmd) if cmd.ticket == ticket && Some(cmd.request) == self.state.to_request() => cmd,
            _ => {
                debug!(ticket, "dropping stale fee response");
                return CompletionStatus::Stale;
            }
        };
        self.in_flight = None;

        match outcome {
            Ok(result) => {
                info!(request = %current.request, total = %result.total_cost, "fees calculated");
                self.result = Some(result);
                self.error_message = None;
            }
            Err(error) => {
                warn!(request = %current.request, %error, "fee calculation failed");
                self.result = None;
                self.error_message = Some(error_message(&error));
            }
        }
        CompletionStatus::Applied
    }

    fn inputs_changed(&mut self) -> Option<FetchCommand> {
        let Some(request) = self.state.to_request() else {
            debug!(state = %self.state, "inputs incomplete; clearing results");
            self.clear_results();
            return None;
        };

        self.next_ticket += 1;
        let command = FetchCommand {
            ticket: self.next_ticket,
            request,
        };
        self.in_flight = Some(command);
        self.error_message = None;
        debug!(ticket = command.ticket, %request, "issuing fee calculation");
        Some(command)
    }

    fn clear_results(&mut self) {
        self.result = None;
        self.error_message = None;
        self.in_flight = None;
    }
}
