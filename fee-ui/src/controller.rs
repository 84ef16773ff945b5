//! Drives a [`FeeForm`] against a live [`FeeClient`].
//!
//! The controller is the form's only writer. Each fetch runs as its own
//! tokio task and reports back over a channel; outcomes are applied one at
//! a time in [`FeeFormController::next_completion`], where the form drops
//! anything that no longer matches its inputs.
//!
//! Every spawned call reports exactly once, even if the client panics, so
//! [`FeeFormController::settle`] always returns.

use std::{any::Any, panic::AssertUnwindSafe, sync::Arc};

use fee_core::{FeeClient, FeeClientError, FeeResult, VehicleType};
use futures::FutureExt;
use rust_decimal::Decimal;
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::{
    components::{CompletionStatus, FeeForm, FetchCommand},
    view::{self, FormView},
};

/// A user interaction with the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormEvent {
    /// Raw text typed into the base-price input.
    BasePriceInput(String),
    BasePrice(Option<Decimal>),
    /// `value` of the chosen vehicle-type option.
    VehicleTypeInput(String),
    VehicleType(Option<VehicleType>),
}

struct Completion {
    ticket: u64,
    outcome: Result<FeeResult, FeeClientError>,
}

pub struct FeeFormController {
    form: FeeForm,
    client: Arc<dyn FeeClient>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    outstanding: usize,
}

impl FeeFormController {
    pub fn new(client: Arc<dyn FeeClient>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            form: FeeForm::new(),
            client,
            completions_tx,
            completions_rx,
            outstanding: 0,
        }
    }

    pub fn form(&self) -> &FeeForm {
        &self.form
    }

    pub fn view(&self) -> FormView {
        view::render(&self.form)
    }

    /// Number of spawned calls whose outcome has not been applied yet,
    /// stale ones included.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Applies an input event and starts a fetch if the form asks for one.
    /// Must be called from within a tokio runtime.
    pub fn handle(
        &mut self,
        event: FormEvent,
    ) {
        let command = match event {
            FormEvent::BasePriceInput(text) => self.form.input_base_price(&text),
            FormEvent::BasePrice(price) => self.form.set_base_price(price),
            FormEvent::VehicleTypeInput(value) => self.form.select_vehicle_type(&value),
            FormEvent::VehicleType(vehicle_type) => self.form.set_vehicle_type(vehicle_type),
        };
        if let Some(command) = command {
            self.dispatch(command);
        }
    }

    fn dispatch(
        &mut self,
        command: FetchCommand,
    ) {
        let client = Arc::clone(&self.client);
        let tx = self.completions_tx.clone();
        self.outstanding += 1;

        tokio::spawn(async move {
            let FetchCommand { ticket, request } = command;
            let outcome = AssertUnwindSafe(client.calculate_fees(request.base_price, request.vehicle_type))
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| {
                    let reason = panic_reason(&*panic);
                    error!(ticket, %request, %reason, "fee client panicked");
                    Err(FeeClientError::Aborted(reason))
                });
            if tx.send(Completion { ticket, outcome }).is_err() {
                debug!(ticket, "form controller gone; discarding fee response");
            }
        });
    }

    /// Waits for the next finished call and applies it. Returns `None`
    /// when nothing is outstanding.
    pub async fn next_completion(&mut self) -> Option<CompletionStatus> {
        if self.outstanding == 0 {
            return None;
        }
        let Completion { ticket, outcome } = self.completions_rx.recv().await?;
        self.outstanding -= 1;
        Some(self.form.complete(ticket, outcome))
    }

    /// Applies every outstanding call.
    pub async fn settle(&mut self) {
        while self.next_completion().await.is_some() {}
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "fee client panicked".to_string())
}
