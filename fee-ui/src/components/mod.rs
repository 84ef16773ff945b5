pub mod fee_form;

pub use fee_form::{CompletionStatus, FeeForm, FetchCommand, FormPhase, error_message};
