pub mod app;
pub mod components;
pub mod controller;
pub mod logging;
pub mod models;
pub mod script;
pub mod settings;
pub mod tui;
pub mod utils;
pub mod view;

pub use app::build_controller;
pub use components::FeeForm;
pub use controller::{FeeFormController, FormEvent};
