pub mod client;
pub mod models;

pub use client::{ClientConfig, FeeClient, FeeClientError};
pub use models::*;
