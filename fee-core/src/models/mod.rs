mod fee_request;
mod fee_result;
mod vehicle_type;

pub use fee_request::FeeRequest;
pub use fee_result::{FeeResult, Fees};
pub use vehicle_type::{UnknownVehicleType, VehicleType};
