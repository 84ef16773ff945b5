use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::VehicleType;

/// The inputs of one calculation call.
///
/// The form keeps the request it last issued and compares it against the
/// current inputs when a response arrives, so equality here is what decides
/// whether a response is still relevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRequest {
    pub base_price: Decimal,
    pub vehicle_type: VehicleType,
}

impl FeeRequest {
    pub fn new(base_price: Decimal, vehicle_type: VehicleType) -> Self {
        Self {
            base_price,
            vehicle_type,
        }
    }

    /// Query string pairs in the order the endpoint documents them.
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("basePrice", self.base_price.normalize().to_string()),
            ("vehicleType", self.vehicle_type.as_str().to_string()),
        ]
    }
}

impl fmt::Display for FeeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.base_price, self.vehicle_type)
    }
}
