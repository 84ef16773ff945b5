use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Vehicle category selected on the form. The server uses it to pick the
/// fee schedule; the client only forwards its wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    Common,
    Luxury,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown vehicle type '{0}'")]
pub struct UnknownVehicleType(pub String);

impl VehicleType {
    pub const ALL: [VehicleType; 2] = [VehicleType::Common, VehicleType::Luxury];

    /// Value sent in the `vehicleType` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Luxury => "Luxury",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(trimmed))
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = UnknownVehicleType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownVehicleType(s.to_string()))
    }
}

impl TryFrom<&str> for VehicleType {
    type Error = UnknownVehicleType;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
