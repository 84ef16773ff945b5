use std::fmt;

use fee_core::{FeeRequest, VehicleType};
use rust_decimal::Decimal;

/// The two user-editable inputs of the fee form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub base_price: Option<Decimal>,
    pub vehicle_type: Option<VehicleType>,
}

impl FormState {
    /// A price only counts once it is strictly positive.
    pub fn has_base_price(&self) -> bool {
        matches!(self.base_price, Some(price) if price > Decimal::ZERO)
    }

    /// The request these inputs describe, or `None` while the form is
    /// incomplete.
    pub fn to_request(&self) -> Option<FeeRequest> {
        if !self.has_base_price() {
            return None;
        }
        Some(FeeRequest::new(self.base_price?, self.vehicle_type?))
    }
}

impl fmt::Display for FormState {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self.base_price {
            Some(price) => writeln!(f, "Base price:   {price}")?,
            None => writeln!(f, "Base price:   —")?,
        }
        match self.vehicle_type {
            Some(vehicle_type) => write!(f, "Vehicle type: {vehicle_type}"),
            None => write!(f, "Vehicle type: —"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_state_has_no_request() {
        assert_eq!(FormState::default().to_request(), None);
    }

    #[test]
    fn request_needs_both_inputs() {
        let price_only = FormState {
            base_price: Some(dec!(1000)),
            vehicle_type: None,
        };
        let type_only = FormState {
            base_price: None,
            vehicle_type: Some(VehicleType::Common),
        };
        assert_eq!(price_only.to_request(), None);
        assert_eq!(type_only.to_request(), None);
    }

    #[test]
    fn zero_and_negative_prices_do_not_count() {
        for price in [dec!(0), dec!(-1)] {
            let state = FormState {
                base_price: Some(price),
                vehicle_type: Some(VehicleType::Luxury),
            };
            assert!(!state.has_base_price());
            assert_eq!(state.to_request(), None);
        }
    }

    #[test]
    fn complete_state_builds_request() {
        let state = FormState {
            base_price: Some(dec!(1000)),
            vehicle_type: Some(VehicleType::Common),
        };
        assert_eq!(
            state.to_request(),
            Some(FeeRequest::new(dec!(1000), VehicleType::Common))
        );
    }

    #[test]
    fn display_uses_dash_for_missing_values() {
        assert_eq!(
            FormState::default().to_string(),
            "Base price:   —\nVehicle type: —"
        );
    }
}
