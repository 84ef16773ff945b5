//! However responses interleave, only the one answering the final inputs
//! may reach the screen.

use fee_core::{FeeClientError, FeeResult, Fees, VehicleType};
use fee_ui::{FeeForm, view::render};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn result_for(price: Decimal) -> FeeResult {
    FeeResult {
        fees: Fees {
            basic_buyer_fee: Decimal::ONE,
            special_fee: Decimal::ONE,
            association_fee: Decimal::ONE,
            storage_fee: Decimal::ONE,
        },
        total_cost: price + Decimal::from(4),
    }
}

fn fails(price: u32) -> bool {
    price % 7 == 0
}

proptest! {
    #[test]
    fn only_final_request_is_displayed(
        (prices, order) in prop::collection::vec(1u32..100_000, 2..8)
            .prop_flat_map(|prices| {
                let order: Vec<usize> = (0..prices.len()).collect();
                (Just(prices), Just(order).prop_shuffle())
            })
    ) {
        let mut form = FeeForm::new();
        form.set_vehicle_type(Some(VehicleType::Common));

        let mut commands = Vec::new();
        for price in &prices {
            if let Some(cmd) = form.set_base_price(Some(Decimal::from(*price))) {
                commands.push((*price, cmd));
            }
        }

        for &i in &order {
            if let Some((price, cmd)) = commands.get(i) {
                let outcome = if fails(*price) {
                    Err(FeeClientError::Status { status: 500 })
                } else {
                    Ok(result_for(Decimal::from(*price)))
                };
                form.complete(cmd.ticket, outcome);
            }
        }

        let last = *prices.last().unwrap();
        let final_price = Decimal::from(last);
        prop_assert!(!form.is_loading());
        if fails(last) {
            prop_assert_eq!(form.result(), None);
            prop_assert!(form.error_message().is_some());
        } else {
            let expected_result = result_for(final_price);
            prop_assert_eq!(form.result(), Some(&expected_result));
            prop_assert_eq!(form.error_message(), None);
            let view = render(&form);
            let expected = format!("${:.2}", final_price + Decimal::from(4));
            prop_assert_eq!(view.results.total, Some(expected));
        }
    }

    #[test]
    fn clearing_after_any_interleaving_leaves_nothing(
        prices in prop::collection::vec(1u32..100_000, 1..6),
        resolve_before_clear in 0usize..6,
    ) {
        let mut form = FeeForm::new();
        form.set_vehicle_type(Some(VehicleType::Luxury));

        let commands: Vec<_> = prices
            .iter()
            .filter_map(|p| form.set_base_price(Some(Decimal::from(*p))).map(|c| (*p, c)))
            .collect();

        let split = resolve_before_clear.min(commands.len());
        for (price, cmd) in &commands[..split] {
            form.complete(cmd.ticket, Ok(result_for(Decimal::from(*price))));
        }
        form.set_base_price(None);
        for (price, cmd) in &commands[split..] {
            form.complete(cmd.ticket, Ok(result_for(Decimal::from(*price))));
        }

        prop_assert_eq!(form.result(), None);
        prop_assert_eq!(form.error_message(), None);
        prop_assert!(render(&form).results.hidden);
    }
}
