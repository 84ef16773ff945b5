use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Itemized fees as returned by the calculation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fees {
    pub basic_buyer_fee: Decimal,
    pub special_fee: Decimal,
    pub association_fee: Decimal,
    pub storage_fee: Decimal,
}

impl Fees {
    /// Labelled line items in display order.
    pub fn items(&self) -> [(&'static str, Decimal); 4] {
        [
            ("Basic buyer fee", self.basic_buyer_fee),
            ("Special fee", self.special_fee),
            ("Association fee", self.association_fee),
            ("Storage fee", self.storage_fee),
        ]
    }
}

/// Decoded body of a successful `GET /calculate` call.
///
/// A result always replaces the previous one wholesale; nothing merges
/// fields from two responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeResult {
    pub fees: Fees,
    pub total_cost: Decimal,
}
