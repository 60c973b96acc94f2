use rust_decimal::Decimal;

use crate::discounts::types::{round_money, Discount, DiscountKind};

/// 15% off a customer's first order
pub fn first_order_rate() -> Decimal {
    Decimal::new(15, 2)
}

/// Fires only when the customer has no prior orders; computed on the full subtotal
pub fn evaluate_first_order(prior_order_count: i64, subtotal: Decimal) -> Option<Discount> {
    if prior_order_count != 0 {
        return None;
    }
    Some(Discount {
        kind: DiscountKind::FirstOrder,
        amount: round_money(subtotal * first_order_rate()),
        description: "First order discount (15%)".to_string(),
        offer_id: None,
    })
}
