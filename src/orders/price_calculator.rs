use rust_decimal::Decimal;

use crate::orders::NewOrderItem;

/// Line and order totals over stored unit prices
pub struct PriceCalculator;

impl PriceCalculator {
    /// `quantity × unit_price` for one line
    pub fn line_total(quantity: i32, unit_price: Decimal) -> Decimal {
        Decimal::from(quantity) * unit_price
    }

    /// Sum of every line total
    pub fn order_subtotal(items: &[NewOrderItem]) -> Decimal {
        items
            .iter()
            .map(|item| Self::line_total(item.quantity, item.unit_price))
            .sum()
    }
}
