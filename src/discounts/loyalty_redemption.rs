use rust_decimal::Decimal;

use crate::discounts::types::{round_money, Discount, DiscountKind};
use crate::loyalty::points_value;

/// Redeem `requested_points` at 100 points per currency unit, capped at the remaining total
///
/// Nothing is redeemed when the balance cannot cover the request.
pub fn evaluate_loyalty(points_balance: i64, requested_points: i64, remaining_total: Decimal) -> Option<Discount> {
    if requested_points <= 0 || points_balance < requested_points {
        return None;
    }

    let amount = round_money(points_value(requested_points).min(remaining_total.max(Decimal::ZERO)));
    Some(Discount {
        kind: DiscountKind::Loyalty,
        amount,
        description: format!("Loyalty points redemption ({} points)", requested_points),
        offer_id: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_points_convert_at_hundred_per_unit() {
        let discount = evaluate_loyalty(1000, 500, dec!(40)).unwrap();
        assert_eq!(discount.kind, DiscountKind::Loyalty);
        assert_eq!(discount.amount, dec!(5));
    }

    #[test]
    fn test_amount_capped_at_remaining_total() {
        let discount = evaluate_loyalty(10_000, 5_000, dec!(12.5)).unwrap();
        assert_eq!(discount.amount, dec!(12.5));
    }

    #[test]
    fn test_insufficient_balance_yields_nothing() {
        assert!(evaluate_loyalty(499, 500, dec!(40)).is_none());
    }

    #[test]
    fn test_zero_request_yields_nothing() {
        assert!(evaluate_loyalty(1000, 0, dec!(40)).is_none());
    }

    #[test]
    fn test_negative_remaining_clamps_to_zero() {
        let discount = evaluate_loyalty(1000, 100, dec!(-3)).unwrap();
        assert_eq!(discount.amount, dec!(0));
    }
}
