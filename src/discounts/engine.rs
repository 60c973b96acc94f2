use rust_decimal::Decimal;

use crate::discounts::admin_offer::evaluate_admin_offers;
use crate::discounts::first_order::evaluate_first_order;
use crate::discounts::loyalty_redemption::evaluate_loyalty;
use crate::discounts::types::{round_money, DiscountResult};
use crate::offers::Offer;

/// Everything the engine needs, already loaded
#[derive(Debug, Clone)]
pub struct DiscountContext<'a> {
    pub subtotal: Decimal,
    pub prior_order_count: i64,
    /// Valid offers in request order
    pub active_offers: &'a [Offer],
    pub use_points: i64,
    pub points_balance: i64,
}

/// First-order, then offers, then loyalty; each step reduces the remaining total
///
/// Amounts and the total are rounded to cents.
pub fn calculate_order_discounts(ctx: &DiscountContext<'_>) -> DiscountResult {
    let mut discounts = Vec::new();
    let mut remaining_total = ctx.subtotal;

    if let Some(first) = evaluate_first_order(ctx.prior_order_count, ctx.subtotal) {
        remaining_total -= first.amount;
        discounts.push(first);
    }

    if !ctx.active_offers.is_empty() {
        let offer_discounts = evaluate_admin_offers(ctx.active_offers, remaining_total, discounts.is_empty());
        for discount in &offer_discounts {
            remaining_total -= discount.amount;
        }
        discounts.extend(offer_discounts);
    }

    if ctx.use_points > 0 {
        if let Some(loyalty) = evaluate_loyalty(ctx.points_balance, ctx.use_points, remaining_total) {
            remaining_total -= loyalty.amount;
            discounts.push(loyalty);
        }
    }

    DiscountResult {
        subtotal: ctx.subtotal,
        discounts,
        total: round_money(remaining_total.max(Decimal::ZERO)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discounts::admin_offer::tests::make_offer;
    use crate::discounts::types::DiscountKind;
    use crate::offers::OfferDiscountType;
    use rust_decimal_macros::dec;

    fn ctx(subtotal: Decimal, prior: i64, offers: &[Offer], use_points: i64, balance: i64) -> DiscountContext<'_> {
        DiscountContext {
            subtotal,
            prior_order_count: prior,
            active_offers: offers,
            use_points,
            points_balance: balance,
        }
    }

    #[test]
    fn test_first_order_only() {
        let result = calculate_order_discounts(&ctx(dec!(100), 0, &[], 0, 0));
        assert_eq!(result.discounts.len(), 1);
        assert_eq!(result.discounts[0].amount, dec!(15));
        assert_eq!(result.total, dec!(85));
    }

    #[test]
    fn test_returning_customer_without_extras_pays_subtotal() {
        let result = calculate_order_discounts(&ctx(dec!(100), 3, &[], 0, 0));
        assert!(result.discounts.is_empty());
        assert_eq!(result.total, dec!(100));
    }

    #[test]
    fn test_offers_see_total_after_first_order() {
        let offers = vec![make_offer(OfferDiscountType::Percentage, dec!(10), false)];
        let result = calculate_order_discounts(&ctx(dec!(100), 0, &offers, 0, 0));

        assert_eq!(result.discounts[0].kind, DiscountKind::FirstOrder);
        assert_eq!(result.discounts[1].kind, DiscountKind::AdminOffer);
        assert_eq!(result.discounts[1].amount, dec!(8.5));
        assert_eq!(result.total, dec!(76.5));
    }

    #[test]
    fn test_full_pipeline_order() {
        let offers = vec![
            make_offer(OfferDiscountType::FixedAmount, dec!(10), false),
            make_offer(OfferDiscountType::FixedAmount, dec!(5), true),
        ];
        let result = calculate_order_discounts(&ctx(dec!(100), 0, &offers, 1000, 2000));

        let kinds: Vec<DiscountKind> = result.discounts.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DiscountKind::FirstOrder, DiscountKind::AdminOffer, DiscountKind::AdminOffer, DiscountKind::Loyalty]
        );
        // 100 - 15 - 10 - 5 - 10
        assert_eq!(result.total, dec!(60));
        assert_eq!(result.total_discount(), dec!(40));
        assert!(result.loyalty_applied());
    }

    #[test]
    fn test_returning_customer_gets_every_offer() {
        let offers = vec![
            make_offer(OfferDiscountType::Percentage, dec!(10), false),
            make_offer(OfferDiscountType::Percentage, dec!(5), false),
        ];
        let result = calculate_order_discounts(&ctx(dec!(100), 1, &offers, 0, 0));

        assert_eq!(result.discounts.len(), 2);
        assert_eq!(result.total, dec!(85));
    }

    #[test]
    fn test_first_order_limits_non_cumulative_offers_to_one() {
        let offers = vec![
            make_offer(OfferDiscountType::Percentage, dec!(10), false),
            make_offer(OfferDiscountType::Percentage, dec!(5), false),
        ];
        let result = calculate_order_discounts(&ctx(dec!(100), 0, &offers, 0, 0));

        let offer_lines = result.discounts.iter().filter(|d| d.kind == DiscountKind::AdminOffer).count();
        assert_eq!(offer_lines, 1);
        // 100 - 15 - 8.5
        assert_eq!(result.total, dec!(76.5));
    }

    #[test]
    fn test_total_rounded_to_cents() {
        let result = calculate_order_discounts(&ctx(dec!(10.01), 0, &[], 0, 0));
        assert_eq!(result.discounts[0].amount, dec!(1.50));
        assert_eq!(result.total, dec!(8.51));
        assert!(result.total.scale() <= 2);
    }

    #[test]
    fn test_loyalty_capped_at_remaining() {
        let result = calculate_order_discounts(&ctx(dec!(20), 1, &[], 5000, 5000));
        assert_eq!(result.discounts[0].amount, dec!(20));
        assert_eq!(result.total, dec!(0));
    }

    #[test]
    fn test_insufficient_balance_skips_loyalty() {
        let result = calculate_order_discounts(&ctx(dec!(20), 1, &[], 500, 499));
        assert!(result.discounts.is_empty());
        assert!(!result.loyalty_applied());
    }

    #[test]
    fn test_stacked_fixed_offers_never_go_negative() {
        let offers = vec![
            make_offer(OfferDiscountType::FixedAmount, dec!(30), true),
            make_offer(OfferDiscountType::FixedAmount, dec!(30), true),
        ];
        let result = calculate_order_discounts(&ctx(dec!(40), 1, &offers, 0, 0));
        assert_eq!(result.total, dec!(0));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::discounts::admin_offer::tests::make_offer;
    use crate::discounts::types::DiscountKind;
    use crate::offers::OfferDiscountType;
    use proptest::prelude::*;

    fn cents() -> impl Strategy<Value = Decimal> {
        (0i64..1_000_000).prop_map(|c| Decimal::new(c, 2))
    }

    fn offer_strategy() -> impl Strategy<Value = Offer> {
        (
            prop_oneof![
                Just(OfferDiscountType::Percentage),
                Just(OfferDiscountType::FixedAmount),
                Just(OfferDiscountType::PointsExchange),
            ],
            1i64..100,
            any::<bool>(),
        )
            .prop_map(|(kind, value, cumulative)| make_offer(kind, Decimal::from(value), cumulative))
    }

    proptest! {
        /// Property 1: the total stays within [0, subtotal]
        #[test]
        fn prop_total_between_zero_and_subtotal(
            subtotal in cents(),
            prior in 0i64..3,
            offers in prop::collection::vec(offer_strategy(), 0..4),
            use_points in 0i64..20_000,
            balance in 0i64..20_000,
        ) {
            let result = calculate_order_discounts(&DiscountContext {
                subtotal,
                prior_order_count: prior,
                active_offers: &offers,
                use_points,
                points_balance: balance,
            });
            prop_assert!(result.total >= Decimal::ZERO);
            prop_assert!(result.total <= subtotal);
        }

        /// Property 2: first-order discount iff zero prior orders, at exactly 15%
        #[test]
        fn prop_first_order_iff_no_history(subtotal in cents(), prior in 0i64..5) {
            let result = calculate_order_discounts(&DiscountContext {
                subtotal,
                prior_order_count: prior,
                active_offers: &[],
                use_points: 0,
                points_balance: 0,
            });
            let first: Vec<_> = result.discounts.iter().filter(|d| d.kind == DiscountKind::FirstOrder).collect();
            if prior == 0 {
                prop_assert_eq!(first.len(), 1);
                prop_assert_eq!(first[0].amount, round_money(subtotal * Decimal::new(15, 2)));
            } else {
                prop_assert!(first.is_empty());
            }
        }

        /// Property 3: a balance below the request never produces a loyalty discount
        #[test]
        fn prop_short_balance_never_redeems(subtotal in cents(), requested in 1i64..10_000, shortfall in 1i64..1_000) {
            let balance = (requested - shortfall).max(0);
            let result = calculate_order_discounts(&DiscountContext {
                subtotal,
                prior_order_count: 1,
                active_offers: &[],
                use_points: requested,
                points_balance: balance,
            });
            prop_assert!(!result.loyalty_applied());
        }
    }
}
