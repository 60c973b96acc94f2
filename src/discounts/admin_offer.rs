use rust_decimal::Decimal;

use crate::discounts::types::{round_money, Discount, DiscountKind};
use crate::offers::{Offer, OfferDiscountType};

/// Amount an offer would take off `remaining_total`, before stacking rules
///
/// `None` for points-exchange offers and when the minimum purchase is not met.
pub fn offer_amount(offer: &Offer, remaining_total: Decimal) -> Option<Decimal> {
    if let Some(min_purchase) = offer.min_purchase_amount {
        if min_purchase > remaining_total {
            return None;
        }
    }

    let raw = match offer.discount_type {
        OfferDiscountType::Percentage => remaining_total * offer.discount_value / Decimal::ONE_HUNDRED,
        OfferDiscountType::FixedAmount => offer.discount_value,
        OfferDiscountType::PointsExchange => return None,
    };

    Some(match offer.max_discount_amount {
        Some(cap) => raw.min(cap),
        None => raw,
    })
}

/// Apply offers in request order against the same `remaining_total`
///
/// When no discount precedes the offers (`is_first_discount`), every applicable offer is taken.
/// Otherwise the first applicable offer is taken and later ones only stack when cumulative.
pub fn evaluate_admin_offers(offers: &[Offer], remaining_total: Decimal, is_first_discount: bool) -> Vec<Discount> {
    let mut discounts = Vec::new();

    for offer in offers {
        let Some(amount) = offer_amount(offer, remaining_total) else {
            continue;
        };
        if !(offer.is_cumulative || is_first_discount || discounts.is_empty()) {
            tracing::debug!("Skipping non-cumulative offer {} after an applied offer", offer.id);
            continue;
        }
        discounts.push(Discount {
            kind: DiscountKind::AdminOffer,
            amount: round_money(amount),
            description: offer.name.clone(),
            offer_id: Some(offer.id),
        });
    }

    discounts
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    pub(crate) fn make_offer(kind: OfferDiscountType, value: Decimal, is_cumulative: bool) -> Offer {
        let now = Utc::now();
        Offer {
            id: Uuid::new_v4(),
            name: format!("{} {}", kind, value),
            description: None,
            discount_type: kind,
            discount_value: value,
            max_discount_amount: None,
            min_purchase_amount: None,
            is_cumulative,
            start_date: now - Duration::days(1),
            end_date: now + Duration::days(1),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_percentage_offer() {
        let offer = make_offer(OfferDiscountType::Percentage, dec!(10), false);
        assert_eq!(offer_amount(&offer, dec!(80)), Some(dec!(8)));
    }

    #[test]
    fn test_percentage_offer_is_capped() {
        let mut offer = make_offer(OfferDiscountType::Percentage, dec!(50), false);
        offer.max_discount_amount = Some(dec!(5));
        assert_eq!(offer_amount(&offer, dec!(80)), Some(dec!(5)));
    }

    #[test]
    fn test_fixed_amount_offer() {
        let offer = make_offer(OfferDiscountType::FixedAmount, dec!(7.5), false);
        assert_eq!(offer_amount(&offer, dec!(80)), Some(dec!(7.5)));
    }

    #[test]
    fn test_points_exchange_offer_is_skipped() {
        let offer = make_offer(OfferDiscountType::PointsExchange, dec!(100), true);
        assert_eq!(offer_amount(&offer, dec!(80)), None);
    }

    #[test]
    fn test_min_purchase_not_met() {
        let mut offer = make_offer(OfferDiscountType::FixedAmount, dec!(5), false);
        offer.min_purchase_amount = Some(dec!(100));
        assert_eq!(offer_amount(&offer, dec!(99.99)), None);
        assert_eq!(offer_amount(&offer, dec!(100)), Some(dec!(5)));
    }

    #[test]
    fn test_non_cumulative_then_cumulative_both_apply() {
        let a = make_offer(OfferDiscountType::Percentage, dec!(10), false);
        let b = make_offer(OfferDiscountType::Percentage, dec!(5), true);

        let discounts = evaluate_admin_offers(&[a.clone(), b.clone()], dec!(100), false);

        assert_eq!(discounts.len(), 2);
        assert_eq!(discounts[0].offer_id, Some(a.id));
        assert_eq!(discounts[1].offer_id, Some(b.id));
        // both computed against the same remaining total
        assert_eq!(discounts[0].amount, dec!(10));
        assert_eq!(discounts[1].amount, dec!(5));
    }

    #[test]
    fn test_two_non_cumulative_after_first_order_only_first_applies() {
        let a = make_offer(OfferDiscountType::Percentage, dec!(10), false);
        let b = make_offer(OfferDiscountType::Percentage, dec!(5), false);

        let discounts = evaluate_admin_offers(&[a.clone(), b], dec!(100), false);

        assert_eq!(discounts.len(), 1);
        assert_eq!(discounts[0].offer_id, Some(a.id));
    }

    #[test]
    fn test_two_non_cumulative_without_prior_discount_both_apply() {
        let a = make_offer(OfferDiscountType::Percentage, dec!(10), false);
        let b = make_offer(OfferDiscountType::Percentage, dec!(5), false);

        let discounts = evaluate_admin_offers(&[a.clone(), b.clone()], dec!(100), true);

        assert_eq!(discounts.len(), 2);
        assert_eq!(discounts[0].offer_id, Some(a.id));
        assert_eq!(discounts[1].offer_id, Some(b.id));
    }

    #[test]
    fn test_skipped_offer_does_not_count_as_applied() {
        let mut gated = make_offer(OfferDiscountType::FixedAmount, dec!(20), false);
        gated.min_purchase_amount = Some(dec!(500));
        let second = make_offer(OfferDiscountType::FixedAmount, dec!(3), false);

        let discounts = evaluate_admin_offers(&[gated, second.clone()], dec!(100), false);

        assert_eq!(discounts.len(), 1);
        assert_eq!(discounts[0].offer_id, Some(second.id));
    }

    #[test]
    fn test_no_offers() {
        assert!(evaluate_admin_offers(&[], dec!(100), true).is_empty());
    }
}
