use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::order_pricing::models::{OrderPricing, PricingCalculation, UpdatePricingRequest};

pub const DEFAULT_PAID_REASON: &str = "Marked as paid by admin";
pub const DEFAULT_UNPAID_REASON: &str = "Marked as unpaid by admin";

/// `display = manual ?? original`; discount fields only when a differing manual price is set
pub fn compute_pricing(original_price: Decimal, manual_price: Option<Decimal>) -> PricingCalculation {
    let display_price = manual_price.unwrap_or(original_price);

    let (discount, discount_percentage) = match manual_price {
        Some(manual) if manual != original_price => {
            let discount = original_price - manual;
            let percentage = if original_price.is_zero() {
                None
            } else {
                Some((discount / original_price * Decimal::ONE_HUNDRED).round_dp(2))
            };
            (Some(discount), percentage)
        }
        _ => (None, None),
    };

    PricingCalculation {
        original_price,
        manual_price,
        display_price,
        discount,
        discount_percentage,
    }
}

/// One administrative change to an order's pricing record
#[derive(Debug, Clone)]
pub enum PricingChange {
    Update(UpdatePricingRequest),
    ResetManualPrice,
    MarkPaid { reason: Option<String> },
    MarkUnpaid { reason: Option<String> },
}

impl PricingChange {
    pub fn validate(&self) -> Result<(), String> {
        if let PricingChange::Update(update) = self {
            if let Some(price) = update.manual_price {
                if price < Decimal::ZERO {
                    return Err("manual_price must not be negative".to_string());
                }
            }
        }
        Ok(())
    }
}

/// Merge a change into the existing record (or a fresh one), stamping actor and time
pub fn apply_change(
    order_id: Uuid,
    existing: Option<OrderPricing>,
    change: PricingChange,
    admin_id: Uuid,
    now: DateTime<Utc>,
) -> OrderPricing {
    let mut record = existing.unwrap_or(OrderPricing {
        order_id,
        manual_price: None,
        is_paid: false,
        paid_at: None,
        reason: None,
        updated_by: admin_id,
        updated_at: now,
    });

    match change {
        PricingChange::Update(update) => {
            if update.manual_price.is_some() {
                record.manual_price = update.manual_price;
            }
            if let Some(is_paid) = update.is_paid {
                set_paid(&mut record, is_paid, now);
            }
            if update.reason.is_some() {
                record.reason = update.reason;
            }
        }
        PricingChange::ResetManualPrice => {
            record.manual_price = None;
            record.reason = None;
        }
        PricingChange::MarkPaid { reason } => {
            set_paid(&mut record, true, now);
            record.reason = Some(reason.unwrap_or_else(|| DEFAULT_PAID_REASON.to_string()));
        }
        PricingChange::MarkUnpaid { reason } => {
            set_paid(&mut record, false, now);
            record.reason = Some(reason.unwrap_or_else(|| DEFAULT_UNPAID_REASON.to_string()));
        }
    }

    record.updated_by = admin_id;
    record.updated_at = now;
    record
}

/// An already-paid record keeps its original `paid_at`
fn set_paid(record: &mut OrderPricing, is_paid: bool, now: DateTime<Utc>) {
    record.paid_at = match (is_paid, record.is_paid) {
        (false, _) => None,
        (true, true) => record.paid_at.or(Some(now)),
        (true, false) => Some(now),
    };
    record.is_paid = is_paid;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_manual_price_reduction() {
        let calc = compute_pricing(dec!(1000), Some(dec!(800)));
        assert_eq!(calc.display_price, dec!(800));
        assert_eq!(calc.discount, Some(dec!(200)));
        assert_eq!(calc.discount_percentage, Some(dec!(20)));
    }

    #[test]
    fn test_manual_price_increase_is_negative_discount() {
        let calc = compute_pricing(dec!(1000), Some(dec!(1200)));
        assert_eq!(calc.display_price, dec!(1200));
        assert_eq!(calc.discount, Some(dec!(-200)));
        assert_eq!(calc.discount_percentage, Some(dec!(-20)));
    }

    #[test]
    fn test_no_manual_price() {
        let calc = compute_pricing(dec!(1000), None);
        assert_eq!(calc.display_price, dec!(1000));
        assert_eq!(calc.discount, None);
        assert_eq!(calc.discount_percentage, None);
    }

    #[test]
    fn test_manual_equal_to_original() {
        let calc = compute_pricing(dec!(1000), Some(dec!(1000)));
        assert_eq!(calc.discount, None);
        assert_eq!(calc.discount_percentage, None);
    }

    #[test]
    fn test_zero_original_has_no_percentage() {
        let calc = compute_pricing(dec!(0), Some(dec!(50)));
        assert_eq!(calc.discount, Some(dec!(-50)));
        assert_eq!(calc.discount_percentage, None);
    }

    #[test]
    fn test_update_on_fresh_record() {
        let admin = Uuid::new_v4();
        let order = Uuid::new_v4();
        let now = Utc::now();
        let record = apply_change(
            order,
            None,
            PricingChange::Update(UpdatePricingRequest {
                manual_price: Some(dec!(800)),
                is_paid: Some(true),
                reason: Some("Loyal customer".to_string()),
            }),
            admin,
            now,
        );

        assert_eq!(record.order_id, order);
        assert_eq!(record.manual_price, Some(dec!(800)));
        assert!(record.is_paid);
        assert_eq!(record.paid_at, Some(now));
        assert_eq!(record.updated_by, admin);
    }

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let admin = Uuid::new_v4();
        let now = Utc::now();
        let first = apply_change(
            Uuid::new_v4(),
            None,
            PricingChange::Update(UpdatePricingRequest {
                manual_price: Some(dec!(800)),
                is_paid: None,
                reason: Some("Damaged item".to_string()),
            }),
            admin,
            now,
        );
        let second = apply_change(
            first.order_id,
            Some(first.clone()),
            PricingChange::Update(UpdatePricingRequest {
                manual_price: None,
                is_paid: Some(true),
                reason: None,
            }),
            admin,
            now,
        );

        assert_eq!(second.manual_price, Some(dec!(800)));
        assert_eq!(second.reason.as_deref(), Some("Damaged item"));
        assert!(second.is_paid);
    }

    #[test]
    fn test_reset_clears_manual_price() {
        let now = Utc::now();
        let admin = Uuid::new_v4();
        let start = apply_change(
            Uuid::new_v4(),
            None,
            PricingChange::Update(UpdatePricingRequest {
                manual_price: Some(dec!(10)),
                is_paid: Some(true),
                reason: Some("x".to_string()),
            }),
            admin,
            now,
        );
        let reset = apply_change(start.order_id, Some(start), PricingChange::ResetManualPrice, admin, now);
        assert_eq!(reset.manual_price, None);
        assert_eq!(reset.reason, None);
        assert!(reset.is_paid);
    }

    #[test]
    fn test_mark_paid_and_unpaid_default_reasons() {
        let now = Utc::now();
        let admin = Uuid::new_v4();
        let paid = apply_change(Uuid::new_v4(), None, PricingChange::MarkPaid { reason: None }, admin, now);
        assert!(paid.is_paid);
        assert_eq!(paid.paid_at, Some(now));
        assert_eq!(paid.reason.as_deref(), Some(DEFAULT_PAID_REASON));

        let unpaid = apply_change(paid.order_id, Some(paid), PricingChange::MarkUnpaid { reason: None }, admin, now);
        assert!(!unpaid.is_paid);
        assert_eq!(unpaid.paid_at, None);
        assert_eq!(unpaid.reason.as_deref(), Some(DEFAULT_UNPAID_REASON));
    }

    #[test]
    fn test_repeated_payment_keeps_first_paid_at() {
        let admin = Uuid::new_v4();
        let paid_at = Utc::now();
        let later = paid_at + chrono::Duration::hours(3);
        let paid = apply_change(Uuid::new_v4(), None, PricingChange::MarkPaid { reason: None }, admin, paid_at);

        let again = apply_change(
            paid.order_id,
            Some(paid.clone()),
            PricingChange::Update(UpdatePricingRequest {
                is_paid: Some(true),
                ..Default::default()
            }),
            admin,
            later,
        );
        assert_eq!(again.paid_at, Some(paid_at));
        assert_eq!(again.updated_at, later);

        let marked = apply_change(paid.order_id, Some(again), PricingChange::MarkPaid { reason: None }, admin, later);
        assert_eq!(marked.paid_at, Some(paid_at));

        let unpaid = apply_change(paid.order_id, Some(marked), PricingChange::MarkUnpaid { reason: None }, admin, later);
        let repaid = apply_change(paid.order_id, Some(unpaid), PricingChange::MarkPaid { reason: None }, admin, later);
        assert_eq!(repaid.paid_at, Some(later));
    }

    #[test]
    fn test_negative_manual_price_rejected() {
        let change = PricingChange::Update(UpdatePricingRequest {
            manual_price: Some(dec!(-1)),
            ..Default::default()
        });
        assert!(change.validate().is_err());
        assert!(PricingChange::ResetManualPrice.validate().is_ok());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: display price equals manual when set, and original − discount == display
        #[test]
        fn prop_display_and_discount_agree(original in 1i64..1_000_000, manual in 0i64..1_000_000) {
            let original = Decimal::new(original, 2);
            let manual = Decimal::new(manual, 2);
            let calc = compute_pricing(original, Some(manual));

            prop_assert_eq!(calc.display_price, manual);
            let discount = calc.discount.unwrap_or(Decimal::ZERO);
            prop_assert_eq!(original - discount, manual);
        }
    }
}
