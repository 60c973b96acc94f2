use rust_decimal::Decimal;

use crate::catalog::error::CatalogError;
use crate::catalog::models::{ArticleServicePrice, BreakdownKind, PriceBreakdownEntry, PriceQuote, WeightPricingTier};

/// Catalog pricing rules over already-loaded catalog rows
pub struct CatalogCalculator;

impl CatalogCalculator {
    /// Unit price for an entry: premium price when requested and defined, base price otherwise
    pub fn unit_price(entry: &ArticleServicePrice, is_premium: bool) -> Decimal {
        match (is_premium, entry.premium_price) {
            (true, Some(premium)) => premium,
            _ => entry.base_price,
        }
    }

    pub fn item_cost(entry: &ArticleServicePrice, is_premium: bool, quantity: i32) -> PriceBreakdownEntry {
        let unit_price = Self::unit_price(entry, is_premium);
        PriceBreakdownEntry {
            kind: BreakdownKind::Item,
            quantity: Some(quantity),
            weight: None,
            unit_price,
            cost: unit_price * Decimal::from(quantity),
        }
    }

    /// The active tier with `min_weight <= weight < max_weight`
    pub fn find_tier(tiers: &[WeightPricingTier], weight: Decimal) -> Option<&WeightPricingTier> {
        tiers
            .iter()
            .find(|tier| tier.is_active && tier.min_weight <= weight && weight < tier.max_weight)
    }

    pub fn weight_cost(tiers: &[WeightPricingTier], weight: Decimal) -> Result<PriceBreakdownEntry, CatalogError> {
        let tier = Self::find_tier(tiers, weight).ok_or(CatalogError::NoWeightTier { weight })?;
        Ok(PriceBreakdownEntry {
            kind: BreakdownKind::Weight,
            quantity: None,
            weight: Some(weight),
            unit_price: tier.price_per_kg,
            cost: tier.price_per_kg * weight,
        })
    }

    /// Half-open ranges `[a_min, a_max)` and `[b_min, b_max)` share at least one point
    pub fn ranges_overlap(a_min: Decimal, a_max: Decimal, b_min: Decimal, b_max: Decimal) -> bool {
        a_min < b_max && b_min < a_max
    }

    /// Optional weight line followed by the item line; total is their sum
    pub fn quote(
        entry: &ArticleServicePrice,
        is_premium: bool,
        quantity: i32,
        weight: Option<(Decimal, &[WeightPricingTier])>,
    ) -> Result<PriceQuote, CatalogError> {
        let mut breakdown = Vec::with_capacity(2);
        if let Some((weight, tiers)) = weight {
            breakdown.push(Self::weight_cost(tiers, weight)?);
        }
        breakdown.push(Self::item_cost(entry, is_premium, quantity));
        let total = breakdown.iter().map(|line| line.cost).sum();
        Ok(PriceQuote { total, breakdown })
    }
}
