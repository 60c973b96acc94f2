use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::catalog::calculator::CatalogCalculator;
use crate::catalog::error::CatalogError;
use crate::catalog::models::{
    ArticleServicePrice, CalculatePriceRequest, CreateWeightTierRequest, PriceBreakdownEntry, PriceQuote,
    WeightPricingTier,
};
use crate::catalog::repository::CatalogRepository;

/// Service for catalog lookups and quotes
#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository) -> Self {
        Self { repo }
    }

    async fn require_entry(
        &self,
        article_id: Uuid,
        service_id: Uuid,
        service_type_id: Uuid,
    ) -> Result<ArticleServicePrice, CatalogError> {
        self.repo
            .find_available_price(article_id, service_id, service_type_id)
            .await?
            .ok_or(CatalogError::IncompatibleService { article_id, service_id })
    }

    /// Quote one article under one service, optionally with a weight component
    pub async fn calculate_price(&self, request: CalculatePriceRequest) -> Result<PriceQuote, CatalogError> {
        request
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        tracing::debug!(
            "Calculating price for article {} (service {}, type {})",
            request.article_id,
            request.service_id,
            request.service_type_id
        );

        let entry = self
            .require_entry(request.article_id, request.service_id, request.service_type_id)
            .await?;

        let quote = match request.weight {
            Some(weight) => {
                let tiers = self.repo.find_active_tiers(request.service_type_id).await?;
                CatalogCalculator::quote(&entry, request.is_premium, request.quantity, Some((weight, &tiers)))?
            }
            None => CatalogCalculator::quote(&entry, request.is_premium, request.quantity, None)?,
        };

        Ok(quote)
    }

    /// Price one order line; used when placing an order
    pub async fn price_item(
        &self,
        article_id: Uuid,
        service_id: Uuid,
        service_type_id: Uuid,
        quantity: i32,
        is_premium: bool,
    ) -> Result<PriceBreakdownEntry, CatalogError> {
        let entry = self.require_entry(article_id, service_id, service_type_id).await?;
        Ok(CatalogCalculator::item_cost(&entry, is_premium, quantity))
    }

    pub async fn list_article_prices(&self, article_id: Uuid) -> Result<Vec<ArticleServicePrice>, CatalogError> {
        self.repo.find_prices_for_article(article_id).await
    }

    pub async fn list_weight_tiers(&self, service_type_id: Uuid) -> Result<Vec<WeightPricingTier>, CatalogError> {
        self.repo.find_active_tiers(service_type_id).await
    }

    pub async fn create_weight_tier(&self, request: CreateWeightTierRequest) -> Result<WeightPricingTier, CatalogError> {
        validate_tier_bounds(&request)?;

        let existing = self.repo.find_active_tiers(request.service_type_id).await?;
        if let Some(clash) = existing.iter().find(|tier| {
            CatalogCalculator::ranges_overlap(tier.min_weight, tier.max_weight, request.min_weight, request.max_weight)
        }) {
            tracing::warn!(
                "Rejected weight tier [{}, {}) for service type {}: overlaps tier {}",
                request.min_weight,
                request.max_weight,
                request.service_type_id,
                clash.id
            );
            return Err(CatalogError::OverlappingTier);
        }

        let tier = self
            .repo
            .insert_tier(request.service_type_id, request.min_weight, request.max_weight, request.price_per_kg)
            .await?;
        tracing::info!("Created weight tier {} for service type {}", tier.id, tier.service_type_id);
        Ok(tier)
    }
}

/// Field checks plus `max_weight > min_weight`
pub fn validate_tier_bounds(request: &CreateWeightTierRequest) -> Result<(), CatalogError> {
    request
        .validate()
        .map_err(|e| CatalogError::Validation(e.to_string()))?;
    if request.max_weight <= request.min_weight {
        return Err(CatalogError::Validation(
            "maxWeight must be greater than minWeight".to_string(),
        ));
    }
    if request.min_weight < Decimal::ZERO {
        return Err(CatalogError::Validation("minWeight must not be negative".to_string()));
    }
    Ok(())
}
