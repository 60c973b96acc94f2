use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashSet;
use uuid::Uuid;
use validator::Validate;

use crate::offers::error::OfferError;
use crate::offers::models::{CreateOfferRequest, Offer, OfferDiscountType};
use crate::offers::repository::OfferRepository;

/// Service for offer administration and lookup
#[derive(Clone)]
pub struct OfferService {
    repo: OfferRepository,
}

impl OfferService {
    pub fn new(repo: OfferRepository) -> Self {
        Self { repo }
    }

    pub async fn create_offer(&self, request: CreateOfferRequest) -> Result<Offer, OfferError> {
        validate_offer(&request)?;
        let offer = self.repo.insert(&request).await?;
        tracing::info!("Created offer {} ({} {})", offer.id, offer.discount_type, offer.discount_value);
        Ok(offer)
    }

    pub async fn list_available_offers(&self, now: DateTime<Utc>) -> Result<Vec<Offer>, OfferError> {
        self.repo.find_available(now).await
    }

    pub async fn get_offer(&self, id: Uuid) -> Result<Offer, OfferError> {
        self.repo.find_by_id(id).await?.ok_or(OfferError::NotFound(id))
    }

    pub async fn toggle_offer_status(&self, id: Uuid, is_active: bool) -> Result<Offer, OfferError> {
        let offer = self.repo.set_active(id, is_active).await?;
        tracing::info!("Offer {} is_active set to {}", id, is_active);
        Ok(offer)
    }

    /// Offers from `ids` that are valid at `now`, in request order, duplicates collapsed
    pub async fn find_valid_by_ids(&self, ids: &[Uuid], now: DateTime<Utc>) -> Result<Vec<Offer>, OfferError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let found = self.repo.find_by_ids(ids).await?;
        Ok(select_valid_in_order(ids, found, now))
    }
}

/// Field checks plus date window and percentage bound
pub fn validate_offer(request: &CreateOfferRequest) -> Result<(), OfferError> {
    request
        .validate()
        .map_err(|e| OfferError::Validation(e.to_string()))?;
    if request.end_date <= request.start_date {
        return Err(OfferError::Validation("endDate must be after startDate".to_string()));
    }
    if request.discount_type == OfferDiscountType::Percentage && request.discount_value > Decimal::ONE_HUNDRED {
        return Err(OfferError::Validation(
            "Percentage offers cannot exceed 100".to_string(),
        ));
    }
    Ok(())
}

/// Reorder `found` to follow `ids`, dropping duplicates, unknown IDs and offers invalid at `now`
pub fn select_valid_in_order(ids: &[Uuid], found: Vec<Offer>, now: DateTime<Utc>) -> Vec<Offer> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| seen.insert(**id))
        .filter_map(|id| found.iter().find(|offer| offer.id == *id))
        .filter(|offer| offer.is_valid_at(now))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn offer(is_active: bool, starts_in_days: i64, ends_in_days: i64) -> Offer {
        let now = Utc::now();
        Offer {
            id: Uuid::new_v4(),
            name: "Spring clean".to_string(),
            description: None,
            discount_type: OfferDiscountType::Percentage,
            discount_value: dec!(10),
            max_discount_amount: None,
            min_purchase_amount: None,
            is_cumulative: false,
            start_date: now + Duration::days(starts_in_days),
            end_date: now + Duration::days(ends_in_days),
            is_active,
            created_at: now,
            updated_at: now,
        }
    }

    fn create_request(kind: OfferDiscountType, value: Decimal) -> CreateOfferRequest {
        let now = Utc::now();
        CreateOfferRequest {
            name: "Welcome back".to_string(),
            description: Some("Ten percent off".to_string()),
            discount_type: kind,
            discount_value: value,
            max_discount_amount: Some(dec!(20)),
            min_purchase_amount: None,
            is_cumulative: false,
            start_date: now,
            end_date: now + Duration::days(30),
        }
    }

    #[test]
    fn test_validity_window() {
        let now = Utc::now();
        assert!(offer(true, -1, 1).is_valid_at(now));
        assert!(!offer(false, -1, 1).is_valid_at(now));
        assert!(!offer(true, 1, 2).is_valid_at(now));
        assert!(!offer(true, -2, -1).is_valid_at(now));
    }

    #[test]
    fn test_select_valid_preserves_request_order() {
        let a = offer(true, -1, 1);
        let b = offer(true, -1, 1);
        let expired = offer(true, -3, -2);
        let ids = vec![b.id, expired.id, a.id, b.id, Uuid::new_v4()];

        let selected = select_valid_in_order(&ids, vec![a.clone(), b.clone(), expired], Utc::now());

        let selected_ids: Vec<Uuid> = selected.iter().map(|o| o.id).collect();
        assert_eq!(selected_ids, vec![b.id, a.id]);
    }

    #[test]
    fn test_validate_offer_accepts_sane_percentage() {
        assert!(validate_offer(&create_request(OfferDiscountType::Percentage, dec!(10))).is_ok());
    }

    #[test]
    fn test_validate_offer_rejects_percentage_over_100() {
        assert!(matches!(
            validate_offer(&create_request(OfferDiscountType::Percentage, dec!(150))),
            Err(OfferError::Validation(_))
        ));
        assert!(validate_offer(&create_request(OfferDiscountType::FixedAmount, dec!(150))).is_ok());
    }

    #[test]
    fn test_validate_offer_rejects_inverted_dates() {
        let mut request = create_request(OfferDiscountType::FixedAmount, dec!(5));
        request.end_date = request.start_date;
        assert!(validate_offer(&request).is_err());
    }

    #[test]
    fn test_validate_offer_rejects_zero_value_and_empty_name() {
        assert!(validate_offer(&create_request(OfferDiscountType::FixedAmount, dec!(0))).is_err());

        let mut request = create_request(OfferDiscountType::FixedAmount, dec!(5));
        request.name = String::new();
        assert!(validate_offer(&request).is_err());
    }
}
