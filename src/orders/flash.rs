// Flash orders: created with only an address, priced later by staff

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::orders::{
    CompleteFlashOrderRequest, NewOrderItem, OrderError, OrderStatus, PriceCalculator, StatusMachine, MAX_ITEM_QUANTITY,
};

/// Checked completion payload, ready to be written in one transaction
#[derive(Debug, Clone, PartialEq)]
pub struct FlashCompletion {
    pub service_id: Uuid,
    pub service_type_id: Option<Uuid>,
    pub items: Vec<NewOrderItem>,
    pub collection_date: DateTime<Utc>,
    pub delivery_date: DateTime<Utc>,
    pub total_amount: Decimal,
}

impl FlashCompletion {
    /// Validate a completion request against the order's current status
    pub fn prepare(current: OrderStatus, request: CompleteFlashOrderRequest) -> Result<Self, OrderError> {
        if current != OrderStatus::Draft {
            return Err(OrderError::InvalidOrderState(format!(
                "Only DRAFT orders can be completed; order is {}",
                current
            )));
        }
        if request.items.is_empty() {
            return Err(OrderError::InvalidOrderState(
                "A flash order needs at least one item to be completed".to_string(),
            ));
        }

        let service_id = request
            .service_id
            .ok_or_else(|| OrderError::Validation("serviceId is required".to_string()))?;
        let collection_date = request
            .collection_date
            .ok_or_else(|| OrderError::Validation("collectionDate is required".to_string()))?;
        let delivery_date = request
            .delivery_date
            .ok_or_else(|| OrderError::Validation("deliveryDate is required".to_string()))?;
        if delivery_date < collection_date {
            return Err(OrderError::Validation(
                "deliveryDate must not be before collectionDate".to_string(),
            ));
        }

        let mut items = Vec::with_capacity(request.items.len());
        for item in request.items {
            if !(1..=MAX_ITEM_QUANTITY).contains(&item.quantity) {
                return Err(OrderError::Validation(format!(
                    "Quantity must be between 1 and {}",
                    MAX_ITEM_QUANTITY
                )));
            }
            if item.unit_price < Decimal::ZERO {
                return Err(OrderError::Validation("unitPrice must not be negative".to_string()));
            }
            items.push(NewOrderItem {
                article_id: item.article_id,
                service_id: Some(service_id),
                quantity: item.quantity,
                unit_price: item.unit_price,
                is_premium: item.is_premium,
            });
        }

        StatusMachine::transition(current, OrderStatus::Pending).map_err(OrderError::InvalidTransition)?;

        Ok(Self {
            total_amount: PriceCalculator::order_subtotal(&items),
            service_id,
            service_type_id: request.service_type_id,
            items,
            collection_date,
            delivery_date,
        })
    }
}
