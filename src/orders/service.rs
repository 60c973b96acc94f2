use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::catalog::CatalogService;
use crate::discounts::{DiscountRequest, DiscountService};
use crate::loyalty::{delivery_points, LoyaltyRepository};
use crate::orders::flash::FlashCompletion;
use crate::orders::{
    CompleteFlashOrderRequest, CreateFlashOrderRequest, CreateOrderRequest, NewOrder, NewOrderItem, Order,
    OrderError, OrderItemsRepository, OrderResponse, OrderStatus, OrdersRepository, PlacedOrderResponse,
    PriceCalculator, StatusMachine,
};

/// Service for order business logic
#[derive(Clone)]
pub struct OrderService {
    orders_repo: OrdersRepository,
    order_items_repo: OrderItemsRepository,
    catalog: CatalogService,
    discounts: DiscountService,
    loyalty: LoyaltyRepository,
}

impl OrderService {
    pub fn new(
        orders_repo: OrdersRepository,
        order_items_repo: OrderItemsRepository,
        catalog: CatalogService,
        discounts: DiscountService,
        loyalty: LoyaltyRepository,
    ) -> Self {
        Self {
            orders_repo,
            order_items_repo,
            catalog,
            discounts,
            loyalty,
        }
    }

    async fn with_items(&self, order: Order) -> Result<OrderResponse, OrderError> {
        let items = self.order_items_repo.find_by_order_id(order.id).await?;
        Ok(OrderResponse::from_parts(order, items))
    }

    /// Place an order: price items through the catalog, apply discounts, store as PENDING
    ///
    /// Redeemed loyalty points are debited in the same transaction as the insert.
    pub async fn create_order(&self, user_id: Uuid, request: CreateOrderRequest) -> Result<PlacedOrderResponse, OrderError> {
        if request.items.is_empty() {
            return Err(OrderError::Validation("Order must contain at least one item".to_string()));
        }
        if let (Some(collection), Some(delivery)) = (request.collection_date, request.delivery_date) {
            if delivery < collection {
                return Err(OrderError::Validation(
                    "deliveryDate must not be before collectionDate".to_string(),
                ));
            }
        }

        let mut items = Vec::with_capacity(request.items.len());
        for line in &request.items {
            let priced = self
                .catalog
                .price_item(line.article_id, request.service_id, request.service_type_id, line.quantity, line.is_premium)
                .await?;
            items.push(NewOrderItem {
                article_id: line.article_id,
                service_id: Some(request.service_id),
                quantity: line.quantity,
                unit_price: priced.unit_price,
                is_premium: line.is_premium,
            });
        }
        let subtotal = PriceCalculator::order_subtotal(&items);

        let pricing = self
            .discounts
            .calculate_order_discounts(DiscountRequest {
                user_id,
                subtotal,
                use_points: request.use_points,
                applied_offer_ids: request.offer_ids.clone(),
            })
            .await?;

        let points_redeemed = if pricing.loyalty_applied() {
            request.use_points.unwrap_or(0)
        } else {
            0
        };

        let order = self
            .orders_repo
            .create_with_items(
                NewOrder {
                    user_id,
                    address_id: request.address_id,
                    service_id: request.service_id,
                    service_type_id: request.service_type_id,
                    subtotal,
                    total_amount: pricing.total,
                    collection_date: request.collection_date,
                    delivery_date: request.delivery_date,
                    note: request.note,
                },
                &items,
                points_redeemed,
            )
            .await?;

        tracing::info!(
            "Order {} placed by user {}: subtotal={}, total={}, points_redeemed={}",
            order.id,
            user_id,
            subtotal,
            order.total_amount,
            points_redeemed
        );

        Ok(PlacedOrderResponse {
            order: self.with_items(order).await?,
            pricing,
            points_redeemed,
        })
    }

    pub async fn create_flash_order(&self, user_id: Uuid, request: CreateFlashOrderRequest) -> Result<OrderResponse, OrderError> {
        let order = self
            .orders_repo
            .create_draft(user_id, request.address_id, request.note)
            .await?;
        tracing::info!("Flash order {} created by user {}", order.id, user_id);
        Ok(OrderResponse::from_parts(order, Vec::new()))
    }

    pub async fn complete_flash_order(
        &self,
        order_id: Uuid,
        request: CompleteFlashOrderRequest,
    ) -> Result<OrderResponse, OrderError> {
        let current = self
            .orders_repo
            .find_by_id(order_id)
            .await?
            .ok_or(OrderError::NotFound(order_id))?;

        let completion = FlashCompletion::prepare(current.status, request)?;
        let order = self.orders_repo.complete_flash(order_id, &completion).await?;

        tracing::info!(
            "Flash order {} completed with {} items, total={}",
            order.id,
            completion.items.len(),
            order.total_amount
        );
        self.with_items(order).await
    }

    pub async fn list_flash_orders(&self) -> Result<Vec<OrderResponse>, OrderError> {
        let drafts = self.orders_repo.find_flash_drafts().await?;
        Ok(drafts
            .into_iter()
            .map(|order| OrderResponse::from_parts(order, Vec::new()))
            .collect())
    }

    pub async fn get_user_orders(
        &self,
        user_id: Uuid,
        status: Option<OrderStatus>,
        include_drafts: bool,
    ) -> Result<Vec<OrderResponse>, OrderError> {
        let orders = self
            .orders_repo
            .find_by_user_id(user_id, status, include_drafts)
            .await?;

        let mut responses = Vec::with_capacity(orders.len());
        for order in orders {
            responses.push(self.with_items(order).await?);
        }
        Ok(responses)
    }

    /// Order detail for its owner or staff
    pub async fn get_order(&self, order_id: Uuid, caller: &AuthenticatedUser) -> Result<OrderResponse, OrderError> {
        let order = self
            .orders_repo
            .find_by_id(order_id)
            .await?
            .ok_or(OrderError::NotFound(order_id))?;

        if !caller.can_access(order.user_id) {
            tracing::warn!("User {} attempted to read order {} owned by {}", caller.user_id, order_id, order.user_id);
            return Err(OrderError::Forbidden("You do not have access to this order".to_string()));
        }

        self.with_items(order).await
    }

    /// Move an order along the lifecycle; DELIVERED credits loyalty points to the owner
    pub async fn update_order_status(&self, order_id: Uuid, new_status: OrderStatus) -> Result<OrderResponse, OrderError> {
        let current = self
            .orders_repo
            .find_by_id(order_id)
            .await?
            .ok_or(OrderError::NotFound(order_id))?;

        StatusMachine::manual_transition(current.status, new_status).map_err(OrderError::InvalidTransition)?;

        let order = self
            .orders_repo
            .update_status(order_id, current.status, new_status)
            .await?;
        tracing::info!("Order {} status {} -> {}", order_id, current.status, new_status);

        if new_status == OrderStatus::Delivered {
            self.credit_delivery_points(&order).await;
        }

        self.with_items(order).await
    }

    async fn credit_delivery_points(&self, order: &Order) {
        let manual_price = match self.orders_repo.find_manual_price(order.id).await {
            Ok(price) => price,
            Err(e) => {
                tracing::warn!("Failed to read manual price for order {}: {}", order.id, e);
                return;
            }
        };
        let points = delivery_points(order.total_amount, manual_price);
        if points == 0 {
            return;
        }
        if let Err(e) = self.loyalty.credit_points(order.user_id, points).await {
            tracing::warn!(
                "Failed to credit {} loyalty points for order {} to user {}: {}",
                points,
                order.id,
                order.user_id,
                e
            );
        }
    }
}
