pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod discounts;
pub mod error;
pub mod loyalty;
pub mod offers;
pub mod order_pricing;
pub mod orders;
pub mod response;
pub mod validation;

use std::sync::Arc;

use axum::{
    extract::FromRef,
    response::Json,
    routing::{delete, get, patch, post},
    Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use auth::TokenService;
use catalog::{CatalogRepository, CatalogService};
use discounts::{DiscountRepository, DiscountService};
use loyalty::LoyaltyRepository;
use offers::{OfferRepository, OfferService};
use order_pricing::{OrderPricingRepository, OrderPricingService};
use orders::{OrderItemsRepository, OrderService, OrdersRepository};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        catalog::handlers::calculate_price_handler,
        catalog::handlers::list_article_prices_handler,
        catalog::handlers::list_weight_tiers_handler,
        catalog::handlers::create_weight_tier_handler,
        discounts::handlers::preview_discounts_handler,
        offers::handlers::list_offers_handler,
        offers::handlers::get_offer_handler,
        offers::handlers::create_offer_handler,
        offers::handlers::toggle_offer_status_handler,
        loyalty::handlers::get_balance_handler,
        orders::handlers::create_order_handler,
        orders::handlers::get_order_history_handler,
        orders::handlers::get_order_by_id_handler,
        orders::handlers::update_order_status_handler,
        orders::handlers::create_flash_order_handler,
        orders::handlers::list_flash_orders_handler,
        orders::handlers::complete_flash_order_handler,
        order_pricing::handlers::get_pricing_handler,
        order_pricing::handlers::update_pricing_handler,
        order_pricing::handlers::reset_manual_price_handler,
        order_pricing::handlers::mark_paid_handler,
        order_pricing::handlers::mark_unpaid_handler,
    ),
    components(
        schemas(
            error::ErrorResponse,
            auth::Role,
            catalog::ArticleServicePrice,
            catalog::WeightPricingTier,
            catalog::CalculatePriceRequest,
            catalog::CreateWeightTierRequest,
            catalog::BreakdownKind,
            catalog::PriceBreakdownEntry,
            catalog::PriceQuote,
            discounts::DiscountKind,
            discounts::Discount,
            discounts::DiscountResult,
            discounts::DiscountPreviewRequest,
            offers::OfferDiscountType,
            offers::Offer,
            offers::CreateOfferRequest,
            offers::ToggleOfferStatusRequest,
            loyalty::LoyaltyBalanceResponse,
            orders::OrderStatus,
            orders::CreateOrderItemRequest,
            orders::CreateOrderRequest,
            orders::CreateFlashOrderRequest,
            orders::FlashOrderItemRequest,
            orders::CompleteFlashOrderRequest,
            orders::UpdateStatusRequest,
            orders::OrderResponse,
            orders::OrderItemResponse,
            orders::PlacedOrderResponse,
            order_pricing::UpdatePricingRequest,
            order_pricing::PaymentFlagRequest,
            order_pricing::OrderPricingResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Liveness"),
        (name = "catalog", description = "Article prices and weight tiers"),
        (name = "discounts", description = "Discount preview"),
        (name = "offers", description = "Promotional offers"),
        (name = "loyalty", description = "Loyalty points"),
        (name = "orders", description = "Order placement and lifecycle"),
        (name = "pricing", description = "Manual price overrides and payment flag")
    ),
    info(
        title = "Laundry API",
        version = "1.0.0",
        description = "Pricing, discounts and order lifecycle for a laundry service"
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog_service: CatalogService,
    pub offer_service: OfferService,
    pub loyalty_repo: LoyaltyRepository,
    pub discount_service: DiscountService,
    pub order_service: OrderService,
    pub pricing_service: OrderPricingService,
    pub token_service: Arc<TokenService>,
}

impl AppState {
    pub fn new(pool: PgPool, token_service: TokenService) -> Self {
        let catalog_service = CatalogService::new(CatalogRepository::new(pool.clone()));
        let offer_service = OfferService::new(OfferRepository::new(pool.clone()));
        let loyalty_repo = LoyaltyRepository::new(pool.clone());
        let discount_service = DiscountService::new(
            DiscountRepository::new(pool.clone()),
            offer_service.clone(),
            loyalty_repo.clone(),
        );
        let orders_repo = OrdersRepository::new(pool.clone());
        let order_service = OrderService::new(
            orders_repo.clone(),
            OrderItemsRepository::new(pool.clone()),
            catalog_service.clone(),
            discount_service.clone(),
            loyalty_repo.clone(),
        );
        let pricing_service = OrderPricingService::new(OrderPricingRepository::new(pool), orders_repo);

        Self {
            catalog_service,
            offer_service,
            loyalty_repo,
            discount_service,
            order_service,
            pricing_service,
            token_service: Arc::new(token_service),
        }
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(state: &AppState) -> Self {
        state.token_service.clone()
    }
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Creates and configures the application router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health_handler))
        // catalog
        .route("/api/services/calculate-price", post(catalog::calculate_price_handler))
        .route("/api/articles/:article_id/prices", get(catalog::list_article_prices_handler))
        .route("/api/weight-pricing", post(catalog::create_weight_tier_handler))
        .route("/api/weight-pricing/:service_type_id", get(catalog::list_weight_tiers_handler))
        // discounts, offers, loyalty
        .route("/api/discounts/preview", post(discounts::preview_discounts_handler))
        .route(
            "/api/offers",
            get(offers::list_offers_handler).post(offers::create_offer_handler),
        )
        .route("/api/offers/:id", get(offers::get_offer_handler))
        .route("/api/offers/:id/status", patch(offers::toggle_offer_status_handler))
        .route("/api/loyalty/balance", get(loyalty::get_balance_handler))
        // orders
        .route(
            "/api/orders",
            post(orders::create_order_handler).get(orders::get_order_history_handler),
        )
        .route(
            "/api/orders/flash",
            post(orders::create_flash_order_handler).get(orders::list_flash_orders_handler),
        )
        .route(
            "/api/orders/flash/:order_id/complete",
            patch(orders::complete_flash_order_handler),
        )
        .route("/api/orders/:order_id", get(orders::get_order_by_id_handler))
        .route("/api/orders/:order_id/status", patch(orders::update_order_status_handler))
        // pricing overrides
        .route(
            "/api/orders/:order_id/pricing",
            get(order_pricing::get_pricing_handler).patch(order_pricing::update_pricing_handler),
        )
        .route(
            "/api/orders/:order_id/pricing/manual-price",
            delete(order_pricing::reset_manual_price_handler),
        )
        .route("/api/orders/:order_id/pricing/mark-paid", post(order_pricing::mark_paid_handler))
        .route("/api/orders/:order_id/pricing/mark-unpaid", post(order_pricing::mark_unpaid_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
