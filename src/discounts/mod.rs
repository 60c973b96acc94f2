// Discount evaluators and the engine that composes them

pub mod admin_offer;
pub mod engine;
pub mod error;
pub mod first_order;
pub mod handlers;
pub mod loyalty_redemption;
pub mod service;
pub mod types;

pub use admin_offer::{evaluate_admin_offers, offer_amount};
pub use engine::{calculate_order_discounts, DiscountContext};
pub use error::*;
pub use first_order::evaluate_first_order;
pub use handlers::*;
pub use loyalty_redemption::evaluate_loyalty;
pub use service::*;
pub use types::*;
