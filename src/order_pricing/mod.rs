// Manual price overrides and the paid flag for orders

pub mod calculator;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use calculator::*;
pub use error::*;
pub use handlers::*;
pub use models::*;
pub use repository::*;
pub use service::*;
