pub mod error;
pub mod flash;
pub mod handlers;
pub mod models;
pub mod price_calculator;
pub mod repository;
pub mod service;
pub mod status_machine;

pub use error::*;
pub use flash::*;
pub use handlers::*;
pub use models::*;
pub use price_calculator::*;
pub use repository::*;
pub use service::*;
pub use status_machine::*;
