// Authentication module
// Identity comes from a bearer JWT; handlers guard roles with `require_any`

pub mod error;
pub mod middleware;
pub mod models;
pub mod token;

pub use error::AuthError;
pub use middleware::AuthenticatedUser;
pub use models::Role;
pub use token::{Claims, TokenService};
