// Identity models carried by bearer tokens

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Role claimed by the caller's token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Client,
    Admin,
    SuperAdmin,
    Delivery,
    Affiliate,
}

impl Role {
    /// Roles allowed to administer prices, offers and flash orders
    pub const ADMINS: &'static [Role] = &[Role::Admin, Role::SuperAdmin];

    /// Roles allowed to move orders through the lifecycle
    pub const STAFF: &'static [Role] = &[Role::Admin, Role::SuperAdmin, Role::Delivery];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "CLIENT",
            Role::Admin => "ADMIN",
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Delivery => "DELIVERY",
            Role::Affiliate => "AFFILIATE",
        }
    }

    pub fn is_staff(&self) -> bool {
        Role::STAFF.contains(self)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Client
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CLIENT" => Ok(Role::Client),
            "ADMIN" => Ok(Role::Admin),
            "SUPER_ADMIN" => Ok(Role::SuperAdmin),
            "DELIVERY" => Ok(Role::Delivery),
            "AFFILIATE" => Ok(Role::Affiliate),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}
