use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use super::errors::DomainError;

/// Actor attribution used for webhook-driven updates.
pub const SYSTEM_ACTOR: &str = "System";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "customer" => Ok(Role::Customer),
            _ => Err(DomainError::Unauthenticated),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Customer => write!(f, "customer"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Identity resolved by the upstream authentication layer.
#[derive(Debug, Clone)]
pub struct Claims {
    pub subject: Uuid,
    pub full_name: String,
    pub role: Role,
}
