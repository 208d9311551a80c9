use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::errors::DomainError;
use super::identity::Role;

/// Order lifecycle status as stored in `orders.order_status_code`.
///
/// `Expired` is display-only: it is derived from an `Unpaid` order whose
/// payment window has elapsed and is never written back to the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Unpaid,
    Paid,
    Shipped,
    Done,
    Expired,
    Canceled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Unpaid => "unpaid",
            OrderStatus::Paid => "paid",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Done => "done",
            OrderStatus::Expired => "expired",
            OrderStatus::Canceled => "canceled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(OrderStatus::Unpaid),
            "paid" => Ok(OrderStatus::Paid),
            "shipped" => Ok(OrderStatus::Shipped),
            "done" => Ok(OrderStatus::Done),
            "expired" => Ok(OrderStatus::Expired),
            "canceled" => Ok(OrderStatus::Canceled),
            _ => Err(DomainError::Rejected(format!(
                "Invalid status code '{}'",
                s
            ))),
        }
    }
}

struct TransitionRule {
    from: OrderStatus,
    to: OrderStatus,
    admin_only: bool,
}

/// The complete set of legal transitions. Everything absent from this table
/// is a business-rule rejection, including any transition into `Expired`.
const TRANSITION_RULES: &[TransitionRule] = &[
    TransitionRule {
        from: OrderStatus::Unpaid,
        to: OrderStatus::Paid,
        admin_only: true,
    },
    TransitionRule {
        from: OrderStatus::Unpaid,
        to: OrderStatus::Canceled,
        admin_only: false,
    },
    TransitionRule {
        from: OrderStatus::Paid,
        to: OrderStatus::Shipped,
        admin_only: true,
    },
    TransitionRule {
        from: OrderStatus::Shipped,
        to: OrderStatus::Done,
        admin_only: false,
    },
];

/// Validate a status transition request against the transition table.
///
/// `from` is the stored status code, not the derived display status: an
/// order showing as expired is still stored `unpaid` and may be paid or
/// canceled.
pub fn validate_transition(
    from: OrderStatus,
    to: OrderStatus,
    role: Role,
) -> Result<(), DomainError> {
    let rule = TRANSITION_RULES
        .iter()
        .find(|r| r.from == from && r.to == to)
        .ok_or_else(|| {
            DomainError::Rejected(format!(
                "Status change from '{}' to '{}' is not allowed",
                from, to
            ))
        })?;

    if rule.admin_only && !role.is_admin() {
        return Err(DomainError::Rejected(format!(
            "Status change to '{}' requires an admin",
            to
        )));
    }

    Ok(())
}

/// Display status for a stored order: an unpaid order past its payment
/// deadline reads as expired. Pure derivation, never persisted.
pub fn effective_status(
    stored: OrderStatus,
    expired_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> OrderStatus {
    if stored == OrderStatus::Unpaid && now > expired_at {
        OrderStatus::Expired
    } else {
        stored
    }
}
