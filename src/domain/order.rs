use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::status::OrderStatus;

/// Numbering sequence domain for orders.
pub const NUMBERING_MODULE_ORDER: &str = "order";

/// One row per sequence domain, read under `FOR UPDATE` and incremented in
/// the same transaction that consumes the number.
#[derive(Debug, Clone)]
pub struct Numbering {
    pub module: String,
    pub number: i64,
}

/// Human-facing order number, e.g. `ORD-202600000042`.
pub fn format_order_number(year: i32, sequence: i64) -> String {
    format!("ORD-{}{:08}", year, sequence)
}

/// Catalog state captured at order time.
#[derive(Debug, Clone)]
pub struct ProductSnapshot {
    pub id: Uuid,
    pub name: String,
    pub price: BigDecimal,
    pub image_file_name: String,
}

#[derive(Debug, Clone)]
pub struct OrderLineRequest {
    pub product_id: Uuid,
    pub quantity: i64,
}

#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub full_name: String,
    pub address: String,
    pub phone_number: String,
    pub notes: Option<String>,
    pub products: Vec<OrderLineRequest>,
}

/// Fully-built order aggregate root, ready to persist.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub id: Uuid,
    pub number: String,
    pub user_id: Uuid,
    pub status: OrderStatus,
    pub user_full_name: String,
    pub address: String,
    pub phone_number: String,
    pub notes: Option<String>,
    pub total: BigDecimal,
    pub expired_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub xendit_invoice_id: String,
    pub xendit_invoice_url: String,
}

#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub product_image_file_name: String,
    pub product_price: BigDecimal,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

#[derive(Debug, Clone)]
pub struct OrderItemView {
    pub product_id: Uuid,
    pub product_name: String,
    pub product_price: BigDecimal,
    pub quantity: i64,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub number: String,
    pub user_id: Uuid,
    pub status: OrderStatus,
    pub user_full_name: String,
    pub address: String,
    pub phone_number: String,
    pub notes: Option<String>,
    pub total: BigDecimal,
    pub expired_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub xendit_invoice_url: String,
    pub items: Vec<OrderItemView>,
}

#[derive(Debug, Clone)]
pub struct PaymentConfirmation {
    pub payment_method: String,
    pub payment_channel: String,
    pub paid_at: DateTime<Utc>,
}

// ── Listing ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Number,
    Customer,
    Total,
    CreatedAt,
}

impl SortField {
    /// Whitelisted sort fields; anything else falls back to the default
    /// ordering (newest first).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "number" => Some(SortField::Number),
            "customer" => Some(SortField::Customer),
            "total" => Some(SortField::Total),
            "created_at" => Some(SortField::CreatedAt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
    pub sort: Option<(SortField, SortDirection)>,
}

/// Whose orders a list query covers.
#[derive(Debug, Clone)]
pub enum ListScope {
    All,
    Customer(Uuid),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub current_page: i64,
    pub item_per_page: i64,
    pub total_item_count: i64,
    pub total_page_count: i64,
}

impl PageMeta {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        PageMeta {
            current_page: page,
            item_per_page: limit,
            total_item_count: total,
            total_page_count: (total + limit - 1) / limit,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListResult {
    pub items: Vec<OrderView>,
    pub meta: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_number_is_year_plus_padded_sequence() {
        assert_eq!(format_order_number(2026, 42), "ORD-202600000042");
        assert_eq!(format_order_number(2026, 1), "ORD-202600000001");
    }

    #[test]
    fn page_meta_rounds_page_count_up() {
        assert_eq!(PageMeta::new(1, 10, 0).total_page_count, 0);
        assert_eq!(PageMeta::new(1, 10, 10).total_page_count, 1);
        assert_eq!(PageMeta::new(1, 10, 11).total_page_count, 2);
    }

    #[test]
    fn sort_field_whitelist() {
        assert_eq!(SortField::parse("number"), Some(SortField::Number));
        assert_eq!(SortField::parse("customer"), Some(SortField::Customer));
        assert_eq!(SortField::parse("user_id; DROP TABLE orders"), None);
    }
}
