use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::errors::DomainError;
use super::order::{
    ListResult, ListScope, NewOrder, NewOrderItem, Numbering, OrderView, PageRequest,
    PaymentConfirmation, ProductSnapshot,
};
use super::status::OrderStatus;

/// Operations available inside a single order-creation transaction.
///
/// The Diesel implementation backs every call with the same connection, so a
/// rollback discards all of them together. Test doubles back it with plain
/// collections.
pub trait OrderUnitOfWork {
    /// Locking read (`SELECT ... FOR UPDATE`) of the numbering row, so
    /// concurrent allocations for the same module serialize. A missing row
    /// is a seeding fault, surfaced as an internal error.
    fn numbering_for_update(&mut self, module: &str) -> Result<Numbering, DomainError>;

    fn update_numbering(&mut self, numbering: &Numbering) -> Result<(), DomainError>;

    /// Current catalog snapshots for the requested ids; absent ids are
    /// simply missing from the result.
    fn products_by_ids(&mut self, ids: &[Uuid]) -> Result<Vec<ProductSnapshot>, DomainError>;

    fn insert_order(&mut self, order: &NewOrder) -> Result<(), DomainError>;

    fn insert_order_items(&mut self, items: &[NewOrderItem]) -> Result<(), DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Run `f` inside a transaction: commit on `Ok`, roll back on `Err`,
    /// roll back and resume unwinding on panic.
    fn create_in_transaction(
        &self,
        f: &mut dyn FnMut(&mut dyn OrderUnitOfWork) -> Result<Uuid, DomainError>,
    ) -> Result<Uuid, DomainError>;

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError>;

    fn list(&self, scope: &ListScope, page: &PageRequest) -> Result<ListResult, DomainError>;

    fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        updated_by: &str,
    ) -> Result<(), DomainError>;

    fn mark_paid(
        &self,
        id: Uuid,
        confirmation: &PaymentConfirmation,
        updated_by: &str,
    ) -> Result<(), DomainError>;
}

// ── Payment invoice gateway ──────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct InvoiceItem {
    pub name: String,
    pub price: BigDecimal,
    pub quantity: i64,
}

#[derive(Debug, Clone)]
pub struct CreateInvoiceRequest {
    pub external_id: String,
    pub amount: BigDecimal,
    pub currency: String,
    pub customer_name: String,
    pub success_redirect_url: String,
    pub items: Vec<InvoiceItem>,
}

#[derive(Debug, Clone)]
pub struct Invoice {
    pub id: String,
    pub url: String,
}

/// Hosted-payment-page provider. Called inside the order transaction, so a
/// failure here aborts the whole creation.
pub trait InvoiceGateway: Send + Sync + 'static {
    fn create_invoice(&self, request: &CreateInvoiceRequest) -> Result<Invoice, DomainError>;
}
