use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Datelike, Duration, Utc};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::identity::Claims;
use crate::domain::order::{
    format_order_number, CreateOrderCommand, ListResult, ListScope, NewOrder, NewOrderItem,
    OrderView, PageRequest, NUMBERING_MODULE_ORDER,
};
use crate::domain::ports::{
    CreateInvoiceRequest, InvoiceGateway, InvoiceItem, OrderRepository, OrderUnitOfWork,
};
use crate::domain::status::{effective_status, validate_transition, OrderStatus};

/// Invoice currency used by the payment provider.
const INVOICE_CURRENCY: &str = "IDR";

/// Payment window granted to a fresh order.
const PAYMENT_WINDOW_HOURS: i64 = 24;

/// Order workflow service: creation, listing, detail and status transitions.
pub struct OrderService<R> {
    repo: R,
    gateway: Arc<dyn InvoiceGateway>,
    frontend_base_url: String,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R, gateway: Arc<dyn InvoiceGateway>, frontend_base_url: String) -> Self {
        Self {
            repo,
            gateway,
            frontend_base_url,
        }
    }

    /// Create an order atomically: numbering allocation, price snapshots,
    /// invoice creation and persistence either all happen or none do.
    pub fn create_order(
        &self,
        claims: &Claims,
        command: &CreateOrderCommand,
    ) -> Result<Uuid, DomainError> {
        let now = Utc::now();
        self.repo.create_in_transaction(&mut |uow| {
            place_order(
                uow,
                self.gateway.as_ref(),
                claims,
                command,
                &self.frontend_base_url,
                now,
            )
        })
    }

    /// Paginated order list: admins see every order, customers their own.
    pub fn list_orders(
        &self,
        claims: &Claims,
        page: &PageRequest,
    ) -> Result<ListResult, DomainError> {
        let scope = if claims.role.is_admin() {
            ListScope::All
        } else {
            ListScope::Customer(claims.subject)
        };

        let mut result = self.repo.list(&scope, page)?;

        let now = Utc::now();
        for order in &mut result.items {
            order.status = effective_status(order.status, order.expired_at, now);
        }

        Ok(result)
    }

    pub fn get_order_detail(&self, claims: &Claims, id: Uuid) -> Result<OrderView, DomainError> {
        let mut order = self
            .repo
            .find_by_id(id)?
            .ok_or_else(|| DomainError::NotFound("Order not found".to_string()))?;

        if !claims.role.is_admin() && order.user_id != claims.subject {
            return Err(DomainError::Rejected("User id is not matched".to_string()));
        }

        order.status = effective_status(order.status, order.expired_at, Utc::now());
        Ok(order)
    }

    /// Apply a status transition after ownership and transition-table checks.
    /// The check runs against the stored code, so an order displaying as
    /// expired can still be paid or canceled.
    pub fn update_order_status(
        &self,
        claims: &Claims,
        id: Uuid,
        new_status: OrderStatus,
    ) -> Result<(), DomainError> {
        let order = self
            .repo
            .find_by_id(id)?
            .ok_or_else(|| DomainError::NotFound("Order not found".to_string()))?;

        if !claims.role.is_admin() && order.user_id != claims.subject {
            return Err(DomainError::Rejected("User id is not matched".to_string()));
        }

        validate_transition(order.status, new_status, claims.role)?;

        self.repo
            .update_status(id, new_status, &claims.subject.to_string())
    }
}

/// The order-creation sequence, run inside the repository transaction.
///
/// Step order matters: the numbering row lock is taken first and held until
/// commit, which serializes concurrent creations and guarantees committed
/// order numbers never collide. The invoice call happens inside the same
/// scope, so a created invoice for a rolled-back order is possible (an
/// accepted at-least-once side effect), but a committed order without an
/// invoice is not.
pub fn place_order(
    uow: &mut dyn OrderUnitOfWork,
    gateway: &dyn InvoiceGateway,
    claims: &Claims,
    command: &CreateOrderCommand,
    frontend_base_url: &str,
    now: DateTime<Utc>,
) -> Result<Uuid, DomainError> {
    if command.products.is_empty() {
        return Err(DomainError::Rejected(
            "Order must contain at least one product".to_string(),
        ));
    }
    for line in &command.products {
        if line.quantity <= 0 {
            return Err(DomainError::Rejected(format!(
                "Quantity for product {} must be positive",
                line.product_id
            )));
        }
    }

    let mut numbering = uow.numbering_for_update(NUMBERING_MODULE_ORDER)?;

    let mut product_ids: Vec<Uuid> = Vec::new();
    for line in &command.products {
        if !product_ids.contains(&line.product_id) {
            product_ids.push(line.product_id);
        }
    }

    let snapshots = uow.products_by_ids(&product_ids)?;
    let snapshot_map: std::collections::HashMap<Uuid, _> =
        snapshots.into_iter().map(|p| (p.id, p)).collect();

    // The submitted quantities price the order; submitted prices never do.
    let mut total = BigDecimal::from(0);
    for line in &command.products {
        let snapshot = snapshot_map.get(&line.product_id).ok_or_else(|| {
            DomainError::Rejected(format!("Product {} not found", line.product_id))
        })?;
        total += snapshot.price.clone() * BigDecimal::from(line.quantity);
    }

    let order_id = Uuid::new_v4();
    let number = format_order_number(now.year(), numbering.number);

    let invoice_items: Vec<InvoiceItem> = command
        .products
        .iter()
        .map(|line| {
            let snapshot = &snapshot_map[&line.product_id];
            InvoiceItem {
                name: snapshot.name.clone(),
                price: snapshot.price.clone(),
                quantity: line.quantity,
            }
        })
        .collect();

    let invoice = gateway.create_invoice(&CreateInvoiceRequest {
        external_id: order_id.to_string(),
        amount: total.clone(),
        currency: INVOICE_CURRENCY.to_string(),
        customer_name: claims.full_name.clone(),
        success_redirect_url: format!(
            "{}/checkout/{}/success",
            frontend_base_url, order_id
        ),
        items: invoice_items,
    })?;

    let order = NewOrder {
        id: order_id,
        number,
        user_id: claims.subject,
        status: OrderStatus::Unpaid,
        user_full_name: command.full_name.clone(),
        address: command.address.clone(),
        phone_number: command.phone_number.clone(),
        notes: command.notes.clone(),
        total,
        expired_at: now + Duration::hours(PAYMENT_WINDOW_HOURS),
        created_at: now,
        created_by: claims.full_name.clone(),
        xendit_invoice_id: invoice.id,
        xendit_invoice_url: invoice.url,
    };
    uow.insert_order(&order)?;

    let items: Vec<NewOrderItem> = command
        .products
        .iter()
        .map(|line| {
            let snapshot = &snapshot_map[&line.product_id];
            NewOrderItem {
                id: Uuid::new_v4(),
                order_id,
                product_id: line.product_id,
                product_name: snapshot.name.clone(),
                product_image_file_name: snapshot.image_file_name.clone(),
                product_price: snapshot.price.clone(),
                quantity: line.quantity,
                created_at: now,
                created_by: claims.full_name.clone(),
            }
        })
        .collect();
    uow.insert_order_items(&items)?;

    numbering.number += 1;
    uow.update_numbering(&numbering)?;

    Ok(order_id)
}
