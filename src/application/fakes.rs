//! In-memory test doubles for the repository and invoice-gateway ports.

use std::collections::HashMap;
use std::sync::Mutex;

use bigdecimal::BigDecimal;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::identity::{Claims, Role};
use crate::domain::order::{
    ListResult, ListScope, NewOrder, NewOrderItem, Numbering, OrderItemView, OrderView, PageMeta,
    PageRequest, PaymentConfirmation, ProductSnapshot, NUMBERING_MODULE_ORDER,
};
use crate::domain::ports::{
    CreateInvoiceRequest, Invoice, InvoiceGateway, OrderRepository, OrderUnitOfWork,
};
use crate::domain::status::OrderStatus;

pub fn product(name: &str, price: i64) -> ProductSnapshot {
    ProductSnapshot {
        id: Uuid::new_v4(),
        name: name.to_string(),
        price: BigDecimal::from(price),
        image_file_name: format!("{}.jpg", name.to_lowercase()),
    }
}

pub fn claims(role: Role) -> Claims {
    Claims {
        subject: Uuid::new_v4(),
        full_name: "Test User".to_string(),
        role,
    }
}

// ── Unit of work ─────────────────────────────────────────────────────────────

pub struct FakeUow {
    pub numbering: i64,
    pub products: Vec<ProductSnapshot>,
    pub inserted_orders: Vec<NewOrder>,
    pub inserted_items: Vec<NewOrderItem>,
    pub numbering_writes: Vec<i64>,
}

impl FakeUow {
    pub fn with_products(products: Vec<ProductSnapshot>) -> Self {
        FakeUow {
            numbering: 1,
            products,
            inserted_orders: Vec::new(),
            inserted_items: Vec::new(),
            numbering_writes: Vec::new(),
        }
    }
}

impl OrderUnitOfWork for FakeUow {
    fn numbering_for_update(&mut self, module: &str) -> Result<Numbering, DomainError> {
        if module != NUMBERING_MODULE_ORDER {
            return Err(DomainError::Internal(format!(
                "numbering row for module '{}' is not seeded",
                module
            )));
        }
        Ok(Numbering {
            module: module.to_string(),
            number: self.numbering,
        })
    }

    fn update_numbering(&mut self, numbering: &Numbering) -> Result<(), DomainError> {
        self.numbering_writes.push(numbering.number);
        Ok(())
    }

    fn products_by_ids(&mut self, ids: &[Uuid]) -> Result<Vec<ProductSnapshot>, DomainError> {
        Ok(self
            .products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    fn insert_order(&mut self, order: &NewOrder) -> Result<(), DomainError> {
        self.inserted_orders.push(order.clone());
        Ok(())
    }

    fn insert_order_items(&mut self, items: &[NewOrderItem]) -> Result<(), DomainError> {
        self.inserted_items.extend_from_slice(items);
        Ok(())
    }
}

// ── Invoice gateway ──────────────────────────────────────────────────────────

pub struct FakeGateway {
    pub calls: Mutex<Vec<CreateInvoiceRequest>>,
    fail: bool,
}

impl FakeGateway {
    pub fn new() -> Self {
        FakeGateway {
            calls: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        FakeGateway {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

impl InvoiceGateway for FakeGateway {
    fn create_invoice(&self, request: &CreateInvoiceRequest) -> Result<Invoice, DomainError> {
        if self.fail {
            return Err(DomainError::Internal(
                "invoice provider unavailable".to_string(),
            ));
        }
        self.calls.lock().unwrap().push(request.clone());
        Ok(Invoice {
            id: "inv_123".to_string(),
            url: "https://invoice.test/inv_123".to_string(),
        })
    }
}

// ── Repository ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeRepo {
    pub products: Vec<ProductSnapshot>,
    pub numbering: Mutex<i64>,
    pub orders: Mutex<HashMap<Uuid, OrderView>>,
    pub status_updates: Mutex<Vec<(Uuid, OrderStatus, String)>>,
    pub paid_updates: Mutex<Vec<(Uuid, PaymentConfirmation, String)>>,
}

impl FakeRepo {
    pub fn with_order(user_id: Uuid, status: OrderStatus) -> Self {
        let repo = FakeRepo {
            numbering: Mutex::new(1),
            ..FakeRepo::default()
        };
        repo.add_order(user_id, status);
        repo
    }

    pub fn add_order(&self, user_id: Uuid, status: OrderStatus) -> Uuid {
        let id = Uuid::new_v4();
        let now = Utc::now();
        self.orders.lock().unwrap().insert(
            id,
            OrderView {
                id,
                number: format!("ORD-{}", id.simple()),
                user_id,
                status,
                user_full_name: "Test User".to_string(),
                address: "1 Test Street".to_string(),
                phone_number: "+620000000".to_string(),
                notes: None,
                total: BigDecimal::from(25_000),
                expired_at: now + Duration::hours(24),
                created_at: now,
                xendit_invoice_url: "https://invoice.test/inv_123".to_string(),
                items: vec![],
            },
        );
        id
    }

    pub fn only_order_id(&self) -> Uuid {
        let orders = self.orders.lock().unwrap();
        assert_eq!(orders.len(), 1);
        *orders.keys().next().unwrap()
    }

    pub fn find_order_status(&self, id: Uuid) -> OrderStatus {
        self.orders.lock().unwrap()[&id].status
    }

    pub fn backdate_expiry(&self, id: Uuid, by: Duration) {
        let mut orders = self.orders.lock().unwrap();
        let order = orders.get_mut(&id).unwrap();
        order.expired_at -= by;
    }
}

impl OrderRepository for FakeRepo {
    fn create_in_transaction(
        &self,
        f: &mut dyn FnMut(&mut dyn OrderUnitOfWork) -> Result<Uuid, DomainError>,
    ) -> Result<Uuid, DomainError> {
        let mut uow = FakeUow::with_products(self.products.clone());
        uow.numbering = *self.numbering.lock().unwrap();

        let id = f(&mut uow)?;

        // Commit: apply the recorded writes to the shared state.
        let mut orders = self.orders.lock().unwrap();
        for order in uow.inserted_orders {
            let items = uow
                .inserted_items
                .iter()
                .filter(|i| i.order_id == order.id)
                .map(|i| OrderItemView {
                    product_id: i.product_id,
                    product_name: i.product_name.clone(),
                    product_price: i.product_price.clone(),
                    quantity: i.quantity,
                })
                .collect();
            orders.insert(
                order.id,
                OrderView {
                    id: order.id,
                    number: order.number,
                    user_id: order.user_id,
                    status: order.status,
                    user_full_name: order.user_full_name,
                    address: order.address,
                    phone_number: order.phone_number,
                    notes: order.notes,
                    total: order.total,
                    expired_at: order.expired_at,
                    created_at: order.created_at,
                    xendit_invoice_url: order.xendit_invoice_url,
                    items,
                },
            );
        }
        if let Some(last) = uow.numbering_writes.last() {
            *self.numbering.lock().unwrap() = *last;
        }

        Ok(id)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        Ok(self.orders.lock().unwrap().get(&id).cloned())
    }

    fn list(&self, scope: &ListScope, page: &PageRequest) -> Result<ListResult, DomainError> {
        let orders = self.orders.lock().unwrap();
        let mut items: Vec<OrderView> = orders
            .values()
            .filter(|o| match scope {
                ListScope::All => true,
                ListScope::Customer(user_id) => o.user_id == *user_id,
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = items.len() as i64;
        let start = ((page.page - 1) * page.limit).max(0) as usize;
        let items: Vec<OrderView> = items
            .into_iter()
            .skip(start)
            .take(page.limit as usize)
            .collect();

        Ok(ListResult {
            items,
            meta: PageMeta::new(page.page, page.limit, total),
        })
    }

    fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        updated_by: &str,
    ) -> Result<(), DomainError> {
        self.status_updates
            .lock()
            .unwrap()
            .push((id, status, updated_by.to_string()));
        if let Some(order) = self.orders.lock().unwrap().get_mut(&id) {
            order.status = status;
        }
        Ok(())
    }

    fn mark_paid(
        &self,
        id: Uuid,
        confirmation: &PaymentConfirmation,
        updated_by: &str,
    ) -> Result<(), DomainError> {
        self.paid_updates
            .lock()
            .unwrap()
            .push((id, confirmation.clone(), updated_by.to_string()));
        if let Some(order) = self.orders.lock().unwrap().get_mut(&id) {
            order.status = OrderStatus::Paid;
        }
        Ok(())
    }
}
