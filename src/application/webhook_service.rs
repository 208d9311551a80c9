use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::identity::SYSTEM_ACTOR;
use crate::domain::order::PaymentConfirmation;
use crate::domain::ports::OrderRepository;
use crate::domain::status::OrderStatus;

/// Statuses the payment provider reports for a settled invoice.
const PAID_INVOICE_STATUSES: &[&str] = &["PAID", "SETTLED"];

#[derive(Debug, Clone)]
pub struct InvoiceNotification {
    /// The external id handed to the provider at invoice creation, i.e. the
    /// order UUID.
    pub external_id: Uuid,
    pub status: String,
    pub payment_method: String,
    pub payment_channel: String,
}

/// Applies asynchronous payment-provider notifications to orders.
pub struct WebhookService<R> {
    repo: R,
}

impl<R: OrderRepository> WebhookService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Reconcile a provider invoice callback with the referenced order.
    ///
    /// Idempotent: only an order still stored as `unpaid` is moved to
    /// `paid`. Any later status (paid, shipped, done, canceled) is left
    /// untouched so a stale provider retry can never regress a legitimate
    /// transition.
    pub fn receive_invoice(&self, notification: &InvoiceNotification) -> Result<(), DomainError> {
        if !PAID_INVOICE_STATUSES.contains(&notification.status.as_str()) {
            log::debug!(
                "Ignoring invoice notification with status '{}' for order {}",
                notification.status,
                notification.external_id
            );
            return Ok(());
        }

        let order = self
            .repo
            .find_by_id(notification.external_id)?
            .ok_or_else(|| DomainError::NotFound("Order not found".to_string()))?;

        if order.status != OrderStatus::Unpaid {
            log::debug!(
                "Order {} already '{}', skipping paid notification",
                order.id,
                order.status
            );
            return Ok(());
        }

        self.repo.mark_paid(
            order.id,
            &PaymentConfirmation {
                payment_method: notification.payment_method.clone(),
                payment_channel: notification.payment_channel.clone(),
                paid_at: Utc::now(),
            },
            SYSTEM_ACTOR,
        )
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::{InvoiceNotification, WebhookService};
    use crate::application::fakes::{claims, FakeRepo};
    use crate::domain::errors::DomainError;
    use crate::domain::identity::Role;
    use crate::domain::status::OrderStatus;

    fn notification(external_id: Uuid) -> InvoiceNotification {
        InvoiceNotification {
            external_id,
            status: "PAID".to_string(),
            payment_method: "EWALLET".to_string(),
            payment_channel: "OVO".to_string(),
        }
    }

    #[test]
    fn unknown_order_is_not_found_and_writes_nothing() {
        let svc = WebhookService::new(FakeRepo::default());

        let err = svc.receive_invoice(&notification(Uuid::new_v4())).unwrap_err();

        assert!(matches!(err, DomainError::NotFound(_)));
        assert!(svc.repo.paid_updates.lock().unwrap().is_empty());
    }

    #[test]
    fn unpaid_order_is_marked_paid_by_the_system_actor() {
        let owner = claims(Role::Customer);
        let repo = FakeRepo::with_order(owner.subject, OrderStatus::Unpaid);
        let order_id = repo.only_order_id();
        let svc = WebhookService::new(repo);

        svc.receive_invoice(&notification(order_id)).unwrap();

        let updates = svc.repo.paid_updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, order_id);
        assert_eq!(updates[0].1.payment_method, "EWALLET");
        assert_eq!(updates[0].1.payment_channel, "OVO");
        assert_eq!(updates[0].2, "System");
    }

    #[test]
    fn repeated_notification_is_a_noop_once_paid() {
        let owner = claims(Role::Customer);
        let repo = FakeRepo::with_order(owner.subject, OrderStatus::Unpaid);
        let order_id = repo.only_order_id();
        let svc = WebhookService::new(repo);

        svc.receive_invoice(&notification(order_id)).unwrap();
        svc.receive_invoice(&notification(order_id)).unwrap();

        assert_eq!(svc.repo.paid_updates.lock().unwrap().len(), 1);
    }

    #[test]
    fn stale_notification_never_regresses_a_shipped_order() {
        let owner = claims(Role::Customer);
        let repo = FakeRepo::with_order(owner.subject, OrderStatus::Shipped);
        let order_id = repo.only_order_id();
        let svc = WebhookService::new(repo);

        svc.receive_invoice(&notification(order_id)).unwrap();

        assert!(svc.repo.paid_updates.lock().unwrap().is_empty());
        let order = svc.repo.find_order_status(order_id);
        assert_eq!(order, OrderStatus::Shipped);
    }

    #[test]
    fn non_paid_statuses_are_acknowledged_and_ignored() {
        let owner = claims(Role::Customer);
        let repo = FakeRepo::with_order(owner.subject, OrderStatus::Unpaid);
        let order_id = repo.only_order_id();
        let svc = WebhookService::new(repo);

        let mut n = notification(order_id);
        n.status = "EXPIRED".to_string();
        svc.receive_invoice(&n).unwrap();

        assert!(svc.repo.paid_updates.lock().unwrap().is_empty());
    }
}
