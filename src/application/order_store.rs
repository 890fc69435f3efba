use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

use crate::application::order_state::{OperationKind, OrderAction, OrderState, Outcome};
use crate::domain::errors::{OperationError, StoreError};
use crate::domain::order::{
    DiscountUpdate, NewOrder, NewPayment, Order, Payment, QuoteDocument,
};
use crate::domain::ports::OrderGateway;

/// Wraps an [`OrderGateway`] and records every call's lifecycle in a shared
/// [`OrderState`].
///
/// The state lock is only taken to apply a transition or to read, never
/// across an await, so several operations may be in flight at once. They
/// share one loading flag: whichever settles last decides its value.
pub struct OrderStore<G> {
    gateway: G,
    state: Mutex<OrderState>,
}

impl<G: OrderGateway> OrderStore<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: Mutex::new(OrderState::default()),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> OrderState {
        self.lock().clone()
    }

    pub fn read<T>(&self, f: impl FnOnce(&OrderState) -> T) -> T {
        f(&self.lock())
    }

    pub fn clear_orders(&self) {
        self.dispatch(OrderAction::ClearOrders);
    }

    pub fn clear_error(&self) {
        self.dispatch(OrderAction::ClearError);
    }

    pub async fn fetch_orders(&self, token: &str) -> Result<Vec<Order>, StoreError> {
        self.run(
            OperationKind::ListOrders,
            token,
            || self.gateway.get_orders_by_user(token),
            |orders: &Vec<Order>| Outcome::OrdersListed(orders.clone()),
        )
        .await
    }

    pub async fn fetch_order(&self, id: Uuid, token: &str) -> Result<Order, StoreError> {
        self.run(
            OperationKind::GetOrder,
            token,
            || self.gateway.get_order_by_id(id, token),
            |order: &Order| Outcome::OrderFetched(order.clone()),
        )
        .await
    }

    pub async fn create_order(&self, payload: NewOrder, token: &str) -> Result<Order, StoreError> {
        self.run(
            OperationKind::CreateOrder,
            token,
            || self.gateway.create_order(payload, token),
            |order: &Order| Outcome::OrderCreated(order.clone()),
        )
        .await
    }

    pub async fn fetch_payments(
        &self,
        order_id: Uuid,
        token: &str,
    ) -> Result<Vec<Payment>, StoreError> {
        self.run(
            OperationKind::ListPayments,
            token,
            || self.gateway.get_payments_by_order(order_id, token),
            |payments: &Vec<Payment>| Outcome::PaymentsListed(payments.clone()),
        )
        .await
    }

    pub async fn add_payment(
        &self,
        order_id: Uuid,
        payload: NewPayment,
        token: &str,
    ) -> Result<Payment, StoreError> {
        self.run(
            OperationKind::AddPayment,
            token,
            || self.gateway.add_payment_to_order(order_id, payload, token),
            |payment: &Payment| Outcome::PaymentAdded(payment.clone()),
        )
        .await
    }

    pub async fn delete_payment(
        &self,
        order_id: Uuid,
        payment_id: Uuid,
        token: &str,
    ) -> Result<Uuid, StoreError> {
        self.run(
            OperationKind::DeletePayment,
            token,
            || self.gateway.delete_payment(order_id, payment_id, token),
            |id: &Uuid| Outcome::PaymentDeleted(*id),
        )
        .await
    }

    pub async fn update_discount(
        &self,
        order_id: Uuid,
        payload: DiscountUpdate,
        token: &str,
    ) -> Result<Order, StoreError> {
        self.run(
            OperationKind::UpdateDiscount,
            token,
            || self.gateway.update_order_discount(order_id, payload, token),
            |order: &Order| Outcome::DiscountUpdated(order.clone()),
        )
        .await
    }

    pub async fn download_quote(
        &self,
        order_id: Uuid,
        token: &str,
    ) -> Result<QuoteDocument, StoreError> {
        self.run(
            OperationKind::DownloadQuote,
            token,
            || self.gateway.download_quote(order_id, token),
            |doc: &QuoteDocument| Outcome::QuoteDownloaded(doc.order_id),
        )
        .await
    }

    pub async fn delete_order(&self, order_id: Uuid, token: &str) -> Result<Uuid, StoreError> {
        self.run(
            OperationKind::DeleteOrder,
            token,
            || self.gateway.delete_order(order_id, token),
            |id: &Uuid| Outcome::OrderDeleted(*id),
        )
        .await
    }

    async fn run<T, F, Fut>(
        &self,
        kind: OperationKind,
        token: &str,
        call: F,
        settle: impl FnOnce(&T) -> Outcome,
    ) -> Result<T, StoreError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, OperationError>>,
    {
        if token.trim().is_empty() {
            log::warn!("{} not attempted: missing credential", kind);
            return Err(StoreError::MissingCredential);
        }

        log::debug!("{} pending", kind);
        self.dispatch(OrderAction::Pending(kind));

        match call().await {
            Ok(value) => {
                log::debug!("{} fulfilled", kind);
                self.dispatch(OrderAction::Fulfilled(settle(&value)));
                Ok(value)
            }
            Err(e) => {
                log::warn!("{} rejected: {}", kind, e);
                self.dispatch(OrderAction::Rejected {
                    kind,
                    message: e.message().to_string(),
                });
                Err(e.into())
            }
        }
    }

    fn dispatch(&self, action: OrderAction) {
        self.lock().apply(action);
    }

    fn lock(&self) -> MutexGuard<'_, OrderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
