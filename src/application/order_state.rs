//! The state container behind the invoice screen and its transition function.
//!
//! All order operations share one `loading`/`error` pair. A transition is
//! applied through [`OrderState::apply`], which is pure and synchronous; the
//! async side lives in [`crate::application::order_store`].

use std::collections::HashMap;
use std::fmt;

use uuid::Uuid;

use crate::domain::order::{Order, Payment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    ListOrders,
    GetOrder,
    CreateOrder,
    ListPayments,
    AddPayment,
    DeletePayment,
    UpdateDiscount,
    DownloadQuote,
    DeleteOrder,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::ListOrders => "list_orders",
            OperationKind::GetOrder => "get_order",
            OperationKind::CreateOrder => "create_order",
            OperationKind::ListPayments => "list_payments",
            OperationKind::AddPayment => "add_payment",
            OperationKind::DeletePayment => "delete_payment",
            OperationKind::UpdateDiscount => "update_discount",
            OperationKind::DownloadQuote => "download_quote",
            OperationKind::DeleteOrder => "delete_order",
        };
        f.write_str(name)
    }
}

/// Successful settlement of an operation, carrying what the store keeps.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    OrdersListed(Vec<Order>),
    OrderFetched(Order),
    OrderCreated(Order),
    PaymentsListed(Vec<Payment>),
    PaymentAdded(Payment),
    PaymentDeleted(Uuid),
    DiscountUpdated(Order),
    /// The document itself is handed to the caller, never stored.
    QuoteDownloaded(Uuid),
    OrderDeleted(Uuid),
}

impl Outcome {
    pub fn kind(&self) -> OperationKind {
        match self {
            Outcome::OrdersListed(_) => OperationKind::ListOrders,
            Outcome::OrderFetched(_) => OperationKind::GetOrder,
            Outcome::OrderCreated(_) => OperationKind::CreateOrder,
            Outcome::PaymentsListed(_) => OperationKind::ListPayments,
            Outcome::PaymentAdded(_) => OperationKind::AddPayment,
            Outcome::PaymentDeleted(_) => OperationKind::DeletePayment,
            Outcome::DiscountUpdated(_) => OperationKind::UpdateDiscount,
            Outcome::QuoteDownloaded(_) => OperationKind::DownloadQuote,
            Outcome::OrderDeleted(_) => OperationKind::DeleteOrder,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    Pending(OperationKind),
    Fulfilled(Outcome),
    Rejected { kind: OperationKind, message: String },
    ClearOrders,
    ClearError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderState {
    orders: Vec<Order>,
    current_order: Option<Order>,
    payments: Vec<Payment>,
    loading: bool,
    error: Option<String>,
    in_flight: HashMap<OperationKind, usize>,
}

impl OrderState {
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn current_order(&self) -> Option<&Order> {
        self.current_order.as_ref()
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether an operation of `kind` has been dispatched and not yet
    /// settled. Tracked per kind, unlike the shared loading flag.
    pub fn is_in_flight(&self, kind: OperationKind) -> bool {
        self.in_flight.get(&kind).is_some_and(|n| *n > 0)
    }

    pub fn find_order(&self, id: Uuid) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn apply(&mut self, action: OrderAction) {
        match action {
            OrderAction::Pending(kind) => {
                self.loading = true;
                self.error = None;
                *self.in_flight.entry(kind).or_insert(0) += 1;
            }
            OrderAction::Fulfilled(outcome) => {
                self.loading = false;
                self.settle(outcome.kind());
                self.fulfil(outcome);
            }
            OrderAction::Rejected { kind, message } => {
                self.loading = false;
                self.settle(kind);
                self.error = Some(message);
            }
            OrderAction::ClearOrders => {
                self.orders.clear();
                self.current_order = None;
            }
            OrderAction::ClearError => self.error = None,
        }
    }

    fn settle(&mut self, kind: OperationKind) {
        if let Some(count) = self.in_flight.get_mut(&kind) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.in_flight.remove(&kind);
            }
        }
    }

    fn fulfil(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::OrdersListed(orders) => self.orders = orders,
            Outcome::OrderFetched(order) => self.current_order = Some(order),
            Outcome::OrderCreated(order) => self.orders.push(order),
            Outcome::PaymentsListed(payments) => self.payments = payments,
            Outcome::PaymentAdded(payment) => self.payments.push(payment),
            Outcome::PaymentDeleted(id) => self.payments.retain(|p| p.id != id),
            Outcome::DiscountUpdated(order) => {
                if let Some(current) = self.current_order.as_mut().filter(|c| c.id == order.id) {
                    *current = order.clone();
                }
                if let Some(slot) = self.orders.iter_mut().find(|o| o.id == order.id) {
                    *slot = order;
                }
            }
            Outcome::QuoteDownloaded(_) => {}
            Outcome::OrderDeleted(id) => {
                self.orders.retain(|o| o.id != id);
                self.current_order = None;
            }
        }
    }
}
