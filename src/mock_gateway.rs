//! In-memory `OrderGateway` used by unit tests.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::Utc;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::application::order_state::OperationKind;
use crate::domain::errors::OperationError;
use crate::domain::order::{
    DiscountUpdate, NewOrder, NewPayment, Order, OrderLine, OrderStatus, Payment, QuoteDocument,
};
use crate::domain::ports::OrderGateway;

pub fn sample_order(status: OrderStatus, line_count: usize) -> Order {
    let lines: Vec<OrderLine> = (0..line_count)
        .map(|i| OrderLine {
            product_name: format!("Product {}", i + 1),
            quantity: 1,
            unit_price: BigDecimal::from_str("10.00").expect("valid decimal"),
        })
        .collect();
    Order {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        total_amount: BigDecimal::from(10 * line_count as i64),
        status,
        customer_name: "Grace Hopper".to_string(),
        item_count: lines.len(),
        lines,
    }
}

#[derive(Default)]
pub struct MockGateway {
    orders: Mutex<Vec<Order>>,
    payments: Mutex<Vec<Payment>>,
    failures: Mutex<HashMap<OperationKind, String>>,
    gates: Mutex<HashMap<OperationKind, oneshot::Receiver<()>>>,
    calls: Mutex<Vec<OperationKind>>,
}

impl MockGateway {
    pub fn with_orders(orders: Vec<Order>) -> Self {
        let gateway = Self::default();
        *gateway.orders.lock().expect("lock") = orders;
        gateway
    }

    pub fn set_orders(&self, orders: Vec<Order>) {
        *self.orders.lock().expect("lock") = orders;
    }

    /// Every subsequent call of `kind` fails with `message`.
    pub fn fail(&self, kind: OperationKind, message: &str) {
        self.failures
            .lock()
            .expect("lock")
            .insert(kind, message.to_string());
    }

    pub fn recover(&self, kind: OperationKind) {
        self.failures.lock().expect("lock").remove(&kind);
    }

    /// Holds the next response of `kind` until the returned sender fires (or
    /// is dropped). Only `GetOrder` and `DeleteOrder` honour the gate.
    pub fn hold_next(&self, kind: OperationKind) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().expect("lock").insert(kind, rx);
        tx
    }

    async fn wait_gate(&self, kind: OperationKind) {
        let gate = self.gates.lock().expect("lock").remove(&kind);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }

    pub fn calls(&self) -> Vec<OperationKind> {
        self.calls.lock().expect("lock").clone()
    }

    fn enter(&self, kind: OperationKind) -> Result<(), OperationError> {
        self.calls.lock().expect("lock").push(kind);
        match self.failures.lock().expect("lock").get(&kind) {
            Some(message) => Err(OperationError::new(message.clone())),
            None => Ok(()),
        }
    }

    fn find(&self, id: Uuid) -> Result<Order, OperationError> {
        self.orders
            .lock()
            .expect("lock")
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| OperationError::new("Order not found"))
    }
}

#[async_trait]
impl OrderGateway for MockGateway {
    async fn create_order(&self, payload: NewOrder, _token: &str) -> Result<Order, OperationError> {
        self.enter(OperationKind::CreateOrder)?;
        let lines: Vec<OrderLine> = payload
            .lines
            .into_iter()
            .map(|l| OrderLine {
                product_name: l.product_name,
                quantity: l.quantity,
                unit_price: l.unit_price,
            })
            .collect();
        let total = lines
            .iter()
            .map(|l| &l.unit_price * BigDecimal::from(l.quantity))
            .fold(BigDecimal::from(0), |acc, x| acc + x);
        let order = Order {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            total_amount: total,
            status: OrderStatus::Pending,
            customer_name: payload.customer_name,
            item_count: lines.len(),
            lines,
        };
        self.orders.lock().expect("lock").push(order.clone());
        Ok(order)
    }

    async fn get_orders_by_user(&self, _token: &str) -> Result<Vec<Order>, OperationError> {
        self.enter(OperationKind::ListOrders)?;
        Ok(self.orders.lock().expect("lock").clone())
    }

    async fn get_order_by_id(&self, id: Uuid, _token: &str) -> Result<Order, OperationError> {
        self.wait_gate(OperationKind::GetOrder).await;
        self.enter(OperationKind::GetOrder)?;
        self.find(id)
    }

    async fn get_payments_by_order(
        &self,
        order_id: Uuid,
        _token: &str,
    ) -> Result<Vec<Payment>, OperationError> {
        self.enter(OperationKind::ListPayments)?;
        Ok(self
            .payments
            .lock()
            .expect("lock")
            .iter()
            .filter(|p| p.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn add_payment_to_order(
        &self,
        order_id: Uuid,
        payload: NewPayment,
        _token: &str,
    ) -> Result<Payment, OperationError> {
        self.enter(OperationKind::AddPayment)?;
        let payment = Payment {
            id: Uuid::new_v4(),
            order_id,
            amount: payload.amount,
            method: payload.method,
            created_at: Utc::now(),
        };
        self.payments.lock().expect("lock").push(payment.clone());
        Ok(payment)
    }

    async fn delete_payment(
        &self,
        _order_id: Uuid,
        payment_id: Uuid,
        _token: &str,
    ) -> Result<Uuid, OperationError> {
        self.enter(OperationKind::DeletePayment)?;
        self.payments
            .lock()
            .expect("lock")
            .retain(|p| p.id != payment_id);
        Ok(payment_id)
    }

    async fn update_order_discount(
        &self,
        order_id: Uuid,
        payload: DiscountUpdate,
        _token: &str,
    ) -> Result<Order, OperationError> {
        self.enter(OperationKind::UpdateDiscount)?;
        let mut orders = self.orders.lock().expect("lock");
        let order = orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| OperationError::new("Order not found"))?;
        order.total_amount = &order.total_amount - payload.discount;
        Ok(order.clone())
    }

    async fn download_quote(
        &self,
        order_id: Uuid,
        _token: &str,
    ) -> Result<QuoteDocument, OperationError> {
        self.enter(OperationKind::DownloadQuote)?;
        self.find(order_id)?;
        Ok(QuoteDocument {
            order_id,
            content_type: "application/pdf".to_string(),
            bytes: b"%PDF-1.4 quote".to_vec(),
        })
    }

    async fn delete_order(&self, order_id: Uuid, _token: &str) -> Result<Uuid, OperationError> {
        self.wait_gate(OperationKind::DeleteOrder).await;
        self.enter(OperationKind::DeleteOrder)?;
        self.orders.lock().expect("lock").retain(|o| o.id != order_id);
        Ok(order_id)
    }
}
