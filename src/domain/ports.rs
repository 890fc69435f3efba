use async_trait::async_trait;
use uuid::Uuid;

use super::errors::OperationError;
use super::order::{DiscountUpdate, NewOrder, NewPayment, Order, Payment, QuoteDocument};

/// The backend order service. Every call carries an opaque bearer token.
#[async_trait]
pub trait OrderGateway: Send + Sync + 'static {
    async fn create_order(&self, payload: NewOrder, token: &str) -> Result<Order, OperationError>;
    async fn get_orders_by_user(&self, token: &str) -> Result<Vec<Order>, OperationError>;
    async fn get_order_by_id(&self, id: Uuid, token: &str) -> Result<Order, OperationError>;
    async fn get_payments_by_order(
        &self,
        order_id: Uuid,
        token: &str,
    ) -> Result<Vec<Payment>, OperationError>;
    async fn add_payment_to_order(
        &self,
        order_id: Uuid,
        payload: NewPayment,
        token: &str,
    ) -> Result<Payment, OperationError>;
    /// Returns the id of the removed payment.
    async fn delete_payment(
        &self,
        order_id: Uuid,
        payment_id: Uuid,
        token: &str,
    ) -> Result<Uuid, OperationError>;
    async fn update_order_discount(
        &self,
        order_id: Uuid,
        payload: DiscountUpdate,
        token: &str,
    ) -> Result<Order, OperationError>;
    async fn download_quote(
        &self,
        order_id: Uuid,
        token: &str,
    ) -> Result<QuoteDocument, OperationError>;
    /// Returns the id of the removed order.
    async fn delete_order(&self, order_id: Uuid, token: &str) -> Result<Uuid, OperationError>;
}
