use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::domain::errors::OperationError;
use crate::domain::order::{DiscountUpdate, NewOrder, NewPayment, Order, Payment, QuoteDocument};
use crate::domain::ports::OrderGateway;

use super::models::{
    DeletedDto, DiscountDto, ErrorBody, NewOrderDto, NewPaymentDto, OrderDto, PaymentDto,
};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<reqwest::Error> for OperationError {
    fn from(e: reqwest::Error) -> Self {
        OperationError::new(e.to_string())
    }
}

// ── Gateway ───────────────────────────────────────────────────────────────────

/// REST client for the order service, authenticated with a bearer token.
pub struct HttpOrderGateway {
    client: Client,
    base_url: String,
}

impl HttpOrderGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, OperationError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder, token: &str) -> Result<Response, OperationError> {
        let response = request.bearer_auth(token).send().await?;
        if response.status().is_success() {
            return Ok(response);
        }
        Err(error_from_response(response).await)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: &str,
    ) -> Result<T, OperationError> {
        let response = self.send(request, token).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Uses the body's `message` (or `error`) field when the service sends one,
/// the HTTP status line otherwise.
async fn error_from_response(response: Response) -> OperationError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| status.to_string());
    log::debug!("order service answered {}: {}", status, message);
    OperationError::new(message)
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
    async fn create_order(&self, payload: NewOrder, token: &str) -> Result<Order, OperationError> {
        let request = self
            .client
            .post(self.url("/orders"))
            .json(&NewOrderDto::from(payload));
        let dto: OrderDto = self.send_json(request, token).await?;
        Ok(dto.into())
    }

    async fn get_orders_by_user(&self, token: &str) -> Result<Vec<Order>, OperationError> {
        let request = self.client.get(self.url("/orders/user"));
        let dtos: Vec<OrderDto> = self.send_json(request, token).await?;
        Ok(dtos.into_iter().map(Order::from).collect())
    }

    async fn get_order_by_id(&self, id: Uuid, token: &str) -> Result<Order, OperationError> {
        let request = self.client.get(self.url(&format!("/orders/{}", id)));
        let dto: OrderDto = self.send_json(request, token).await?;
        Ok(dto.into())
    }

    async fn get_payments_by_order(
        &self,
        order_id: Uuid,
        token: &str,
    ) -> Result<Vec<Payment>, OperationError> {
        let request = self
            .client
            .get(self.url(&format!("/orders/{}/payments", order_id)));
        let dtos: Vec<PaymentDto> = self.send_json(request, token).await?;
        Ok(dtos.into_iter().map(Payment::from).collect())
    }

    async fn add_payment_to_order(
        &self,
        order_id: Uuid,
        payload: NewPayment,
        token: &str,
    ) -> Result<Payment, OperationError> {
        let request = self
            .client
            .post(self.url(&format!("/orders/{}/payments", order_id)))
            .json(&NewPaymentDto::from(payload));
        let dto: PaymentDto = self.send_json(request, token).await?;
        Ok(dto.into())
    }

    async fn delete_payment(
        &self,
        order_id: Uuid,
        payment_id: Uuid,
        token: &str,
    ) -> Result<Uuid, OperationError> {
        let request = self.client.delete(self.url(&format!(
            "/orders/{}/payments/{}",
            order_id, payment_id
        )));
        let deleted: DeletedDto = self.send_json(request, token).await?;
        Ok(deleted.id)
    }

    async fn update_order_discount(
        &self,
        order_id: Uuid,
        payload: DiscountUpdate,
        token: &str,
    ) -> Result<Order, OperationError> {
        let request = self
            .client
            .patch(self.url(&format!("/orders/{}/discount", order_id)))
            .json(&DiscountDto::from(payload));
        let dto: OrderDto = self.send_json(request, token).await?;
        Ok(dto.into())
    }

    async fn download_quote(
        &self,
        order_id: Uuid,
        token: &str,
    ) -> Result<QuoteDocument, OperationError> {
        let request = self
            .client
            .get(self.url(&format!("/orders/{}/quote", order_id)));
        let response = self.send(request, token).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/pdf")
            .to_string();
        let bytes = response.bytes().await?;
        Ok(QuoteDocument {
            order_id,
            content_type,
            bytes: bytes.to_vec(),
        })
    }

    async fn delete_order(&self, order_id: Uuid, token: &str) -> Result<Uuid, OperationError> {
        let request = self
            .client
            .delete(self.url(&format!("/orders/{}", order_id)));
        let deleted: DeletedDto = self.send_json(request, token).await?;
        Ok(deleted.id)
    }
}
