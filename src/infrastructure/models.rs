use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::order::{
    DiscountUpdate, NewOrder, NewPayment, Order, OrderLine, OrderStatus, Payment,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineDto {
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: BigDecimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub total_amount: BigDecimal,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub item_count: Option<usize>,
    #[serde(default)]
    pub items: Vec<OrderLineDto>,
}

impl From<OrderDto> for Order {
    fn from(dto: OrderDto) -> Self {
        let lines: Vec<OrderLine> = dto
            .items
            .into_iter()
            .map(|l| OrderLine {
                product_name: l.product_name,
                quantity: l.quantity,
                unit_price: l.unit_price,
            })
            .collect();
        Order {
            id: dto.id,
            created_at: dto.created_at,
            total_amount: dto.total_amount,
            status: OrderStatus::normalize(dto.status.as_deref()),
            customer_name: dto.customer_name,
            item_count: dto.item_count.unwrap_or(lines.len()),
            lines,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    pub id: Uuid,
    pub order_id: Uuid,
    pub amount: BigDecimal,
    pub method: String,
    pub created_at: DateTime<Utc>,
}

impl From<PaymentDto> for Payment {
    fn from(dto: PaymentDto) -> Self {
        Payment {
            id: dto.id,
            order_id: dto.order_id,
            amount: dto.amount,
            method: dto.method,
            created_at: dto.created_at,
        }
    }
}

// ── Request bodies ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderDto {
    pub customer_name: String,
    pub items: Vec<OrderLineDto>,
}

impl From<NewOrder> for NewOrderDto {
    fn from(payload: NewOrder) -> Self {
        NewOrderDto {
            customer_name: payload.customer_name,
            items: payload
                .lines
                .into_iter()
                .map(|l| OrderLineDto {
                    product_name: l.product_name,
                    quantity: l.quantity,
                    unit_price: l.unit_price,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NewPaymentDto {
    pub amount: BigDecimal,
    pub method: String,
}

impl From<NewPayment> for NewPaymentDto {
    fn from(payload: NewPayment) -> Self {
        NewPaymentDto {
            amount: payload.amount,
            method: payload.method,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DiscountDto {
    pub discount: BigDecimal,
}

impl From<DiscountUpdate> for DiscountDto {
    fn from(payload: DiscountUpdate) -> Self {
        DiscountDto {
            discount: payload.discount,
        }
    }
}

/// `{ "id": ... }` acknowledgement returned by delete endpoints.
#[derive(Debug, Deserialize)]
pub struct DeletedDto {
    pub id: Uuid,
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.trim().is_empty())
    }
}
