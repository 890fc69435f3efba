use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Lifecycle status of an order. Declaration order is the order status tabs
/// are listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Paid,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Paid,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Maps a raw status from the service onto the enum. Anything missing or
    /// unrecognised is treated as `Pending`.
    pub fn normalize(raw: Option<&str>) -> OrderStatus {
        let Some(raw) = raw else {
            return OrderStatus::Pending;
        };
        match raw.trim().to_ascii_uppercase().as_str() {
            "CONFIRMED" => OrderStatus::Confirmed,
            "PAID" => OrderStatus::Paid,
            "PROCESSING" => OrderStatus::Processing,
            "SHIPPED" => OrderStatus::Shipped,
            "DELIVERED" => OrderStatus::Delivered,
            "CANCELLED" => OrderStatus::Cancelled,
            _ => OrderStatus::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Paid => "PAID",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown order status '{0}'")]
pub struct ParseStatusError(pub String);

/// Strict parsing for user input; unlike [`OrderStatus::normalize`] an
/// unknown name is an error.
impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub total_amount: BigDecimal,
    pub status: OrderStatus,
    pub customer_name: String,
    /// Number of distinct line items.
    pub item_count: usize,
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Only pending orders may be deleted from the invoice screen.
    pub fn is_deletable(&self) -> bool {
        self.status == OrderStatus::Pending
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: Uuid,
    pub order_id: Uuid,
    pub amount: BigDecimal,
    pub method: String,
    pub created_at: DateTime<Utc>,
}

// ── Payloads ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct OrderLineInput {
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_name: String,
    pub lines: Vec<OrderLineInput>,
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub amount: BigDecimal,
    pub method: String,
}

#[derive(Debug, Clone)]
pub struct DiscountUpdate {
    pub discount: BigDecimal,
}

/// Binary quote document (PDF) returned for an order.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteDocument {
    pub order_id: Uuid,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl QuoteDocument {
    pub fn file_name(&self) -> String {
        format!("quote-{}.pdf", self.order_id)
    }
}
