//! Order Model

use serde::{Deserialize, Serialize};

use super::category::Category;

/// Sub-order status
///
/// `Approved` and `Rejected` are terminal: no transition leaves them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Approved => "approved",
            OrderStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "approved" => Some(OrderStatus::Approved),
            "rejected" => Some(OrderStatus::Rejected),
            _ => None,
        }
    }

    /// Terminal states accept no further transitions
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::Pending)
    }
}

/// Order line item
///
/// Point-in-time snapshot captured from the submission payload;
/// never re-fetched from a catalog afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Product identifier (drives category classification)
    pub id: i64,
    pub name: String,
    pub quantity: u32,
    /// Unit price in currency unit
    pub price: f64,
}

impl OrderItem {
    pub fn subtotal(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

/// Sum of quantity × price over a line item slice
///
/// `Order.total` must always equal this recomputation over `Order.items`.
pub fn items_total(items: &[OrderItem]) -> f64 {
    items.iter().map(OrderItem::subtotal).sum()
}

/// Sub-order entity (one per category of a single submission)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Globally unique, e.g. `ORD-20250301120000-42-P1`
    pub order_id: String,
    /// Submitter reference, immutable after creation
    pub user_id: i64,
    pub client_name: String,
    pub client_phone: String,
    pub client_address: String,
    pub items: Vec<OrderItem>,
    /// Sum over items; recomputed, never mutated independently
    pub total: f64,
    pub category: Category,
    pub status: OrderStatus,
    pub created_at: String,
    pub decided_at: Option<String>,
    pub decided_by: Option<i64>,
    pub reject_reason: Option<String>,
}

/// Create sub-order payload (status starts at `pending`)
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub order_id: String,
    pub user_id: i64,
    pub client_name: String,
    pub client_phone: String,
    pub client_address: String,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub category: Category,
    /// Rendered document bytes, produced before any store write
    pub ticket_draft: Vec<u8>,
}
