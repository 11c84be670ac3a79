//! Order and order line models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
}

/// Fulfillment status of an order; only delivered orders count toward
/// realized revenue and cost of goods sold
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "Pending"),
            OrderStatus::Delivered => write!(f, "Delivered"),
            OrderStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// One line of an order
///
/// Price and cost are frozen at sale time; historical figures must use
/// these, never the live catalog values, so past reports stay stable under
/// later price edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: u32,
    pub price_at_order: Decimal,
    pub cost_at_order: Decimal,
}

impl OrderItem {
    /// Line revenue at the frozen sale price
    pub fn line_revenue(&self) -> Decimal {
        self.price_at_order * Decimal::from(self.quantity)
    }

    /// Line cost at the frozen sale cost
    pub fn line_cost(&self) -> Decimal {
        self.cost_at_order * Decimal::from(self.quantity)
    }
}
