//! Product catalog models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sellable product with its purchasable variants and customer reviews
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    /// Fallback price for variants without their own
    pub price: Decimal,
    /// Fallback cost for variants without their own
    pub cost_price: Decimal,
    /// Maximum days a batch is considered sellable from its batch date
    pub shelf_life_days: Option<u32>,
    pub discount: Option<Discount>,
    pub variants: Vec<Variant>,
    pub reviews: Vec<Review>,
    /// Default low-stock threshold for variants without their own
    pub min_stock: i64,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Base price of a variant, falling back to the product-level price
    pub fn variant_price(&self, variant: &Variant) -> Decimal {
        variant.price.unwrap_or(self.price)
    }

    /// Unit cost of a variant, falling back to the product-level cost
    pub fn variant_cost(&self, variant: &Variant) -> Decimal {
        variant.cost_price.unwrap_or(self.cost_price)
    }

    /// Low-stock threshold of a variant, falling back to the product default
    pub fn variant_min_stock(&self, variant: &Variant) -> i64 {
        variant.min_stock.unwrap_or(self.min_stock)
    }

    /// Total on-hand stock across all variants
    pub fn on_hand(&self) -> i64 {
        self.variants.iter().map(|v| v.stock).sum()
    }
}

/// A purchasable configuration of a product (size/unit), carrying its own
/// price, cost, and stock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub id: Uuid,
    pub name: String,
    /// Overrides the product price when set
    pub price: Option<Decimal>,
    /// Overrides the product cost when set
    pub cost_price: Option<Decimal>,
    /// Landed cost including freight and handling
    pub arrival_cost: Option<Decimal>,
    /// Expected to stay non-negative; adjustments may overdraw it
    pub stock: i64,
    pub min_stock: Option<i64>,
    pub grade: QualityGrade,
    /// Intake date of the current batch, used for age and FIFO
    pub batch_date: Option<NaiveDate>,
    /// Unit of measure label, e.g. "kg" or "pcs"
    pub unit: String,
}

/// Intake quality grade of a variant's current batch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QualityGrade {
    Premium,
    A,
    B,
    C,
    Unsorted,
}

impl std::fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityGrade::Premium => write!(f, "Premium"),
            QualityGrade::A => write!(f, "A"),
            QualityGrade::B => write!(f, "B"),
            QualityGrade::C => write!(f, "C"),
            QualityGrade::Unsorted => write!(f, "Unsorted"),
        }
    }
}

/// A promotional discount attached to a product, optionally time-boxed
///
/// Type and value may be missing independently; pricing treats an
/// incomplete descriptor as no discount, validation reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discount {
    pub discount_type: Option<DiscountType>,
    pub value: Option<Decimal>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
}

/// How a discount value is applied to the base price
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Value is a percentage of the base price
    Percentage,
    /// Value is an absolute amount off the base price
    Fixed,
}

/// A customer review; only approved reviews feed rating metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    /// 1-5 stars
    pub rating: u8,
    pub comment: Option<String>,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}
