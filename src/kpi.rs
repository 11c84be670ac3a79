//! Dashboard KPI aggregation
//!
//! A single read-only fold over a products/orders snapshot. No metric
//! depends on iteration order, so the caller may chunk the inputs and merge
//! if the catalog grows large.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Order, OrderStatus, Product};
use crate::pricing::{discount_active, resolve_price, round_money};

/// Number of products listed in the top-rated ranking
const TOP_RATED_LIMIT: usize = 5;
/// Shelf-life fraction at which a batch counts as expiring soon
const EXPIRY_WARNING_RATIO: f64 = 0.75;

/// Order counts by fulfillment status
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub delivered: usize,
    pub cancelled: usize,
}

/// A product entry in the top-rated ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopRatedProduct {
    pub id: Uuid,
    pub name: String,
    pub avg_rating: f64,
    pub review_count: usize,
}

/// One-shot dashboard snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub total_products: usize,
    pub total_orders: usize,
    pub orders_by_status: StatusCounts,
    /// Realized from delivered orders at frozen sale prices
    pub revenue: Decimal,
    pub cost: Decimal,
    pub profit: Decimal,
    /// Mean over every approved review; `None` when there are none
    pub avg_rating: Option<f64>,
    /// Variants at or below their effective low-stock threshold
    pub low_stock_variants: usize,
    /// Variants whose batch age reached 75% of the product shelf life
    pub expiring_soon_variants: usize,
    /// Products whose discount is active at the evaluation instant
    pub discounted_products: usize,
    pub top_rated: Vec<TopRatedProduct>,
    /// Effective cost x stock over positive-stock variants
    pub stock_valuation: Decimal,
    /// What the on-hand stock would realize at current effective prices
    pub potential_revenue: Decimal,
    pub potential_profit: Decimal,
}

/// Roll products and orders into a dashboard snapshot
///
/// Archived products keep their review history in the rating figures but
/// are excluded from stock alerts, discount counts, and valuation, since
/// their stock is not sellable.
pub fn compute_kpis(products: &[Product], orders: &[Order], now: DateTime<Utc>) -> KpiSnapshot {
    let today = now.date_naive();

    let mut orders_by_status = StatusCounts::default();
    let mut revenue = Decimal::ZERO;
    let mut cost = Decimal::ZERO;
    for order in orders {
        match order.status {
            OrderStatus::Pending => orders_by_status.pending += 1,
            OrderStatus::Cancelled => orders_by_status.cancelled += 1,
            OrderStatus::Delivered => {
                orders_by_status.delivered += 1;
                for item in &order.items {
                    revenue += item.line_revenue();
                    cost += item.line_cost();
                }
            }
        }
    }

    let mut rating_sum = 0.0;
    let mut rating_count = 0usize;
    let mut low_stock_variants = 0;
    let mut expiring_soon_variants = 0;
    let mut discounted_products = 0;
    let mut stock_valuation = Decimal::ZERO;
    let mut potential_revenue = Decimal::ZERO;
    let mut top_rated: Vec<TopRatedProduct> = Vec::new();

    for product in products {
        let mut product_sum = 0.0;
        let mut product_count = 0usize;
        for review in product.reviews.iter().filter(|r| r.approved) {
            product_sum += f64::from(review.rating);
            product_count += 1;
        }
        rating_sum += product_sum;
        rating_count += product_count;
        if product_count > 0 {
            top_rated.push(TopRatedProduct {
                id: product.id,
                name: product.name.clone(),
                avg_rating: product_sum / product_count as f64,
                review_count: product_count,
            });
        }

        if product.archived {
            continue;
        }

        if product
            .discount
            .as_ref()
            .is_some_and(|d| discount_active(d, now))
        {
            discounted_products += 1;
        }

        for variant in &product.variants {
            if variant.stock <= product.variant_min_stock(variant) {
                low_stock_variants += 1;
            }
            if let (Some(batch_date), Some(shelf_life)) =
                (variant.batch_date, product.shelf_life_days)
            {
                if shelf_life > 0 {
                    let age_days = (today - batch_date).num_days();
                    if age_days >= 0
                        && age_days as f64 >= f64::from(shelf_life) * EXPIRY_WARNING_RATIO
                    {
                        expiring_soon_variants += 1;
                    }
                }
            }
            if variant.stock > 0 {
                let stock = Decimal::from(variant.stock);
                stock_valuation += product.variant_cost(variant) * stock;
                potential_revenue += resolve_price(product, variant, now) * stock;
            }
        }
    }

    top_rated.sort_by(|x, y| {
        y.avg_rating
            .total_cmp(&x.avg_rating)
            .then_with(|| x.name.cmp(&y.name))
    });
    top_rated.truncate(TOP_RATED_LIMIT);

    let avg_rating = if rating_count > 0 {
        Some(rating_sum / rating_count as f64)
    } else {
        None
    };

    let snapshot = KpiSnapshot {
        total_products: products.len(),
        total_orders: orders.len(),
        orders_by_status,
        revenue: round_money(revenue),
        cost: round_money(cost),
        profit: round_money(revenue - cost),
        avg_rating,
        low_stock_variants,
        expiring_soon_variants,
        discounted_products,
        top_rated,
        stock_valuation: round_money(stock_valuation),
        potential_revenue: round_money(potential_revenue),
        potential_profit: round_money(potential_revenue - stock_valuation),
    };

    tracing::debug!(
        total_products = snapshot.total_products,
        total_orders = snapshot.total_orders,
        revenue = %snapshot.revenue,
        profit = %snapshot.profit,
        low_stock_variants = snapshot.low_stock_variants,
        "kpi snapshot computed"
    );

    snapshot
}
