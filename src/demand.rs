//! Daily demand aggregation for a single product

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Order;

/// Default lookback window for demand series
pub const DEFAULT_DEMAND_WINDOW_DAYS: u32 = 30;

/// Quantity demanded for a product on one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandPoint {
    pub date: NaiveDate,
    pub qty: f64,
}

/// Aggregate order lines into a zero-filled daily quantity series
///
/// Covers every calendar day in `[today - window_days, today]` inclusive,
/// date-ascending. Days without demand stay at zero so smoothing sees true
/// gaps. Order timestamps are truncated to UTC days; orders outside the
/// window are ignored. Status is not filtered here: the series measures
/// order intake, not fulfillment.
pub fn build_demand_series(
    product_id: Uuid,
    orders: &[Order],
    window_days: u32,
    today: NaiveDate,
) -> Vec<DemandPoint> {
    let start = today - Duration::days(i64::from(window_days));

    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut day = start;
    while day <= today {
        buckets.insert(day, 0.0);
        day += Duration::days(1);
    }

    for order in orders {
        let order_day = order.created_at.date_naive();
        if order_day < start || order_day > today {
            continue;
        }
        let qty: u32 = order
            .items
            .iter()
            .filter(|item| item.product_id == product_id)
            .map(|item| item.quantity)
            .sum();
        if qty > 0 {
            if let Some(slot) = buckets.get_mut(&order_day) {
                *slot += f64::from(qty);
            }
        }
    }

    buckets
        .into_iter()
        .map(|(date, qty)| DemandPoint { date, qty })
        .collect()
}
