//! Effective price resolution under time-boxed discounts

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Discount, DiscountType, Product, Variant};

/// Round a money amount to 2 decimal places, midpoint away from zero
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Whether a discount applies at the given instant
///
/// A descriptor missing its type or value never applies. With both
/// `start_at` and `end_at` set, the window is inclusive on both ends;
/// otherwise the discount applies unconditionally.
pub fn discount_active(discount: &Discount, now: DateTime<Utc>) -> bool {
    if discount.discount_type.is_none() || discount.value.is_none() {
        return false;
    }
    match (discount.start_at, discount.end_at) {
        (Some(start), Some(end)) => start <= now && now <= end,
        _ => true,
    }
}

/// Resolve the effective price of a variant at the given instant
///
/// Total over its inputs: malformed discount values are clamped rather than
/// rejected, and the result never drops below zero.
pub fn resolve_price(product: &Product, variant: &Variant, now: DateTime<Utc>) -> Decimal {
    let base = product.variant_price(variant);
    let effective = match &product.discount {
        Some(discount) if discount_active(discount, now) => apply_discount(base, discount),
        _ => base,
    };
    round_money(effective)
}

fn apply_discount(base: Decimal, discount: &Discount) -> Decimal {
    let value = discount
        .value
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO);
    let lowered = match discount.discount_type {
        Some(DiscountType::Percentage) => base * (Decimal::ONE - value / Decimal::ONE_HUNDRED),
        Some(DiscountType::Fixed) => base - value,
        None => base,
    };
    lowered.max(Decimal::ZERO)
}
