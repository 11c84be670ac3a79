//! Pre-persistence validation for catalog and spoilage input
//!
//! The calculation functions are total: they clamp malformed values rather
//! than fail. These checks surface the underlying data problems so the
//! caller can block them before they are persisted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Discount, DiscountType, Product, Variant};
use crate::spoilage::SpoilageCandidate;

/// Data problems that should block persistence, not computation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("discount has a value but no type")]
    DiscountValueWithoutType,

    #[error("discount has a type but no value")]
    DiscountTypeWithoutValue,

    #[error("discount value {0} is negative")]
    NegativeDiscountValue(Decimal),

    #[error("percentage discount of {0} exceeds 100")]
    PercentageDiscountOverFull(Decimal),

    #[error("discount window starts at {start} after it ends at {end}")]
    DiscountStartsAfterEnd {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("variant '{name}' has negative stock {stock}")]
    NegativeVariantStock { name: String, stock: i64 },

    #[error("write-off of {requested} exceeds the {available} in stock")]
    WriteOffExceedsStock { requested: u32, available: i64 },
}

/// Collect every problem with a discount descriptor
pub fn validate_discount(discount: &Discount) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match (discount.discount_type, discount.value) {
        (None, Some(_)) => errors.push(ValidationError::DiscountValueWithoutType),
        (Some(_), None) => errors.push(ValidationError::DiscountTypeWithoutValue),
        _ => {}
    }

    if let Some(value) = discount.value {
        if value < Decimal::ZERO {
            errors.push(ValidationError::NegativeDiscountValue(value));
        } else if matches!(discount.discount_type, Some(DiscountType::Percentage))
            && value > Decimal::ONE_HUNDRED
        {
            errors.push(ValidationError::PercentageDiscountOverFull(value));
        }
    }

    if let (Some(start), Some(end)) = (discount.start_at, discount.end_at) {
        if start > end {
            errors.push(ValidationError::DiscountStartsAfterEnd { start, end });
        }
    }

    errors
}

/// Collect every problem with a product record before it is persisted
pub fn validate_product(product: &Product) -> Vec<ValidationError> {
    let mut errors = product
        .discount
        .as_ref()
        .map(validate_discount)
        .unwrap_or_default();

    for variant in &product.variants {
        if variant.stock < 0 {
            errors.push(ValidationError::NegativeVariantStock {
                name: variant.name.clone(),
                stock: variant.stock,
            });
        }
    }

    errors
}

/// Hard rule: a write-off may not exceed the variant's on-hand stock
///
/// This belongs to the caller's confirmation flow; the risk scorer itself
/// will happily score an impossible quantity.
pub fn validate_write_off(
    candidate: &SpoilageCandidate,
    variant: &Variant,
) -> Result<(), ValidationError> {
    let available = variant.stock.max(0);
    if i64::from(candidate.quantity) > available {
        return Err(ValidationError::WriteOffExceedsStock {
            requested: candidate.quantity,
            available,
        });
    }
    Ok(())
}
