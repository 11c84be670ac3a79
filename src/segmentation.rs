//! ABC revenue segmentation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cumulative-share boundaries, in percent
const A_BOUNDARY_PERCENT: u32 = 80;
const B_BOUNDARY_PERCENT: u32 = 95;

/// A revenue-bearing entity projected for segmentation; any sellable
/// entity can take this shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueEntity {
    pub id: Uuid,
    pub name: String,
    pub revenue: Decimal,
}

/// ABC buckets, each in descending revenue order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevenueSegments {
    pub a: Vec<RevenueEntity>,
    pub b: Vec<RevenueEntity>,
    pub c: Vec<RevenueEntity>,
}

/// Classify entities into cumulative-revenue-share buckets (80% / 95% / rest)
///
/// Entities are ranked by revenue descending with ties broken by id, so the
/// result does not depend on input order. An entity joins a bucket while
/// the cumulative share before it is under the boundary; the entity that
/// crosses a boundary stays in the richer bucket, so bucket A never
/// overshoots 80% by more than one entity's share. Share comparisons
/// cross-multiply instead of dividing, which keeps an all-zero-revenue list
/// well defined.
pub fn segment_by_revenue(entities: &[RevenueEntity]) -> RevenueSegments {
    let mut ranked: Vec<RevenueEntity> = entities.to_vec();
    ranked.sort_by(|x, y| y.revenue.cmp(&x.revenue).then(x.id.cmp(&y.id)));

    let total: Decimal = ranked.iter().map(|e| e.revenue).sum();
    let mut segments = RevenueSegments::default();
    let mut cumulative = Decimal::ZERO;
    for entity in ranked {
        let before = cumulative;
        cumulative += entity.revenue;
        if before * Decimal::ONE_HUNDRED < total * Decimal::from(A_BOUNDARY_PERCENT) {
            segments.a.push(entity);
        } else if before * Decimal::ONE_HUNDRED < total * Decimal::from(B_BOUNDARY_PERCENT) {
            segments.b.push(entity);
        } else {
            segments.c.push(entity);
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn entity(name: &str, revenue: &str) -> RevenueEntity {
        RevenueEntity {
            id: Uuid::new_v4(),
            name: name.to_string(),
            revenue: Decimal::from_str(revenue).unwrap(),
        }
    }

    #[test]
    fn test_empty_input_yields_empty_buckets() {
        let segments = segment_by_revenue(&[]);
        assert!(segments.a.is_empty());
        assert!(segments.b.is_empty());
        assert!(segments.c.is_empty());
    }

    #[test]
    fn test_classic_distribution() {
        let entities = vec![
            entity("top", "700"),
            entity("second", "150"),
            entity("third", "100"),
            entity("tail", "50"),
        ];
        let segments = segment_by_revenue(&entities);

        // 70% -> A; 85% crossed A's boundary inside "second" -> A; 95%
        // crossed inside "third" -> B; "tail" starts at 95% -> C
        let names = |bucket: &[RevenueEntity]| {
            bucket.iter().map(|e| e.name.clone()).collect::<Vec<_>>()
        };
        assert_eq!(names(&segments.a), vec!["top", "second"]);
        assert_eq!(names(&segments.b), vec!["third"]);
        assert_eq!(names(&segments.c), vec!["tail"]);
    }

    #[test]
    fn test_dominant_entity_lands_in_a() {
        let entities = vec![entity("whale", "990"), entity("minnow", "10")];
        let segments = segment_by_revenue(&entities);

        assert_eq!(segments.a.len(), 1);
        assert_eq!(segments.a[0].name, "whale");
        assert_eq!(segments.c.len(), 1);
    }

    #[test]
    fn test_single_entity_is_a() {
        let segments = segment_by_revenue(&[entity("only", "42")]);
        assert_eq!(segments.a.len(), 1);
        assert!(segments.b.is_empty());
        assert!(segments.c.is_empty());
    }

    #[test]
    fn test_all_zero_revenue_does_not_panic() {
        let entities = vec![entity("x", "0"), entity("y", "0")];
        let segments = segment_by_revenue(&entities);
        // no revenue to concentrate: everything is tail
        assert_eq!(segments.c.len(), 2);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let a = entity("a", "500");
        let b = entity("b", "300");
        let c = entity("c", "200");

        let forward = segment_by_revenue(&[a.clone(), b.clone(), c.clone()]);
        let reversed = segment_by_revenue(&[c, b, a]);

        let ids = |bucket: &[RevenueEntity]| bucket.iter().map(|e| e.id).collect::<Vec<_>>();
        assert_eq!(ids(&forward.a), ids(&reversed.a));
        assert_eq!(ids(&forward.b), ids(&reversed.b));
        assert_eq!(ids(&forward.c), ids(&reversed.c));
    }

    #[test]
    fn test_revenue_ties_break_by_id() {
        let mut x = entity("x", "100");
        let mut y = entity("y", "100");
        // fix the ids so the expected order is stable
        x.id = Uuid::from_u128(1);
        y.id = Uuid::from_u128(2);

        let forward = segment_by_revenue(&[x.clone(), y.clone()]);
        let swapped = segment_by_revenue(&[y, x]);
        assert_eq!(forward.a[0].id, swapped.a[0].id);
        assert_eq!(forward.a[0].id, Uuid::from_u128(1));
    }
}
