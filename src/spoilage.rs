//! Spoilage write-off risk scoring
//!
//! Advisory only: the score ranks and labels a proposed write-off for human
//! review, it never blocks one. The hard rule that a write-off may not
//! exceed on-hand stock lives in `validation`, for the caller to run.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::QualityGrade;

const MAX_QUANTITY_POINTS: f64 = 40.0;
/// Ratio assumed when stock is empty but a positive write-off is proposed
const EMPTY_STOCK_RATIO: f64 = 0.7;

/// Keyword groups matched case-insensitively against the reason text
const TEMPERATURE_SIGNALS: &[&str] = &[
    "temperature",
    "cold chain",
    "cold-chain",
    "refrigerat",
    "freezer",
    "thaw",
    "too warm",
];
const ODOR_SIGNALS: &[&str] = &[
    "odor", "odour", "smell", "mold", "mould", "slimy", "rotten", "rancid",
];
const RETURN_SIGNALS: &[&str] = &["customer return", "returned", "refund"];

/// A proposed inventory write-off awaiting confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpoilageCandidate {
    pub product_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: u32,
    /// Free-text reason entered by the operator; scanned for risk signals
    pub reason: String,
}

/// Catalog context needed to score a candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpoilageContext {
    /// Days since the batch was taken in
    pub age_days: u32,
    pub shelf_life_days: Option<u32>,
    pub quality_grade: Option<QualityGrade>,
    pub current_stock: i64,
}

/// Review priority band for a scored write-off
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
            RiskLevel::Critical => write!(f, "Critical"),
        }
    }
}

/// Scored write-off together with the signals that drove the score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpoilageRisk {
    /// Additive score clamped to [0, 100]
    pub score: f64,
    pub level: RiskLevel,
    pub explanation: Vec<String>,
}

/// Band a score into a review priority
pub fn risk_level(score: f64) -> RiskLevel {
    if score >= 80.0 {
        RiskLevel::Critical
    } else if score >= 60.0 {
        RiskLevel::High
    } else if score >= 30.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Score a proposed write-off from quantity ratio, batch age, quality
/// grade, and reason-text signals
pub fn score_spoilage(candidate: &SpoilageCandidate, context: &SpoilageContext) -> SpoilageRisk {
    let mut score = 0.0;
    let mut explanation = Vec::new();

    let ratio = if context.current_stock > 0 {
        f64::from(candidate.quantity) / context.current_stock as f64
    } else if candidate.quantity > 0 {
        EMPTY_STOCK_RATIO
    } else {
        0.0
    };
    let quantity_points = (ratio * MAX_QUANTITY_POINTS).min(MAX_QUANTITY_POINTS);
    if quantity_points > 0.0 {
        score += quantity_points;
        explanation.push(format!(
            "write-off covers {:.0}% of on-hand stock (+{:.0})",
            ratio * 100.0,
            quantity_points
        ));
    }

    let age_points = match context.shelf_life_days {
        Some(shelf) if shelf > 0 => {
            let usage = f64::from(context.age_days) / f64::from(shelf);
            if usage >= 1.1 {
                40.0
            } else if usage >= 0.9 {
                25.0
            } else if usage >= 0.7 {
                15.0
            } else {
                0.0
            }
        }
        _ => {
            // no shelf life on record: absolute age thresholds
            if context.age_days > 90 {
                25.0
            } else if context.age_days > 60 {
                18.0
            } else if context.age_days > 30 {
                10.0
            } else {
                0.0
            }
        }
    };
    if age_points > 0.0 {
        score += age_points;
        match context.shelf_life_days {
            Some(shelf) if shelf > 0 => explanation.push(format!(
                "batch is {} days into a {}-day shelf life (+{:.0})",
                context.age_days, shelf, age_points
            )),
            _ => explanation.push(format!(
                "batch is {} days old with no shelf life on record (+{:.0})",
                context.age_days, age_points
            )),
        }
    }

    let grade_points = match context.quality_grade {
        Some(QualityGrade::B) => 5.0,
        Some(QualityGrade::C) | Some(QualityGrade::Unsorted) => 10.0,
        _ => 0.0,
    };
    if grade_points > 0.0 {
        score += grade_points;
        if let Some(grade) = context.quality_grade {
            explanation.push(format!("grade {} batch (+{:.0})", grade, grade_points));
        }
    }

    let reason = candidate.reason.to_lowercase();
    if contains_any(&reason, TEMPERATURE_SIGNALS) {
        score += 10.0;
        explanation.push("reason mentions a cold-chain issue (+10)".to_string());
    }
    if contains_any(&reason, ODOR_SIGNALS) {
        score += 10.0;
        explanation.push("reason mentions odor or mold (+10)".to_string());
    }
    if contains_any(&reason, RETURN_SIGNALS) {
        score += 5.0;
        explanation.push("reason mentions a customer return (+5)".to_string());
    }

    let score = score.clamp(0.0, 100.0);
    SpoilageRisk {
        score,
        level: risk_level(score),
        explanation,
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
