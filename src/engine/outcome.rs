//! Per-carrier assessment outcomes

use super::rating::{Rating, DECLINE_SEVERITY};
use crate::catalog::{CarrierGuideline, ConditionCode, ProductLine};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Summary shown for an approval with nothing noteworthy
pub const BEST_CLASS_SUMMARY: &str = "Likely best class";

/// Why a carrier would decline the applicant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclineReason {
    AgeBelowMinimum { min_age: u32 },
    AgeAboveMaximum { max_age: u32 },
    BmiBelowMinimum { bmi_min: f64 },
    BuildExceedsLimits { height_inches: u32, max_weight: f64 },
    BmiExceedsLimits { max_bmi: Option<f64> },
    Tobacco,
    Diabetes,
    Hypertension,
    CancerWithinLookback { lookback_years: u32 },
    DuiTooRecent { years_ago: u32, lookback_years: u32 },
    Condition { code: ConditionCode, name: String },
}

impl fmt::Display for DeclineReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclineReason::AgeBelowMinimum { .. } => write!(f, "Age below minimum"),
            DeclineReason::AgeAboveMaximum { .. } => write!(f, "Age above maximum"),
            DeclineReason::BmiBelowMinimum { bmi_min } => write!(f, "BMI below minimum ({})", bmi_min),
            DeclineReason::BuildExceedsLimits { max_weight, .. } => {
                write!(f, "Build exceeds limits for height (max {} lbs)", max_weight)
            }
            DeclineReason::BmiExceedsLimits { .. } => write!(f, "BMI exceeds limits"),
            DeclineReason::Tobacco => write!(f, "Tobacco decline"),
            DeclineReason::Diabetes => write!(f, "Diabetes decline"),
            DeclineReason::Hypertension => write!(f, "Hypertension decline"),
            DeclineReason::CancerWithinLookback { lookback_years } => {
                write!(f, "Cancer history within {} years", lookback_years)
            }
            DeclineReason::DuiTooRecent { .. } => write!(f, "DUI too recent"),
            DeclineReason::Condition { name, .. } => write!(f, "{} decline", name),
        }
    }
}

/// Predicted result of one carrier for one applicant
///
/// `rating` is `None` exactly when the carrier declines; `notes` hold the
/// rationale in the order rules fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentOutcome {
    pub carrier_id: u32,
    pub carrier: String,
    pub product_line: ProductLine,
    pub rating: Option<Rating>,
    /// Carrier-branded name of the rating
    pub rating_label: Option<String>,
    pub notes: Vec<String>,
    pub decline_reason: Option<DeclineReason>,
    pub declined: bool,
}

impl AssessmentOutcome {
    pub fn approved(carrier: &CarrierGuideline, rating: Rating, notes: Vec<String>) -> Self {
        Self {
            carrier_id: carrier.id,
            carrier: carrier.name.clone(),
            product_line: carrier.product_line,
            rating: Some(rating),
            rating_label: Some(carrier.label_for(rating).to_string()),
            notes,
            decline_reason: None,
            declined: false,
        }
    }

    pub fn declined(carrier: &CarrierGuideline, reason: DeclineReason) -> Self {
        Self {
            carrier_id: carrier.id,
            carrier: carrier.name.clone(),
            product_line: carrier.product_line,
            rating: None,
            rating_label: None,
            notes: vec![reason.to_string()],
            decline_reason: Some(reason),
            declined: true,
        }
    }

    pub fn is_declined(&self) -> bool {
        self.declined
    }

    /// Ordering key: rating severity, declines last
    pub fn severity(&self) -> u8 {
        match self.rating {
            Some(rating) if !self.declined => rating.severity(),
            _ => DECLINE_SEVERITY,
        }
    }

    /// Notes joined for display
    pub fn summary(&self) -> String {
        if self.notes.is_empty() {
            BEST_CLASS_SUMMARY.to_string()
        } else {
            self.notes.join("; ")
        }
    }
}
