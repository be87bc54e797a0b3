//! Build (height/weight) and BMI classification

use super::outcome::DeclineReason;
use super::rating::RatingTier;
use crate::applicant::ApplicantProfile;
use crate::catalog::CarrierGuideline;

/// Note recorded when neither build chart nor BMI brackets could place the applicant
pub const UNCLASSIFIED_BUILD_NOTE: &str = "Build not classified";

/// How the applicant's build was placed for one carrier
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BuildClass {
    /// Placed by the carrier's build chart row nearest the applicant's height
    Chart { height_inches: u32, tier: RatingTier },
    /// Placed by the carrier's BMI brackets
    Bmi { bmi: f64, tier: RatingTier },
    /// No usable build data; no tier contributed
    Unclassified,
}

impl BuildClass {
    pub fn tier(&self) -> Option<RatingTier> {
        match *self {
            BuildClass::Chart { tier, .. } | BuildClass::Bmi { tier, .. } => Some(tier),
            BuildClass::Unclassified => None,
        }
    }
}

/// Classify the applicant's build against a carrier, or decline
///
/// Order: BMI minimum, then the build chart when height and weight are both
/// known, then the BMI brackets. A known BMI that no bracket accepts declines,
/// including when the carrier publishes no brackets at all.
pub fn classify_build(
    profile: &ApplicantProfile,
    carrier: &CarrierGuideline,
) -> Result<BuildClass, DeclineReason> {
    let bmi = profile.bmi();

    if let (Some(bmi_min), Some(bmi)) = (carrier.bmi_min, bmi) {
        if bmi < bmi_min {
            return Err(DeclineReason::BmiBelowMinimum { bmi_min });
        }
    }

    if let (Some((height, weight)), Some(chart)) = (profile.build(), carrier.build_chart.as_ref()) {
        if let Some(row) = chart.nearest_row(height) {
            return match row.ceilings.classify(weight) {
                Some(tier) => Ok(BuildClass::Chart {
                    height_inches: row.height_inches,
                    tier,
                }),
                None => Err(DeclineReason::BuildExceedsLimits {
                    height_inches: row.height_inches,
                    max_weight: row.ceilings.max().unwrap_or(0.0),
                }),
            };
        }
    }

    match bmi {
        Some(bmi) => match carrier.bmi_ceilings.classify(bmi) {
            Some(tier) => Ok(BuildClass::Bmi { bmi, tier }),
            None => Err(DeclineReason::BmiExceedsLimits {
                max_bmi: carrier.bmi_ceilings.max(),
            }),
        },
        None => Ok(BuildClass::Unclassified),
    }
}
