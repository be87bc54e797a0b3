//! Evaluation of one applicant against one carrier guideline

use super::build::{classify_build, BuildClass, UNCLASSIFIED_BUILD_NOTE};
use super::modifiers::{
    apply_cancer, apply_conditions, apply_diabetes, apply_dui, apply_hypertension, apply_tobacco,
    Findings,
};
use super::outcome::{AssessmentOutcome, DeclineReason};
use super::rating::{worst_tier, Rating, RatingTier};
use crate::applicant::ApplicantProfile;
use crate::catalog::{CarrierGuideline, ConditionTaxonomy};
use log::debug;

/// Note recorded on every guaranteed-issue approval
pub const GUARANTEED_ISSUE_NOTE: &str = "Guaranteed Issue – graded benefit years 1–3";

/// Predict one carrier's decision for an applicant
///
/// Pure and deterministic: the same inputs always give the same outcome, and
/// the first decline ends the evaluation.
pub fn evaluate_carrier(
    profile: &ApplicantProfile,
    carrier: &CarrierGuideline,
    taxonomy: &ConditionTaxonomy,
) -> AssessmentOutcome {
    let outcome = match run_rules(profile, carrier, taxonomy) {
        Ok((rating, notes)) => AssessmentOutcome::approved(carrier, rating, notes),
        Err(reason) => AssessmentOutcome::declined(carrier, reason),
    };
    debug!(
        "{} [{}]: {} ({})",
        carrier.name,
        carrier.id,
        outcome.rating_label.as_deref().unwrap_or("Decline"),
        outcome.summary()
    );
    outcome
}

fn check_age(profile: &ApplicantProfile, carrier: &CarrierGuideline) -> Result<(), DeclineReason> {
    match profile.age {
        Some(age) if age < carrier.min_age => Err(DeclineReason::AgeBelowMinimum {
            min_age: carrier.min_age,
        }),
        Some(age) if age > carrier.max_age => Err(DeclineReason::AgeAboveMaximum {
            max_age: carrier.max_age,
        }),
        _ => Ok(()),
    }
}

fn run_rules(
    profile: &ApplicantProfile,
    carrier: &CarrierGuideline,
    taxonomy: &ConditionTaxonomy,
) -> Result<(Rating, Vec<String>), DeclineReason> {
    check_age(profile, carrier)?;

    if carrier.guaranteed_issue {
        return Ok((Rating::Graded, vec![GUARANTEED_ISSUE_NOTE.to_string()]));
    }

    let mut findings = Findings::default();
    let build = classify_build(profile, carrier)?;
    match build {
        BuildClass::Chart { tier, .. } => {
            findings.rate(format!("Build → {}", carrier.tier_labels.tier(tier)), tier);
        }
        BuildClass::Bmi { tier, .. } => {
            if tier != RatingTier::Standard {
                findings.rate(format!("BMI → {}", carrier.tier_labels.tier(tier)), tier);
            }
        }
        BuildClass::Unclassified => findings.note(UNCLASSIFIED_BUILD_NOTE),
    }

    apply_tobacco(profile, carrier, &mut findings)?;
    apply_diabetes(profile, carrier, &mut findings)?;
    apply_hypertension(profile, carrier, &mut findings)?;
    apply_cancer(profile, carrier)?;
    apply_dui(profile, carrier, &mut findings)?;
    apply_conditions(profile, carrier, taxonomy, &mut findings)?;

    let tier = worst_tier(findings.candidates).unwrap_or(RatingTier::Standard);
    Ok((Rating::Tier(tier), findings.notes))
}
