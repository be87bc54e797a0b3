//! Lifestyle, history and condition modifiers
//!
//! Each rule either declines, or records a note and optionally a candidate
//! tier. Rules never improve a rating; the evaluation keeps the worst candidate.

use super::outcome::DeclineReason;
use super::rating::RatingTier;
use crate::applicant::ApplicantProfile;
use crate::catalog::{
    CarrierGuideline, ConditionAction, ConditionTaxonomy, MedicalPolicy, TobaccoPolicy,
};

/// Tier contributed by a table-rated policy or condition
pub const MODIFIER_TABLE_TIER: RatingTier = RatingTier::Table2;

/// Tier contributed by a DUI between the table and standard lookbacks
pub const DUI_TABLE_TIER: RatingTier = RatingTier::Table4;

/// Notes and candidate tiers gathered while rules run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Findings {
    pub notes: Vec<String>,
    pub candidates: Vec<RatingTier>,
}

impl Findings {
    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub fn rate(&mut self, note: impl Into<String>, tier: RatingTier) {
        self.note(note);
        self.candidates.push(tier);
    }
}

pub fn apply_tobacco(
    profile: &ApplicantProfile,
    carrier: &CarrierGuideline,
    findings: &mut Findings,
) -> Result<(), DeclineReason> {
    if !profile.tobacco {
        return Ok(());
    }
    match carrier.tobacco_policy {
        TobaccoPolicy::Decline => return Err(DeclineReason::Tobacco),
        TobaccoPolicy::StandardOk => findings.note("Tobacco → Standard"),
        TobaccoPolicy::TableOk => findings.rate("Tobacco → Table rating", MODIFIER_TABLE_TIER),
    }
    Ok(())
}

fn apply_medical(
    disclosed: bool,
    policy: MedicalPolicy,
    label: &str,
    decline: DeclineReason,
    findings: &mut Findings,
) -> Result<(), DeclineReason> {
    if !disclosed {
        return Ok(());
    }
    match policy {
        MedicalPolicy::Decline => return Err(decline),
        MedicalPolicy::Table => findings.rate(format!("{} → Table rating", label), MODIFIER_TABLE_TIER),
        MedicalPolicy::Ok => {}
    }
    Ok(())
}

pub fn apply_diabetes(
    profile: &ApplicantProfile,
    carrier: &CarrierGuideline,
    findings: &mut Findings,
) -> Result<(), DeclineReason> {
    apply_medical(
        profile.diabetes,
        carrier.diabetes_policy,
        "Diabetes",
        DeclineReason::Diabetes,
        findings,
    )
}

pub fn apply_hypertension(
    profile: &ApplicantProfile,
    carrier: &CarrierGuideline,
    findings: &mut Findings,
) -> Result<(), DeclineReason> {
    apply_medical(
        profile.hypertension,
        carrier.hypertension_policy,
        "HTN",
        DeclineReason::Hypertension,
        findings,
    )
}

/// Cancer history inside the lookback declines; years of 0 means current
pub fn apply_cancer(profile: &ApplicantProfile, carrier: &CarrierGuideline) -> Result<(), DeclineReason> {
    match profile.cancer_years_ago {
        Some(years) if years < carrier.cancer_lookback_years => Err(DeclineReason::CancerWithinLookback {
            lookback_years: carrier.cancer_lookback_years,
        }),
        _ => Ok(()),
    }
}

pub fn apply_dui(
    profile: &ApplicantProfile,
    carrier: &CarrierGuideline,
    findings: &mut Findings,
) -> Result<(), DeclineReason> {
    let Some(years) = profile.dui_years_ago else {
        return Ok(());
    };
    if years < carrier.dui_lookback_years_table {
        return Err(DeclineReason::DuiTooRecent {
            years_ago: years,
            lookback_years: carrier.dui_lookback_years_table,
        });
    }
    if years < carrier.dui_lookback_years_standard {
        findings.rate("DUI → Table rating", DUI_TABLE_TIER);
    }
    Ok(())
}

/// Disclosed conditions in code order; the first declining one wins
pub fn apply_conditions(
    profile: &ApplicantProfile,
    carrier: &CarrierGuideline,
    taxonomy: &ConditionTaxonomy,
    findings: &mut Findings,
) -> Result<(), DeclineReason> {
    for code in &profile.conditions {
        match carrier.condition_actions.action_for(code) {
            Some(ConditionAction::Decline) => {
                return Err(DeclineReason::Condition {
                    code: code.clone(),
                    name: taxonomy.display_name(code).to_string(),
                });
            }
            Some(ConditionAction::Table) => {
                findings.rate(
                    format!("{} → Table rating", taxonomy.display_name(code)),
                    MODIFIER_TABLE_TIER,
                );
            }
            Some(ConditionAction::Ok) | None => {}
        }
    }
    Ok(())
}
