//! Normalized applicant intake

use crate::catalog::ConditionCode;
use crate::error::ProfileError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Legacy intake value meaning "no history" for cancer and DUI years
pub const NO_HISTORY_SENTINEL: u32 = 999;

/// Scale factor for BMI from inches and pounds
pub const BMI_FACTOR: f64 = 703.0;

/// Map the legacy `999` sentinel to `None`
pub fn history_years(raw: Option<u32>) -> Option<u32> {
    raw.filter(|&years| years < NO_HISTORY_SENTINEL)
}

/// BMI from height (inches) and weight (pounds), rounded to one decimal
pub fn bmi_from_build(height_inches: f64, weight_lbs: f64) -> Option<f64> {
    if !(is_positive(height_inches) && is_positive(weight_lbs)) {
        return None;
    }
    let bmi = weight_lbs / (height_inches * height_inches) * BMI_FACTOR;
    Some((bmi * 10.0).round() / 10.0)
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Person being evaluated, with every numeric field already parsed
///
/// `cancer_years_ago` and `dui_years_ago` are `None` when the applicant has no
/// such history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicantProfile {
    pub age: Option<u32>,
    pub height_inches: Option<f64>,
    pub weight_lbs: Option<f64>,
    /// BMI supplied directly when height and weight are not both known
    #[serde(rename = "bmi")]
    pub stated_bmi: Option<f64>,
    pub tobacco: bool,
    pub diabetes: bool,
    pub hypertension: bool,
    pub cancer_years_ago: Option<u32>,
    pub dui_years_ago: Option<u32>,
    pub conditions: BTreeSet<ConditionCode>,
}

impl ApplicantProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_build(mut self, height_inches: f64, weight_lbs: f64) -> Self {
        self.height_inches = Some(height_inches);
        self.weight_lbs = Some(weight_lbs);
        self
    }

    pub fn with_bmi(mut self, bmi: f64) -> Self {
        self.stated_bmi = Some(bmi);
        self
    }

    pub fn with_tobacco(mut self) -> Self {
        self.tobacco = true;
        self
    }

    pub fn with_diabetes(mut self) -> Self {
        self.diabetes = true;
        self
    }

    pub fn with_hypertension(mut self) -> Self {
        self.hypertension = true;
        self
    }

    pub fn with_cancer_years_ago(mut self, years: u32) -> Self {
        self.cancer_years_ago = history_years(Some(years));
        self
    }

    pub fn with_dui_years_ago(mut self, years: u32) -> Self {
        self.dui_years_ago = history_years(Some(years));
        self
    }

    pub fn with_condition(mut self, code: impl Into<ConditionCode>) -> Self {
        self.conditions.insert(code.into());
        self
    }

    /// Apply intake conventions to a profile built from raw input
    pub fn normalized(mut self) -> Self {
        self.cancer_years_ago = history_years(self.cancer_years_ago);
        self.dui_years_ago = history_years(self.dui_years_ago);
        self.conditions = self
            .conditions
            .into_iter()
            .map(|code| ConditionCode::new(code.as_str()))
            .collect();
        self
    }

    /// Height and weight when both are known and usable
    pub fn build(&self) -> Option<(f64, f64)> {
        match (self.height_inches, self.weight_lbs) {
            (Some(h), Some(w)) if is_positive(h) && is_positive(w) => Some((h, w)),
            _ => None,
        }
    }

    /// Derived BMI, falling back to the stated value
    pub fn bmi(&self) -> Option<f64> {
        match self.build() {
            Some((height, weight)) => bmi_from_build(height, weight),
            None => self.stated_bmi.filter(|&bmi| is_positive(bmi)),
        }
    }

    /// Reject measurements that are present but unusable
    pub fn validate(&self) -> Result<(), ProfileError> {
        let measurements = [
            ("height_inches", self.height_inches),
            ("weight_lbs", self.weight_lbs),
            ("bmi", self.stated_bmi),
        ];
        for (field, value) in measurements {
            if let Some(value) = value {
                if !is_positive(value) {
                    return Err(ProfileError::InvalidMeasurement { field, value });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bmi_from_height_and_weight() {
        let profile = ApplicantProfile::new().with_build(70.0, 188.0);
        // 188 / 4900 * 703 = 26.97
        assert_relative_eq!(profile.bmi().unwrap(), 27.0);
    }

    #[test]
    fn test_bmi_prefers_build_over_stated() {
        let profile = ApplicantProfile::new().with_build(70.0, 188.0).with_bmi(40.0);
        assert_relative_eq!(profile.bmi().unwrap(), 27.0);
    }

    #[test]
    fn test_bmi_falls_back_to_stated() {
        let profile = ApplicantProfile {
            height_inches: Some(70.0),
            ..ApplicantProfile::new().with_bmi(31.4)
        };
        assert_relative_eq!(profile.bmi().unwrap(), 31.4);
        assert!(ApplicantProfile::new().bmi().is_none());
    }

    #[test]
    fn test_sentinel_history_is_none() {
        let profile = ApplicantProfile::new()
            .with_cancer_years_ago(NO_HISTORY_SENTINEL)
            .with_dui_years_ago(7);
        assert_eq!(profile.cancer_years_ago, None);
        assert_eq!(profile.dui_years_ago, Some(7));
    }

    #[test]
    fn test_normalized_handles_deserialized_input() {
        let raw = r#"{"age": 40, "cancer_years_ago": 999, "conditions": ["Sleep_Apnea"]}"#;
        let profile: ApplicantProfile = serde_json::from_str(raw).unwrap();
        let profile = profile.normalized();
        assert_eq!(profile.age, Some(40));
        assert_eq!(profile.cancer_years_ago, None);
        assert!(profile.conditions.contains(&ConditionCode::new("sleep_apnea")));
    }

    #[test]
    fn test_validate_rejects_bad_measurements() {
        let profile = ApplicantProfile::new().with_build(0.0, 180.0);
        assert_eq!(
            profile.validate(),
            Err(ProfileError::InvalidMeasurement { field: "height_inches", value: 0.0 })
        );
        assert!(profile.build().is_none());
        assert!(ApplicantProfile::new().with_bmi(f64::NAN).validate().is_err());
        assert!(ApplicantProfile::new().with_build(70.0, 180.0).validate().is_ok());
    }
}
