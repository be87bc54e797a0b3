//! Load applicant profiles from an intake CSV
//!
//! Columns: `applicant_id, age, height_inches, weight_lbs, bmi, tobacco,
//! diabetes, hypertension, cancer_years_ago, dui_years_ago, conditions`.
//! Blank cells mean "not disclosed"; `conditions` is a `;`-separated list of codes.

use super::ApplicantProfile;
use crate::catalog::ConditionCode;
use crate::error::IntakeError;
use csv::Reader;
use serde::{Deserialize, Deserializer};
use std::path::Path;

/// Raw CSV row matching the intake file columns
#[derive(Debug, Deserialize)]
struct CsvRow {
    applicant_id: String,
    #[serde(default)]
    age: Option<u32>,
    #[serde(default)]
    height_inches: Option<f64>,
    #[serde(default)]
    weight_lbs: Option<f64>,
    #[serde(default)]
    bmi: Option<f64>,
    #[serde(default, deserialize_with = "flag")]
    tobacco: bool,
    #[serde(default, deserialize_with = "flag")]
    diabetes: bool,
    #[serde(default, deserialize_with = "flag")]
    hypertension: bool,
    #[serde(default)]
    cancer_years_ago: Option<u32>,
    #[serde(default)]
    dui_years_ago: Option<u32>,
    #[serde(default)]
    conditions: String,
}

/// Accept `true/false`, `yes/no`, `y/n`, `1/0` and blank (false)
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!("invalid flag value: {}", other))),
    }
}

impl CsvRow {
    fn into_record(self) -> Result<ApplicantRecord, IntakeError> {
        let profile = ApplicantProfile {
            age: self.age,
            height_inches: self.height_inches,
            weight_lbs: self.weight_lbs,
            stated_bmi: self.bmi,
            tobacco: self.tobacco,
            diabetes: self.diabetes,
            hypertension: self.hypertension,
            cancer_years_ago: self.cancer_years_ago,
            dui_years_ago: self.dui_years_ago,
            conditions: self
                .conditions
                .split(';')
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(ConditionCode::new)
                .collect(),
        }
        .normalized();

        profile.validate().map_err(|source| IntakeError::Profile {
            applicant_id: self.applicant_id.clone(),
            source,
        })?;

        Ok(ApplicantRecord {
            applicant_id: self.applicant_id,
            profile,
        })
    }
}

/// An intake row: external identifier plus the normalized profile
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicantRecord {
    pub applicant_id: String,
    pub profile: ApplicantProfile,
}

/// Load all applicants from a CSV file
pub fn load_applicants<P: AsRef<Path>>(path: P) -> Result<Vec<ApplicantRecord>, IntakeError> {
    let reader = Reader::from_path(path)?;
    read_applicants(reader)
}

/// Load applicants from any reader (e.g., string buffer, request body)
pub fn load_applicants_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<ApplicantRecord>, IntakeError> {
    read_applicants(Reader::from_reader(reader))
}

fn read_applicants<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<ApplicantRecord>, IntakeError> {
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        records.push(row.into_record()?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "applicant_id,age,height_inches,weight_lbs,bmi,tobacco,diabetes,hypertension,cancer_years_ago,dui_years_ago,conditions\n";

    #[test]
    fn test_load_applicants_from_reader() {
        let data = format!(
            "{HEADER}A-1,45,70,188,,false,no,1,999,7,copd; Sleep_Apnea\nA-2,,,,31.4,,,,,,\n"
        );
        let records = load_applicants_from_reader(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0].profile;
        assert_eq!(records[0].applicant_id, "A-1");
        assert_eq!(first.age, Some(45));
        assert!(first.hypertension && !first.diabetes && !first.tobacco);
        assert_eq!(first.cancer_years_ago, None);
        assert_eq!(first.dui_years_ago, Some(7));
        assert_eq!(first.conditions.len(), 2);
        assert!(first.conditions.contains(&ConditionCode::new("sleep_apnea")));

        let second = &records[1].profile;
        assert_eq!(second.age, None);
        assert_eq!(second.stated_bmi, Some(31.4));
        assert!(second.conditions.is_empty());
    }

    #[test]
    fn test_invalid_flag_is_an_error() {
        let data = format!("{HEADER}A-1,45,70,188,,maybe,,,,,\n");
        assert!(matches!(
            load_applicants_from_reader(data.as_bytes()),
            Err(IntakeError::Csv(_))
        ));
    }

    #[test]
    fn test_non_positive_measurement_is_an_error() {
        let data = format!("{HEADER}A-9,45,70,-5,,,,,,,\n");
        match load_applicants_from_reader(data.as_bytes()) {
            Err(IntakeError::Profile { applicant_id, .. }) => assert_eq!(applicant_id, "A-9"),
            other => panic!("expected profile error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_sample_file() {
        let records = load_applicants("data/applicants_sample.csv").expect("Failed to load applicants");
        assert_eq!(records.len(), 7);
        assert_eq!(records[0].applicant_id, "A-1001");
    }
}
