//! Ranking and the pre-loaded assessment runner
//!
//! Loads the catalog once, then assesses any number of applicants without
//! re-reading CSV files.

use crate::applicant::{ApplicantProfile, ApplicantRecord};
use crate::catalog::{Catalog, ProductLine};
use crate::engine::{evaluate_carrier, AssessmentOutcome};
use crate::error::CatalogError;
use log::warn;
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;

/// Order outcomes for presentation
///
/// Approved outcomes by ascending severity, then every declined outcome. The
/// sort is stable, so ties keep the order they arrived in (catalog order).
pub fn rank_outcomes(mut outcomes: Vec<AssessmentOutcome>) -> Vec<AssessmentOutcome> {
    outcomes.sort_by_key(|outcome| (outcome.is_declined(), outcome.severity()));
    outcomes
}

/// Ranked outcomes for one product line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductLineAssessment {
    pub product_line: ProductLine,
    pub outcomes: Vec<AssessmentOutcome>,
}

/// Ranked outcomes for one applicant of a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicantAssessment {
    pub applicant_id: String,
    pub outcomes: Vec<AssessmentOutcome>,
}

/// Pre-loaded runner for assessing many applicants against one catalog
///
/// # Example
/// ```ignore
/// let runner = AssessmentRunner::from_csv()?;
/// let profile = ApplicantProfile::new().with_age(45).with_build(70.0, 188.0);
/// for outcome in runner.assess(&profile, ProductLine::Iul) {
///     println!("{}: {}", outcome.carrier, outcome.summary());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AssessmentRunner {
    catalog: Catalog,
}

impl AssessmentRunner {
    /// Create runner by loading the catalog from data/catalog
    pub fn from_csv() -> Result<Self, CatalogError> {
        Ok(Self {
            catalog: Catalog::from_csv()?,
        })
    }

    /// Create runner from a specific catalog directory
    pub fn from_csv_path(path: &Path) -> Result<Self, CatalogError> {
        Ok(Self {
            catalog: Catalog::from_csv_path(path)?,
        })
    }

    /// Create runner with a pre-built catalog
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// One ranked outcome per carrier of the product line
    pub fn assess(&self, profile: &ApplicantProfile, line: ProductLine) -> Vec<AssessmentOutcome> {
        let outcomes = self
            .catalog
            .carriers_for(line)
            .map(|carrier| evaluate_carrier(profile, carrier, self.catalog.conditions()))
            .collect();
        rank_outcomes(outcomes)
    }

    /// Ranked outcomes for every product line
    pub fn assess_all(&self, profile: &ApplicantProfile) -> Vec<ProductLineAssessment> {
        ProductLine::ALL
            .into_iter()
            .map(|product_line| ProductLineAssessment {
                product_line,
                outcomes: self.assess(profile, product_line),
            })
            .collect()
    }

    /// Assess a batch of applicants in parallel, preserving input order
    ///
    /// Unknown condition codes are logged and otherwise have no effect.
    pub fn assess_batch(&self, records: &[ApplicantRecord], line: ProductLine) -> Vec<ApplicantAssessment> {
        records
            .par_iter()
            .map(|record| {
                if let Err(e) = self.catalog.check_profile(&record.profile) {
                    warn!("Applicant {}: {}", record.applicant_id, e);
                }
                ApplicantAssessment {
                    applicant_id: record.applicant_id.clone(),
                    outcomes: self.assess(&record.profile, line),
                }
            })
            .collect()
    }

    /// Get reference to the loaded catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applicant::load_applicants;
    use crate::catalog::{CarrierGuideline, MedicalPolicy, TobaccoPolicy};
    use crate::engine::{Rating, RatingTier};
    use crate::test_support::{catalog, guideline, sample_chart};

    fn carriers() -> Vec<CarrierGuideline> {
        let open = guideline(1, "Open Life");

        let mut strict = guideline(2, "Strict Life");
        strict.tobacco_policy = TobaccoPolicy::Decline;

        let mut charted = guideline(3, "Chart Life");
        charted.build_chart = Some(sample_chart());

        let mut table = guideline(4, "Table Life");
        table.tobacco_policy = TobaccoPolicy::TableOk;

        let mut diabetic = guideline(5, "No Diabetes Life");
        diabetic.diabetes_policy = MedicalPolicy::Decline;

        let mut term = guideline(6, "Term Life");
        term.product_line = ProductLine::Term;

        vec![open, strict, charted, table, diabetic, term]
    }

    #[test]
    fn test_rank_orders_by_severity_then_declines() {
        let runner = AssessmentRunner::with_catalog(catalog(carriers()));
        // Tobacco, build table 2 on the chart
        let profile = ApplicantProfile::new().with_age(40).with_build(70.0, 200.0).with_tobacco();
        let outcomes = runner.assess(&profile, ProductLine::Iul);

        let ids: Vec<u32> = outcomes.iter().map(|o| o.carrier_id).collect();
        // 1 and 5 are standard, 3 and 4 table 2 (catalog order kept), 2 declined
        assert_eq!(ids, vec![1, 5, 3, 4, 2]);
        assert_eq!(outcomes[0].rating, Some(Rating::Tier(RatingTier::Standard)));
        assert!(outcomes[4].declined);
    }

    #[test]
    fn test_declines_keep_catalog_order() {
        let runner = AssessmentRunner::with_catalog(catalog(carriers()));
        let profile = ApplicantProfile::new().with_age(17);
        let outcomes = runner.assess(&profile, ProductLine::Iul);
        assert!(outcomes.iter().all(|o| o.declined));
        let ids: Vec<u32> = outcomes.iter().map(|o| o.carrier_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_ranking_invariant() {
        let runner = AssessmentRunner::with_catalog(catalog(carriers()));
        let profile = ApplicantProfile::new()
            .with_age(50)
            .with_build(70.0, 230.0)
            .with_tobacco()
            .with_diabetes();
        let outcomes = runner.assess(&profile, ProductLine::Iul);

        assert_eq!(outcomes.len(), 5);
        let first_decline = outcomes.iter().position(|o| o.declined).unwrap_or(outcomes.len());
        assert!(outcomes[first_decline..].iter().all(|o| o.declined));
        assert!(outcomes[..first_decline]
            .windows(2)
            .all(|pair| pair[0].severity() <= pair[1].severity()));
    }

    #[test]
    fn test_assess_all_covers_each_line() {
        let runner = AssessmentRunner::with_catalog(catalog(carriers()));
        let all = runner.assess_all(&ApplicantProfile::new().with_age(40));
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].outcomes.len(), 5);
        assert_eq!(all[1].product_line, ProductLine::Term);
        assert_eq!(all[1].outcomes.len(), 1);
        assert!(all[2].outcomes.is_empty());
    }

    #[test]
    fn test_batch_against_default_catalog() {
        let runner = AssessmentRunner::from_csv().expect("Failed to load catalog");
        let records = load_applicants("data/applicants_sample.csv").expect("Failed to load applicants");
        let results = runner.assess_batch(&records, ProductLine::Iul);

        assert_eq!(results.len(), records.len());
        for (result, record) in results.iter().zip(&records) {
            assert_eq!(result.applicant_id, record.applicant_id);
            assert_eq!(result.outcomes, runner.assess(&record.profile, ProductLine::Iul));
            assert_eq!(result.outcomes.len(), 5);
        }
    }

    #[test]
    fn test_default_catalog_national_life_elite() {
        let runner = AssessmentRunner::from_csv().expect("Failed to load catalog");
        let profile = ApplicantProfile::new().with_age(45).with_build(70.0, 188.0);
        let outcomes = runner.assess(&profile, ProductLine::Iul);

        let national_life = outcomes.iter().find(|o| o.carrier_id == 4).unwrap();
        assert_eq!(national_life.rating_label.as_deref(), Some("Elite"));
        assert_eq!(national_life.notes, vec!["Build → Elite"]);
        assert!(outcomes.iter().all(|o| !o.declined));
    }

    #[test]
    fn test_default_catalog_light_build_on_chart_is_best_class() {
        // 127 lbs at 70 in is BMI 18.2, just above InstaBrain's 18.0 floor
        let runner = AssessmentRunner::from_csv().expect("Failed to load catalog");
        let profile = ApplicantProfile::new().with_age(40).with_build(70.0, 127.0);
        let outcomes = runner.assess(&profile, ProductLine::Term);

        let instabrain = outcomes.iter().find(|o| o.carrier_id == 8).unwrap();
        assert!(!instabrain.declined);
        assert_eq!(instabrain.rating, Some(Rating::Tier(RatingTier::Standard)));
        assert_eq!(instabrain.rating_label.as_deref(), Some("Preferred Plus"));
        assert_eq!(instabrain.notes, vec!["Build → Preferred Plus"]);
    }
}
