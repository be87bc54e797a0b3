//! Carrier guideline catalog
//!
//! The catalog is loaded and validated once, before any evaluation, and is
//! read-only afterwards. Evaluations borrow it; nothing mutates it.

mod build_chart;
mod conditions;
mod guideline;
pub mod loader;

pub use build_chart::{BuildChart, BuildChartRow};
pub use conditions::{
    Condition, ConditionAction, ConditionActionMap, ConditionCategory, ConditionCode,
    ConditionTaxonomy,
};
pub use guideline::{
    CarrierGuideline, MedicalPolicy, ProductLine, TierCeilings, TierLabels, TobaccoPolicy,
};
pub use loader::DEFAULT_CATALOG_PATH;

use crate::applicant::ApplicantProfile;
use crate::error::{CatalogError, ProfileError};
use log::warn;
use std::collections::HashSet;
use std::path::Path;

/// Validated condition taxonomy plus every carrier guideline, in catalog order
#[derive(Debug, Clone)]
pub struct Catalog {
    conditions: ConditionTaxonomy,
    carriers: Vec<CarrierGuideline>,
}

impl Catalog {
    /// Validate and assemble a catalog
    ///
    /// Checks carrier ids are unique, each guideline is internally consistent and
    /// every condition action refers to a code in the taxonomy.
    pub fn new(conditions: ConditionTaxonomy, carriers: Vec<CarrierGuideline>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(carriers.len());
        for carrier in &carriers {
            if !seen.insert(carrier.id) {
                return Err(CatalogError::DuplicateCarrier(carrier.id));
            }
            carrier.validate()?;

            if let Some((code, _)) = carrier
                .condition_actions
                .iter()
                .find(|(code, _)| !conditions.contains(code))
            {
                return Err(CatalogError::UnknownCondition {
                    carrier_id: carrier.id,
                    code: code.to_string(),
                });
            }
        }

        Ok(Self { conditions, carriers })
    }

    /// Load catalog from the default data/catalog directory
    pub fn from_csv() -> Result<Self, CatalogError> {
        Self::from_csv_path(Path::new(DEFAULT_CATALOG_PATH))
    }

    /// Load catalog from a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, CatalogError> {
        loader::load_catalog(path)
    }

    pub fn conditions(&self) -> &ConditionTaxonomy {
        &self.conditions
    }

    pub fn carriers(&self) -> &[CarrierGuideline] {
        &self.carriers
    }

    /// Carriers of one product line, in catalog order
    pub fn carriers_for(&self, line: ProductLine) -> impl Iterator<Item = &CarrierGuideline> {
        self.carriers.iter().filter(move |c| c.product_line == line)
    }

    pub fn carrier(&self, id: u32) -> Option<&CarrierGuideline> {
        self.carriers.iter().find(|c| c.id == id)
    }

    /// Disclosed condition codes the taxonomy does not know
    pub fn unknown_conditions(&self, profile: &ApplicantProfile) -> Vec<String> {
        profile
            .conditions
            .iter()
            .filter(|code| !self.conditions.contains(code))
            .map(|code| code.to_string())
            .collect()
    }

    /// Reject profiles with unusable measurements or unknown condition codes
    pub fn check_profile(&self, profile: &ApplicantProfile) -> Result<(), ProfileError> {
        profile.validate()?;
        let unknown = self.unknown_conditions(profile);
        if !unknown.is_empty() {
            warn!("Applicant disclosed unknown condition code(s): {}", unknown.join(", "));
            return Err(ProfileError::UnknownConditions(unknown));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{guideline, taxonomy};

    #[test]
    fn test_duplicate_carrier_rejected() {
        let result = Catalog::new(taxonomy(), vec![guideline(1, "A"), guideline(1, "B")]);
        assert!(matches!(result, Err(CatalogError::DuplicateCarrier(1))));
    }

    #[test]
    fn test_unknown_condition_action_rejected() {
        let mut carrier = guideline(2, "A");
        carrier
            .condition_actions
            .insert(ConditionCode::new("gout"), ConditionAction::Table);
        let result = Catalog::new(taxonomy(), vec![carrier]);
        assert!(matches!(result, Err(CatalogError::UnknownCondition { carrier_id: 2, .. })));
    }

    #[test]
    fn test_carriers_for_keeps_catalog_order() {
        let mut term = guideline(3, "Term Co");
        term.product_line = ProductLine::Term;
        let catalog = Catalog::new(
            taxonomy(),
            vec![guideline(2, "Beta"), term, guideline(1, "Alpha")],
        )
        .unwrap();

        let ids: Vec<u32> = catalog.carriers_for(ProductLine::Iul).map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(catalog.carriers_for(ProductLine::FinalExpense).count(), 0);
        assert_eq!(catalog.carrier(3).unwrap().name, "Term Co");
    }

    #[test]
    fn test_check_profile_reports_unknown_codes() {
        let catalog = Catalog::new(taxonomy(), vec![guideline(1, "A")]).unwrap();
        let profile = ApplicantProfile::new()
            .with_condition("copd")
            .with_condition("gout")
            .with_condition("alien_abduction");

        assert_eq!(
            catalog.check_profile(&profile),
            Err(ProfileError::UnknownConditions(vec![
                "alien_abduction".to_string(),
                "gout".to_string()
            ]))
        );
        assert!(catalog
            .check_profile(&ApplicantProfile::new().with_condition("hiv"))
            .is_ok());
    }
}
