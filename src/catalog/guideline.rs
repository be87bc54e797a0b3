//! Carrier underwriting guidelines
//!
//! A guideline holds everything one carrier publishes about who it accepts:
//! age bounds, BMI brackets, lifestyle policies, lookback periods, an optional
//! build chart and the carrier's condition actions.

use super::build_chart::BuildChart;
use super::conditions::ConditionActionMap;
use crate::engine::{Rating, RatingTier};
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Product line a carrier guideline belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductLine {
    #[serde(rename = "IUL", alias = "iul")]
    Iul,
    #[serde(rename = "Term", alias = "term")]
    Term,
    #[serde(rename = "Final Expense", alias = "final_expense")]
    FinalExpense,
}

impl ProductLine {
    pub const ALL: [ProductLine; 3] = [ProductLine::Iul, ProductLine::Term, ProductLine::FinalExpense];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductLine::Iul => "IUL",
            ProductLine::Term => "Term",
            ProductLine::FinalExpense => "Final Expense",
        }
    }
}

impl fmt::Display for ProductLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductLine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(&['_', '-'][..], " ").as_str() {
            "iul" => Ok(ProductLine::Iul),
            "term" => Ok(ProductLine::Term),
            "final expense" | "fe" | "fex" => Ok(ProductLine::FinalExpense),
            other => Err(format!("Unknown product line: {}", other)),
        }
    }
}

/// How a carrier treats tobacco users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TobaccoPolicy {
    /// Tobacco users can still reach the standard tier
    StandardOk,
    /// Tobacco users are table rated
    TableOk,
    Decline,
}

/// Three-way policy for diabetes and hypertension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedicalPolicy {
    Ok,
    Table,
    Decline,
}

/// Upper bound per tier, walked best to worst; absent tiers are skipped
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TierCeilings {
    pub standard: Option<f64>,
    pub table2: Option<f64>,
    pub table4: Option<f64>,
    pub table6: Option<f64>,
    pub table8: Option<f64>,
    pub extended: Option<f64>,
}

impl TierCeilings {
    pub fn get(&self, tier: RatingTier) -> Option<f64> {
        match tier {
            RatingTier::Standard => self.standard,
            RatingTier::Table2 => self.table2,
            RatingTier::Table4 => self.table4,
            RatingTier::Table6 => self.table6,
            RatingTier::Table8 => self.table8,
            RatingTier::Extended => self.extended,
        }
    }

    /// Defined ceilings in best-to-worst order
    pub fn iter(&self) -> impl Iterator<Item = (RatingTier, f64)> + '_ {
        RatingTier::ALL
            .into_iter()
            .filter_map(move |tier| self.get(tier).map(|ceiling| (tier, ceiling)))
    }

    /// First tier whose ceiling the value does not exceed
    pub fn classify(&self, value: f64) -> Option<RatingTier> {
        self.iter()
            .find(|&(_, ceiling)| value <= ceiling)
            .map(|(tier, _)| tier)
    }

    /// Highest defined ceiling
    pub fn max(&self) -> Option<f64> {
        self.iter().map(|(_, ceiling)| ceiling).last()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Check that every ceiling is positive and none decreases towards worse tiers
    pub fn validate(&self, carrier_id: u32, context: &str) -> Result<(), CatalogError> {
        let mut previous: Option<(RatingTier, f64)> = None;
        for (tier, ceiling) in self.iter() {
            if !(ceiling.is_finite() && ceiling > 0.0) {
                return Err(CatalogError::NonMonotonicCeilings {
                    carrier_id,
                    context: context.to_string(),
                    detail: format!("{} ceiling {} is not positive", tier, ceiling),
                });
            }
            if let Some((prev_tier, prev_ceiling)) = previous {
                if ceiling < prev_ceiling {
                    return Err(CatalogError::NonMonotonicCeilings {
                        carrier_id,
                        context: context.to_string(),
                        detail: format!(
                            "{} ceiling {} below {} ceiling {}",
                            tier, ceiling, prev_tier, prev_ceiling
                        ),
                    });
                }
            }
            previous = Some((tier, ceiling));
        }
        Ok(())
    }
}

/// Carrier-branded names for each tier ("Elite" for standard, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierLabels([Option<String>; 6]);

impl TierLabels {
    /// Parse `"Elite|Preferred|Select"`; empty entries keep the generic label
    pub fn parse(carrier_id: u32, raw: &str) -> Result<Self, CatalogError> {
        let mut labels: [Option<String>; 6] = Default::default();
        if raw.trim().is_empty() {
            return Ok(Self(labels));
        }

        let parts: Vec<&str> = raw.split('|').collect();
        if parts.len() > labels.len() {
            return Err(CatalogError::InvalidTierLabels {
                carrier_id,
                raw: raw.to_string(),
            });
        }
        for (slot, part) in labels.iter_mut().zip(parts) {
            let part = part.trim();
            if !part.is_empty() {
                *slot = Some(part.to_string());
            }
        }
        Ok(Self(labels))
    }

    pub fn tier(&self, tier: RatingTier) -> &str {
        self.0[tier.index()]
            .as_deref()
            .unwrap_or_else(|| tier.default_label())
    }

    pub fn rating(&self, rating: Rating) -> &str {
        match rating {
            Rating::Tier(tier) => self.tier(tier),
            Rating::Graded => rating.default_label(),
        }
    }
}

/// Underwriting guideline of one carrier product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierGuideline {
    pub id: u32,
    pub name: String,
    pub product_line: ProductLine,
    pub min_age: u32,
    pub max_age: u32,
    pub bmi_min: Option<f64>,
    pub bmi_ceilings: TierCeilings,
    pub tobacco_policy: TobaccoPolicy,
    pub diabetes_policy: MedicalPolicy,
    pub hypertension_policy: MedicalPolicy,
    /// Cancer history more recent than this many years declines
    pub cancer_lookback_years: u32,
    /// A DUI at least this many years ago has no effect
    pub dui_lookback_years_standard: u32,
    /// A DUI more recent than this many years declines
    pub dui_lookback_years_table: u32,
    /// Underwriting waived; approval yields a graded benefit
    pub guaranteed_issue: bool,
    pub build_chart: Option<BuildChart>,
    pub condition_actions: ConditionActionMap,
    pub tier_labels: TierLabels,
    pub notes: String,
}

impl CarrierGuideline {
    /// Check the guideline's own invariants (condition codes are checked by the catalog)
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::EmptyCarrierName { carrier_id: self.id });
        }

        if self.min_age > self.max_age {
            return Err(CatalogError::InvertedAgeBounds {
                carrier_id: self.id,
                name: self.name.clone(),
                min_age: self.min_age,
                max_age: self.max_age,
            });
        }

        if let Some(bmi_min) = self.bmi_min {
            if !(bmi_min.is_finite() && bmi_min > 0.0) {
                return Err(CatalogError::InvalidThreshold {
                    carrier_id: self.id,
                    field: "bmi_min",
                    value: bmi_min,
                });
            }
        }

        self.bmi_ceilings.validate(self.id, "BMI")?;

        if self.dui_lookback_years_table > self.dui_lookback_years_standard {
            return Err(CatalogError::DuiLookbackOrder {
                carrier_id: self.id,
                table: self.dui_lookback_years_table,
                standard: self.dui_lookback_years_standard,
            });
        }

        if self.guaranteed_issue && !self.condition_actions.is_empty() {
            return Err(CatalogError::GuaranteedIssueConditionActions { carrier_id: self.id });
        }

        Ok(())
    }

    /// Presentation label this carrier uses for a rating
    pub fn label_for(&self, rating: Rating) -> &str {
        self.tier_labels.rating(rating)
    }
}
