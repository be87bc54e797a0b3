//! Underwriting Estimator - carrier guideline evaluation for life-insurance applicants
//!
//! This library provides:
//! - A validated, read-only carrier catalog (age/BMI bounds, build charts, lifestyle
//!   policies, lookbacks and per-carrier condition actions) loaded from CSV
//! - Applicant intake with BMI derivation and history normalization
//! - A pure evaluation engine predicting each carrier's decision and risk class
//! - Ranking of outcomes per product line and parallel batch assessment
//!
//! Results are estimates for decision support, not underwriting determinations.

pub mod applicant;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod ranking;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use applicant::{ApplicantProfile, ApplicantRecord};
pub use catalog::{Catalog, CarrierGuideline, ConditionCode, ProductLine};
pub use config::RunConfig;
pub use engine::{evaluate_carrier, AssessmentOutcome, DeclineReason, Rating, RatingTier};
pub use error::{CatalogError, ConfigError, IntakeError, ProfileError};
pub use ranking::{rank_outcomes, AssessmentRunner};
