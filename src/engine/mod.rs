//! Carrier guideline evaluation engine
//!
//! `evaluate_carrier` runs, in order: age bounds, guaranteed issue, build/BMI
//! classification, tobacco, diabetes, hypertension, cancer, DUI and disclosed
//! conditions. The final rating is the worst candidate tier collected.

mod build;
mod evaluate;
mod modifiers;
mod outcome;
mod rating;

pub use build::{classify_build, BuildClass, UNCLASSIFIED_BUILD_NOTE};
pub use evaluate::{evaluate_carrier, GUARANTEED_ISSUE_NOTE};
pub use modifiers::{Findings, DUI_TABLE_TIER, MODIFIER_TABLE_TIER};
pub use outcome::{AssessmentOutcome, DeclineReason, BEST_CLASS_SUMMARY};
pub use rating::{worst_tier, Rating, RatingTier, DECLINE_SEVERITY, GRADED_SEVERITY};
