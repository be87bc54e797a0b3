//! Error types for catalog loading and applicant intake
//!
//! Declines are never errors: they are carried by `AssessmentOutcome`. The
//! errors here cover configuration data that fails validation and intake
//! values the engine cannot reason about.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating the carrier catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A catalog file could not be opened
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A catalog file is not well-formed CSV or has an unparseable value
    #[error("malformed {file}: {source}")]
    Csv {
        file: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("duplicate condition code '{0}'")]
    DuplicateCondition(String),

    #[error("duplicate carrier id {0}")]
    DuplicateCarrier(u32),

    #[error("carrier {carrier_id} has an empty name")]
    EmptyCarrierName { carrier_id: u32 },

    #[error("carrier {carrier_id} ({name}): minimum age {min_age} exceeds maximum age {max_age}")]
    InvertedAgeBounds {
        carrier_id: u32,
        name: String,
        min_age: u32,
        max_age: u32,
    },

    /// Tier ceilings must not decrease from standard towards the worst tier
    #[error("carrier {carrier_id}: {context} ceilings are not monotonic ({detail})")]
    NonMonotonicCeilings {
        carrier_id: u32,
        context: String,
        detail: String,
    },

    #[error("carrier {carrier_id}: {field} must be a positive finite number, got {value}")]
    InvalidThreshold {
        carrier_id: u32,
        field: &'static str,
        value: f64,
    },

    #[error("carrier {carrier_id}: DUI table lookback {table} exceeds standard lookback {standard}")]
    DuiLookbackOrder {
        carrier_id: u32,
        table: u32,
        standard: u32,
    },

    #[error("carrier {carrier_id}: build chart lists height {height_inches} more than once")]
    DuplicateBuildHeight { carrier_id: u32, height_inches: u32 },

    #[error("carrier {carrier_id}: build chart row at height {height_inches} defines no weight ceilings")]
    EmptyBuildRow { carrier_id: u32, height_inches: u32 },

    #[error("{file} references unknown carrier {carrier_id}")]
    UnknownCarrier { file: &'static str, carrier_id: u32 },

    #[error("carrier {carrier_id}: action defined for unknown condition '{code}'")]
    UnknownCondition { carrier_id: u32, code: String },

    #[error("carrier {carrier_id}: condition '{code}' has more than one action")]
    DuplicateConditionAction { carrier_id: u32, code: String },

    /// Guaranteed-issue carriers waive underwriting, so a condition action would never apply
    #[error("carrier {carrier_id} is guaranteed issue and cannot carry condition actions")]
    GuaranteedIssueConditionActions { carrier_id: u32 },

    #[error("carrier {carrier_id}: tier labels '{raw}' must list at most 6 '|'-separated entries")]
    InvalidTierLabels { carrier_id: u32, raw: String },
}

/// Errors raised when an applicant profile carries values the engine cannot use
#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("{field} must be a positive finite number, got {value}")]
    InvalidMeasurement { field: &'static str, value: f64 },

    #[error("unknown condition code(s): {}", .0.join(", "))]
    UnknownConditions(Vec<String>),
}

/// Errors raised while reading applicant intake files
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("failed to read applicants: {0}")]
    Csv(#[from] csv::Error),

    #[error("applicant {applicant_id}: {source}")]
    Profile {
        applicant_id: String,
        #[source]
        source: ProfileError,
    },
}

/// Errors raised while reading runtime configuration from the environment
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} is not a known product line: {value}")]
    InvalidProductLine { var: &'static str, value: String },
}
