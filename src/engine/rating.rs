//! Rating tiers and the severity ordering used to merge rule results
//!
//! Every rule that can worsen a rating contributes a candidate tier; the final
//! rating is the single worst candidate. Declines are not a tier: they are
//! terminal and represented by the absence of a rating on the outcome.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity assigned to declined outcomes when ordering results
pub const DECLINE_SEVERITY: u8 = u8::MAX;

/// Severity of a graded-benefit (guaranteed issue) rating, level with table 4
pub const GRADED_SEVERITY: u8 = 2;

/// Risk tier walked from best to worst by the build classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingTier {
    /// Best available class (carrier may brand it "Elite", "Preferred Plus", ...)
    Standard,
    Table2,
    Table4,
    Table6,
    Table8,
    /// Sixth build-chart column beyond table 8; rated as table 8
    Extended,
}

impl RatingTier {
    /// All tiers in best-to-worst walk order
    pub const ALL: [RatingTier; 6] = [
        RatingTier::Standard,
        RatingTier::Table2,
        RatingTier::Table4,
        RatingTier::Table6,
        RatingTier::Table8,
        RatingTier::Extended,
    ];

    /// Severity rank: 0 is best
    pub fn severity(self) -> u8 {
        match self {
            RatingTier::Standard => 0,
            RatingTier::Table2 => 1,
            RatingTier::Table4 => 2,
            RatingTier::Table6 => 3,
            RatingTier::Table8 | RatingTier::Extended => 4,
        }
    }

    /// Position in `ALL`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Generic label used when a carrier does not brand the tier
    pub fn default_label(self) -> &'static str {
        match self {
            RatingTier::Standard => "Standard",
            RatingTier::Table2 => "Table 2",
            RatingTier::Table4 => "Table 4",
            RatingTier::Table6 => "Table 6",
            RatingTier::Table8 => "Table 8",
            RatingTier::Extended => "Extended",
        }
    }
}

impl fmt::Display for RatingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_label())
    }
}

/// Final rating of an approved outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    /// Underwritten class
    Tier(RatingTier),
    /// Guaranteed-issue policy with a graded death benefit
    Graded,
}

impl Rating {
    pub fn severity(self) -> u8 {
        match self {
            Rating::Tier(tier) => tier.severity(),
            Rating::Graded => GRADED_SEVERITY,
        }
    }

    pub fn default_label(self) -> &'static str {
        match self {
            Rating::Tier(tier) => tier.default_label(),
            Rating::Graded => "Graded",
        }
    }
}

impl From<RatingTier> for Rating {
    fn from(tier: RatingTier) -> Self {
        Rating::Tier(tier)
    }
}

/// Reduce candidate tiers to the worst one
///
/// Ties keep the earlier candidate. Returns `None` when no rule produced a tier.
pub fn worst_tier<I>(candidates: I) -> Option<RatingTier>
where
    I: IntoIterator<Item = RatingTier>,
{
    candidates.into_iter().fold(None, |worst, tier| match worst {
        Some(current) if current.severity() >= tier.severity() => Some(current),
        _ => Some(tier),
    })
}
