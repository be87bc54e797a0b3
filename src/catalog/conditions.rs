//! Condition taxonomy and per-carrier condition actions

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Identifier of a disclosed health or behavioral condition (e.g. `sleep_apnea`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionCode(String);

impl ConditionCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConditionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConditionCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// Whether a condition is generally carrier-fatal or carrier-dependent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionCategory {
    Knockout,
    Declinable,
}

/// A named condition from the taxonomy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub code: ConditionCode,
    pub name: String,
    pub category: ConditionCategory,
}

/// Immutable catalog of known conditions, kept in load order
#[derive(Debug, Clone, Default)]
pub struct ConditionTaxonomy {
    conditions: Vec<Condition>,
    index: HashMap<ConditionCode, usize>,
}

impl ConditionTaxonomy {
    /// Build the taxonomy, rejecting duplicate codes
    pub fn new(conditions: Vec<Condition>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(conditions.len());
        for (i, condition) in conditions.iter().enumerate() {
            if index.insert(condition.code.clone(), i).is_some() {
                return Err(CatalogError::DuplicateCondition(condition.code.to_string()));
            }
        }
        Ok(Self { conditions, index })
    }

    pub fn get(&self, code: &ConditionCode) -> Option<&Condition> {
        self.index.get(code).map(|&i| &self.conditions[i])
    }

    pub fn contains(&self, code: &ConditionCode) -> bool {
        self.index.contains_key(code)
    }

    /// Display name for a code, falling back to the code itself
    pub fn display_name<'a>(&'a self, code: &'a ConditionCode) -> &'a str {
        self.get(code).map(|c| c.name.as_str()).unwrap_or(code.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Condition> {
        self.conditions.iter()
    }

    pub fn by_category(&self, category: ConditionCategory) -> impl Iterator<Item = &Condition> {
        self.conditions.iter().filter(move |c| c.category == category)
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// What a carrier does when a condition is disclosed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionAction {
    Decline,
    Table,
    Ok,
}

/// Carrier-specific condition actions; a missing entry has no effect
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionActionMap(BTreeMap<ConditionCode, ConditionAction>);

impl ConditionActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an action, returning the previous one if the code was already mapped
    pub fn insert(&mut self, code: ConditionCode, action: ConditionAction) -> Option<ConditionAction> {
        self.0.insert(code, action)
    }

    pub fn action_for(&self, code: &ConditionCode) -> Option<ConditionAction> {
        self.0.get(code).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ConditionCode, ConditionAction)> {
        self.0.iter().map(|(code, action)| (code, *action))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ConditionCode, ConditionAction)> for ConditionActionMap {
    fn from_iter<T: IntoIterator<Item = (ConditionCode, ConditionAction)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
