use serde::{Deserialize, Serialize};
use std::fmt;

use super::classify::ThresholdTable;

/// Inclusive range a grade must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ValidRange {
    pub min: f64,
    pub max: f64,
}

impl ValidRange {
    pub const PERCENT: ValidRange = ValidRange { min: 0.0, max: 100.0 };

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Rendered as the tail of "must be a number between ...".
impl fmt::Display for ValidRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} and {}", self.min, self.max)
    }
}

/// How a batch reacts to a bad row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Drop rows that fail to parse or violate a constraint, keep the rest.
    #[default]
    Permissive,
    /// Skip incomplete rows, then reject the whole batch on the first
    /// complete row that violates a constraint.
    Strict,
}

/// Per-tool knobs for [`compute_weighted_average`](super::compute_weighted_average).
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    pub valid_range: Option<ValidRange>,
    pub weight_must_be_positive: bool,
    pub mode: Mode,
    pub tiers: ThresholdTable,
    /// Fallback row name, numbered from 1: "Subject 3", "Course 2".
    pub entry_noun: &'static str,
    /// What the weight is called in messages: "Units", "Credits".
    pub weight_noun: &'static str,
}

impl EngineOptions {
    pub fn permissive(tiers: ThresholdTable) -> Self {
        Self {
            valid_range: None,
            weight_must_be_positive: false,
            mode: Mode::Permissive,
            tiers,
            entry_noun: "Entry",
            weight_noun: "Weight",
        }
    }

    pub fn strict(valid_range: ValidRange, tiers: ThresholdTable) -> Self {
        Self {
            valid_range: Some(valid_range),
            weight_must_be_positive: true,
            mode: Mode::Strict,
            tiers,
            entry_noun: "Entry",
            weight_noun: "Weight",
        }
    }

    pub fn with_valid_range(mut self, range: Option<ValidRange>) -> Self {
        self.valid_range = range;
        self
    }

    pub fn with_positive_weights(mut self, required: bool) -> Self {
        self.weight_must_be_positive = required;
        self
    }

    pub fn with_nouns(mut self, entry: &'static str, weight: &'static str) -> Self {
        self.entry_noun = entry;
        self.weight_noun = weight;
        self
    }
}
