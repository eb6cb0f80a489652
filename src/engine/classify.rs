use serde::Serialize;

use super::bound::{check_order, first_match, Bound};

/// A human-readable performance tier.
///
/// `tier` is an ordinal where larger is better: the first band of a table has
/// the highest tier and the catch-all has tier 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub label: String,
    pub tier: usize,
}

/// Ordered list of `(bound, label)` bands evaluated top-down, with a
/// catch-all label for values no band accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdTable {
    bands: Vec<(Bound, String)>,
    otherwise: String,
}

impl ThresholdTable {
    pub fn new(bands: Vec<(Bound, String)>, otherwise: impl Into<String>) -> Self {
        Self {
            bands,
            otherwise: otherwise.into(),
        }
    }

    /// A table where every value lands in the catch-all.
    pub fn empty(otherwise: impl Into<String>) -> Self {
        Self::new(Vec::new(), otherwise)
    }

    /// Build a descending (`>=`) table from `(cut, label)` pairs.
    pub fn at_least(cuts: &[(f64, &str)], otherwise: &str) -> Self {
        Self::new(
            cuts.iter()
                .map(|(cut, label)| (Bound::AtLeast(*cut), label.to_string()))
                .collect(),
            otherwise,
        )
    }

    /// Build an ascending (`<=`) table from `(cut, label)` pairs.
    pub fn at_most(cuts: &[(f64, &str)], otherwise: &str) -> Self {
        Self::new(
            cuts.iter()
                .map(|(cut, label)| (Bound::AtMost(*cut), label.to_string()))
                .collect(),
            otherwise,
        )
    }

    pub fn bands(&self) -> &[(Bound, String)] {
        &self.bands
    }

    pub fn otherwise(&self) -> &str {
        &self.otherwise
    }

    /// Highest tier this table can produce.
    pub fn max_tier(&self) -> usize {
        self.bands.len()
    }

    pub fn classify(&self, value: f64) -> Category {
        match first_match(value, &self.bands) {
            Some((idx, label)) => Category {
                label: label.clone(),
                tier: self.bands.len() - idx,
            },
            None => Category {
                label: self.otherwise.clone(),
                tier: 0,
            },
        }
    }

    /// Problems that would make some band unreachable.
    pub fn check(&self) -> Vec<String> {
        let bounds: Vec<Bound> = self.bands.iter().map(|(b, _)| *b).collect();
        check_order(&bounds)
    }
}

pub fn classify(value: f64, table: &ThresholdTable) -> Category {
    table.classify(value)
}
