use serde::{Deserialize, Serialize};

/// One form row exactly as typed: every field is still text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawEntry {
    #[serde(default)]
    pub label: Option<String>,
    pub value: String,
    pub weight: String,
}

impl RawEntry {
    pub fn new(label: Option<&str>, value: &str, weight: &str) -> Self {
        Self {
            label: label.map(str::to_string),
            value: value.to_string(),
            weight: weight.to_string(),
        }
    }

    /// Split a `[LABEL:]VALUE[:WEIGHT]` row as given on the command line.
    ///
    /// Splits from the right so labels may themselves contain `:`. Never
    /// fails: missing parts stay empty and are judged by the validator.
    pub fn from_row(row: &str) -> Self {
        let mut parts: Vec<&str> = row.rsplitn(3, ':').collect();
        parts.reverse();
        match parts.as_slice() {
            [value] => Self::new(None, value, ""),
            [value, weight] => Self::new(None, value, weight),
            [label, value, weight] => Self::new(Some(*label), value, weight),
            _ => Self::default(),
        }
    }

    /// True when label, value and weight are all non-blank.
    pub fn is_complete(&self) -> bool {
        self.label.as_deref().is_some_and(|l| !l.trim().is_empty())
            && !self.value.trim().is_empty()
            && !self.weight.trim().is_empty()
    }

    /// Label to show for this row; falls back to "{noun} N" (1-based).
    pub fn display_label(&self, index: usize, noun: &str) -> String {
        match self.label.as_deref().map(str::trim) {
            Some(l) if !l.is_empty() => l.to_string(),
            _ => format!("{} {}", noun, index + 1),
        }
    }
}

/// A validated line item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub label: String,
    pub value: f64,
    pub weight: f64,
}

impl Entry {
    pub fn new(label: impl Into<String>, value: f64, weight: f64) -> Self {
        Self {
            label: label.into(),
            value,
            weight,
        }
    }

    pub fn weighted_value(&self) -> f64 {
        self.value * self.weight
    }
}

/// Parse trimmed text as a finite `f64`. `NaN` and infinities are rejected.
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
