use std::collections::BTreeMap;

use crate::engine::RawEntry;

/// Letter grade to grade-point lookup for the semester GPA calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterGrades {
    points: BTreeMap<String, f64>,
}

impl Default for LetterGrades {
    fn default() -> Self {
        let table = [
            ("A+", 4.0),
            ("A", 4.0),
            ("A-", 3.7),
            ("B+", 3.3),
            ("B", 3.0),
            ("B-", 2.7),
            ("C+", 2.3),
            ("C", 2.0),
            ("C-", 1.7),
            ("D+", 1.3),
            ("D", 1.0),
            ("F", 0.0),
        ];
        Self::from_map(table.iter().map(|(l, p)| (l.to_string(), *p)).collect())
    }
}

impl LetterGrades {
    /// Keys are matched case-insensitively.
    pub fn from_map(map: BTreeMap<String, f64>) -> Self {
        Self {
            points: map
                .into_iter()
                .map(|(letter, points)| (normalize(&letter), points))
                .collect(),
        }
    }

    pub fn points(&self, letter: &str) -> Option<f64> {
        self.points.get(&normalize(letter)).copied()
    }

    pub fn as_map(&self) -> &BTreeMap<String, f64> {
        &self.points
    }

    /// Replace a row's letter grade with its grade points so the engine can
    /// average it. Anything not in the table, numbers included, resolves to
    /// an empty value and the row is dropped.
    pub fn resolve(&self, row: &RawEntry) -> RawEntry {
        let value = self
            .points(&row.value)
            .map(|points| points.to_string())
            .unwrap_or_default();
        RawEntry {
            value,
            ..row.clone()
        }
    }
}

fn normalize(letter: &str) -> String {
    letter.trim().to_ascii_uppercase()
}
