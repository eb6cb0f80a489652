use tracing::debug;

use super::entry::{parse_number, Entry, RawEntry};
use super::error::{EngineError, Field};
use super::options::{EngineOptions, Mode};

/// Entries that survived validation, plus how many rows were discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    pub entries: Vec<Entry>,
    pub dropped: usize,
}

/// Turn raw form rows into typed entries according to `options.mode`.
///
/// Permissive mode silently drops any row that does not parse or violates a
/// declared constraint. Strict mode skips incomplete rows and fails the
/// whole batch on the first complete row that violates a constraint. Both
/// modes return [`EngineError::InsufficientInput`] when nothing is left.
pub fn validate_entries(
    raw: &[RawEntry],
    options: &EngineOptions,
) -> Result<Validated, EngineError> {
    let validated = match options.mode {
        Mode::Permissive => validate_permissive(raw, options),
        Mode::Strict => validate_strict(raw, options)?,
    };

    if validated.entries.is_empty() {
        debug!(rows = raw.len(), "no usable entries");
        return Err(EngineError::InsufficientInput);
    }
    Ok(validated)
}

fn validate_permissive(raw: &[RawEntry], options: &EngineOptions) -> Validated {
    let entries: Vec<Entry> = raw
        .iter()
        .enumerate()
        .filter_map(|(i, row)| accept_permissive(i, row, options))
        .collect();
    let dropped = raw.len() - entries.len();
    if dropped > 0 {
        debug!(dropped, kept = entries.len(), "dropped malformed rows");
    }
    Validated { entries, dropped }
}

/// The permissive filter predicate: a row is kept only if both numbers
/// parse and every declared constraint holds.
fn accept_permissive(index: usize, row: &RawEntry, options: &EngineOptions) -> Option<Entry> {
    let value = parse_number(&row.value)?;
    let weight = parse_number(&row.weight)?;

    if let Some(range) = options.valid_range {
        if !range.contains(value) {
            return None;
        }
    }
    if options.weight_must_be_positive && weight <= 0.0 {
        return None;
    }
    Some(Entry::new(row.display_label(index, options.entry_noun), value, weight))
}

fn validate_strict(raw: &[RawEntry], options: &EngineOptions) -> Result<Validated, EngineError> {
    let mut entries = Vec::with_capacity(raw.len());
    let mut dropped = 0;

    for (i, row) in raw.iter().enumerate() {
        if !row.is_complete() {
            dropped += 1;
            continue;
        }
        let label = row.display_label(i, options.entry_noun);

        let value = parse_number(&row.value).ok_or_else(|| EngineError::UnparsableNumber {
            field: Field::Value,
            label: label.clone(),
        })?;
        let weight = parse_number(&row.weight).ok_or_else(|| EngineError::UnparsableNumber {
            field: Field::Weight,
            label: label.clone(),
        })?;

        if let Some(range) = options.valid_range {
            if !range.contains(value) {
                debug!(%label, value, "value out of range, rejecting batch");
                return Err(EngineError::OutOfRangeValue {
                    label,
                    bound: range,
                });
            }
        }
        if options.weight_must_be_positive && weight <= 0.0 {
            debug!(%label, weight, "non-positive weight, rejecting batch");
            return Err(EngineError::NonPositiveWeight {
                noun: options.weight_noun.to_string(),
                label,
            });
        }

        entries.push(Entry::new(label, value, weight));
    }

    Ok(Validated { entries, dropped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ThresholdTable, ValidRange};

    fn permissive() -> EngineOptions {
        EngineOptions::permissive(ThresholdTable::empty("n/a"))
    }

    fn strict() -> EngineOptions {
        EngineOptions::strict(ValidRange::PERCENT, ThresholdTable::empty("n/a"))
    }

    #[test]
    fn test_permissive_drops_unparsable_rows() {
        let raw = vec![
            RawEntry::new(Some("Quiz"), "90", "20"),
            RawEntry::new(Some("Exam"), "abc", "30"),
            RawEntry::new(None, "85", ""),
        ];
        let validated = validate_entries(&raw, &permissive()).unwrap();
        assert_eq!(validated.entries, vec![Entry::new("Quiz", 90.0, 20.0)]);
        assert_eq!(validated.dropped, 2);
    }

    #[test]
    fn test_permissive_empty_is_insufficient() {
        let result = validate_entries(&[], &permissive());
        assert_eq!(result, Err(EngineError::InsufficientInput));
    }

    #[test]
    fn test_permissive_all_dropped_is_insufficient() {
        let raw = vec![RawEntry::new(None, "", ""), RawEntry::new(None, "x", "1")];
        let result = validate_entries(&raw, &permissive());
        assert_eq!(result, Err(EngineError::InsufficientInput));
    }

    #[test]
    fn test_permissive_applies_declared_constraints() {
        let options = permissive()
            .with_valid_range(Some(ValidRange::PERCENT))
            .with_positive_weights(true);
        let raw = vec![
            RawEntry::new(None, "120", "1"),
            RawEntry::new(None, "80", "0"),
            RawEntry::new(None, "80", "2"),
        ];
        let validated = validate_entries(&raw, &options).unwrap();
        assert_eq!(validated.entries, vec![Entry::new("Entry 3", 80.0, 2.0)]);
        assert_eq!(validated.dropped, 2);
    }

    #[test]
    fn test_permissive_keeps_zero_weight_without_constraint() {
        let raw = vec![RawEntry::new(None, "80", "0")];
        let validated = validate_entries(&raw, &permissive()).unwrap();
        assert_eq!(validated.entries.len(), 1);
    }

    #[test]
    fn test_strict_skips_incomplete_rows() {
        let raw = vec![
            RawEntry::new(Some("Math"), "90", "3"),
            RawEntry::new(None, "", ""),
            RawEntry::new(Some("English"), "", "2"),
        ];
        let validated = validate_entries(&raw, &strict()).unwrap();
        assert_eq!(validated.entries, vec![Entry::new("Math", 90.0, 3.0)]);
        assert_eq!(validated.dropped, 2);
    }

    #[test]
    fn test_strict_rejects_out_of_range() {
        let raw = vec![
            RawEntry::new(Some("Math"), "90", "3"),
            RawEntry::new(Some("Physics"), "101", "3"),
        ];
        let result = validate_entries(&raw, &strict());
        assert_eq!(
            result,
            Err(EngineError::OutOfRangeValue {
                label: "Physics".to_string(),
                bound: ValidRange::PERCENT,
            })
        );
    }

    #[test]
    fn test_strict_rejects_non_positive_weight() {
        let raw = vec![RawEntry::new(Some("PE"), "95", "0")];
        let result = validate_entries(&raw, &strict());
        assert_eq!(
            result,
            Err(EngineError::NonPositiveWeight {
                noun: "Weight".to_string(),
                label: "PE".to_string()
            })
        );
    }

    #[test]
    fn test_nouns_name_rows_and_weights() {
        let options = permissive().with_nouns("Course", "Credits");
        let validated = validate_entries(&[RawEntry::new(None, "3.5", "3")], &options).unwrap();
        assert_eq!(validated.entries[0].label, "Course 1");

        let options = strict().with_nouns("Subject", "Units");
        let err = validate_entries(&[RawEntry::new(Some("PE"), "95", "0")], &options).unwrap_err();
        assert_eq!(err.to_string(), "Units for PE must be a positive number.");
    }

    #[test]
    fn test_strict_rejects_unparsable_weight() {
        let raw = vec![RawEntry::new(Some("Math"), "90", "three")];
        let result = validate_entries(&raw, &strict());
        assert_eq!(
            result,
            Err(EngineError::UnparsableNumber {
                field: Field::Weight,
                label: "Math".to_string()
            })
        );
    }

    #[test]
    fn test_strict_first_offender_wins() {
        let raw = vec![
            RawEntry::new(Some("A"), "-1", "3"),
            RawEntry::new(Some("B"), "90", "-2"),
        ];
        let err = validate_entries(&raw, &strict()).unwrap_err();
        assert!(matches!(err, EngineError::OutOfRangeValue { ref label, .. } if label == "A"));
    }

    #[test]
    fn test_strict_range_is_inclusive() {
        let raw = vec![
            RawEntry::new(Some("Low"), "0", "1"),
            RawEntry::new(Some("High"), "100", "1"),
        ];
        assert_eq!(validate_entries(&raw, &strict()).unwrap().entries.len(), 2);
    }
}
