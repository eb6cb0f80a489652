use serde::Serialize;
use tracing::debug;

use super::classify::Category;
use super::entry::{Entry, RawEntry};
use super::error::EngineError;
use super::options::EngineOptions;
use super::validation::validate_entries;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedResult {
    /// Rounded to 2 decimal places, half-up.
    pub weighted_average: f64,
    /// Full-precision quotient, for callers that keep computing.
    pub raw_average: f64,
    pub total_weight: f64,
    pub weighted_sum: f64,
    pub entries: Vec<Entry>,
    /// Raw rows discarded before computing.
    pub dropped: usize,
    pub category: Category,
}

/// Validate `raw` under `options`, then reduce the surviving entries to a
/// weighted mean and classify the rounded mean with `options.tiers`.
pub fn compute_weighted_average(
    raw: &[RawEntry],
    options: &EngineOptions,
) -> Result<WeightedResult, EngineError> {
    let validated = validate_entries(raw, options)?;
    let totals = weighted_totals(&validated.entries)?;

    let weighted_average = round2(totals.mean);
    let category = options.tiers.classify(weighted_average);
    debug!(
        entries = validated.entries.len(),
        total_weight = totals.total_weight,
        weighted_average,
        tier = category.tier,
        "computed weighted average"
    );

    Ok(WeightedResult {
        weighted_average,
        raw_average: totals.mean,
        total_weight: totals.total_weight,
        weighted_sum: totals.weighted_sum,
        entries: validated.entries,
        dropped: validated.dropped,
        category,
    })
}

/// `sum(value * weight)`, `sum(weight)` and their quotient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub weighted_sum: f64,
    pub total_weight: f64,
    pub mean: f64,
}

/// Single left-to-right pass over already validated entries.
pub fn weighted_totals(entries: &[Entry]) -> Result<Totals, EngineError> {
    if entries.is_empty() {
        return Err(EngineError::InsufficientInput);
    }

    let (weighted_sum, total_weight) = entries
        .iter()
        .fold((0.0, 0.0), |(sum, weight), e| {
            (sum + e.weighted_value(), weight + e.weight)
        });

    if total_weight == 0.0 {
        return Err(EngineError::ZeroTotalWeight);
    }

    Ok(Totals {
        weighted_sum,
        total_weight,
        mean: weighted_sum / total_weight,
    })
}

/// Round to 2 decimal places, ties toward positive infinity.
pub fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn entries() -> impl Strategy<Value = Vec<Entry>> {
        prop::collection::vec((0.0..100.0f64, 0.5..10.0f64), 1..20).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(value, weight)| Entry::new("", value, weight))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn average_ignores_entry_order(entries in entries()) {
            let forward = weighted_totals(&entries).unwrap();
            let mut reversed = entries.clone();
            reversed.reverse();
            let backward = weighted_totals(&reversed).unwrap();
            prop_assert!((forward.mean - backward.mean).abs() < 1e-9);
        }

        #[test]
        fn equal_weights_give_arithmetic_mean(
            values in prop::collection::vec(0.0..100.0f64, 1..20),
            weight in 0.5..10.0f64,
        ) {
            let entries: Vec<Entry> = values.iter().map(|v| Entry::new("", *v, weight)).collect();
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            prop_assert!((weighted_totals(&entries).unwrap().mean - mean).abs() < 1e-9);
        }

        #[test]
        fn average_stays_within_value_bounds(entries in entries()) {
            let mean = weighted_totals(&entries).unwrap().mean;
            let min = entries.iter().map(|e| e.value).fold(f64::INFINITY, f64::min);
            let max = entries.iter().map(|e| e.value).fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(mean >= min - 1e-9 && mean <= max + 1e-9);
        }
    }
}
