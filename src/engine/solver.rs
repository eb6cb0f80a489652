use serde::Serialize;

use super::average::round2;
use super::classify::{Category, ThresholdTable};

/// Score needed on the remaining component to finish at `target`.
///
/// `weight` is the remaining component's share as a fraction (0-1]; the
/// current grade implicitly carries `1 - weight`. The raw quotient is
/// returned even when it exceeds the scale maximum or is negative.
pub fn solve_required_score(current: f64, weight: f64, target: f64) -> f64 {
    (target - current * (1.0 - weight)) / weight
}

/// Overall grade after scoring `component` on the remaining share.
pub fn projected_grade(current: f64, weight: f64, component: f64) -> f64 {
    current * (1.0 - weight) + component * weight
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolverResult {
    pub current: f64,
    /// Fraction, not percent.
    pub weight: f64,
    pub target: f64,
    pub required: f64,
    pub required_rounded: f64,
    pub band: Category,
}

impl SolverResult {
    /// Solve and classify the rounded requirement with an ascending band table.
    pub fn solve(current: f64, weight: f64, target: f64, bands: &ThresholdTable) -> Self {
        let required = solve_required_score(current, weight, target);
        let required_rounded = round2(required);
        Self {
            current,
            weight,
            target,
            required,
            required_rounded,
            band: bands.classify(required_rounded),
        }
    }
}
