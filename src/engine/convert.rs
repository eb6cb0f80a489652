use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::average::round2;
use super::bound::{first_match, Bound};
use super::error::{EngineError, Field};
use super::options::ValidRange;

/// Grading scales the converter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scale {
    /// 0-100
    Percentage,
    /// 0-10 CGPA
    TenPoint,
    /// 0-5 CGPA
    FivePoint,
    /// 0-4 GPA
    FourPoint,
    /// Philippine 1.0-5.0, where 1.0 is the best grade
    Philippine,
}

impl Scale {
    pub fn range(&self) -> ValidRange {
        match self {
            Scale::Percentage => ValidRange::PERCENT,
            Scale::TenPoint => ValidRange::new(0.0, 10.0),
            Scale::FivePoint => ValidRange::new(0.0, 5.0),
            Scale::FourPoint => ValidRange::new(0.0, 4.0),
            Scale::Philippine => ValidRange::new(1.0, 5.0),
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scale::Percentage => "percentage",
            Scale::TenPoint => "ten-point",
            Scale::FivePoint => "five-point",
            Scale::FourPoint => "four-point",
            Scale::Philippine => "philippine",
        };
        f.write_str(name)
    }
}

/// Accepts the canonical names as well as the labels the calculators show
/// ("100", "10", "5", "4.0", "1.0-5.0").
impl FromStr for Scale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "percentage" | "percent" | "100" | "%" => Ok(Scale::Percentage),
            "ten-point" | "10" | "10.0" => Ok(Scale::TenPoint),
            "five-point" | "5" | "5.0" => Ok(Scale::FivePoint),
            "four-point" | "4" | "4.0" => Ok(Scale::FourPoint),
            "philippine" | "gwa" | "1.0-5.0" | "1-5" => Ok(Scale::Philippine),
            other => Err(format!(
                "unknown scale '{}' (expected percentage, ten-point, five-point, four-point or philippine)",
                other
            )),
        }
    }
}

/// Ordered `(bound, output)` steps; the first step whose bound accepts the
/// input wins and `otherwise` catches everything past the last step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepTable {
    steps: Vec<(Bound, f64)>,
    otherwise: f64,
}

impl StepTable {
    pub fn new(steps: Vec<(Bound, f64)>, otherwise: f64) -> Self {
        Self { steps, otherwise }
    }

    pub fn lookup(&self, value: f64) -> f64 {
        first_match(value, &self.steps)
            .map(|(_, out)| *out)
            .unwrap_or(self.otherwise)
    }

    pub fn steps(&self) -> &[(Bound, f64)] {
        &self.steps
    }

    /// Philippine 1.0-5.0 GWA to 4.0 GPA, scanned from 1.0 upward.
    pub fn philippine_to_four_point() -> Self {
        let cuts = [
            (1.0, 4.0),
            (1.25, 3.75),
            (1.5, 3.5),
            (1.75, 3.25),
            (2.0, 3.0),
            (2.25, 2.75),
            (2.5, 2.5),
            (2.75, 2.25),
            (3.0, 2.0),
        ];
        Self::new(
            cuts.iter().map(|(c, o)| (Bound::AtMost(*c), *o)).collect(),
            0.0,
        )
    }

    /// 4.0 GPA to Philippine 1.0-5.0 GWA, scanned from 4.0 downward.
    pub fn four_point_to_philippine() -> Self {
        let cuts = [
            (3.75, 1.0),
            (3.5, 1.25),
            (3.25, 1.5),
            (3.0, 1.75),
            (2.75, 2.0),
            (2.5, 2.25),
            (2.25, 2.5),
            (2.0, 2.75),
            (1.0, 3.0),
        ];
        Self::new(
            cuts.iter().map(|(c, o)| (Bound::AtLeast(*c), *o)).collect(),
            5.0,
        )
    }

    /// Percentage to 4.0 GPA, scanned from 100 downward.
    pub fn percentage_to_four_point() -> Self {
        let cuts = [
            (97.0, 4.0),
            (93.0, 3.7),
            (90.0, 3.3),
            (87.0, 3.0),
            (83.0, 2.7),
            (80.0, 2.3),
            (77.0, 2.0),
            (73.0, 1.7),
            (70.0, 1.3),
            (60.0, 1.0),
        ];
        Self::new(
            cuts.iter().map(|(c, o)| (Bound::AtLeast(*c), *o)).collect(),
            0.0,
        )
    }
}

/// How one scale maps onto another.
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion {
    Identity,
    /// `value * factor`, clamped to 0-100.
    Multiply(f64),
    /// `value / scale_max * 100`, clamped to 0-100.
    Proportion(f64),
    Steps(StepTable),
}

impl Conversion {
    pub fn apply(&self, value: f64) -> f64 {
        let out = match self {
            Conversion::Identity => value,
            Conversion::Multiply(factor) => (value * factor).clamp(0.0, 100.0),
            Conversion::Proportion(max) => (value / max * 100.0).clamp(0.0, 100.0),
            Conversion::Steps(table) => table.lookup(value),
        };
        round2(out)
    }
}

/// Scale conversions with the institution-specific constants exposed as
/// data. These are estimates, not official equivalences.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleConverter {
    ten_point_factor: f64,
}

impl Default for ScaleConverter {
    fn default() -> Self {
        Self {
            ten_point_factor: Self::DEFAULT_TEN_POINT_FACTOR,
        }
    }
}

impl ScaleConverter {
    pub const DEFAULT_TEN_POINT_FACTOR: f64 = 9.5;

    pub fn with_ten_point_factor(factor: f64) -> Self {
        Self {
            ten_point_factor: factor,
        }
    }

    pub fn ten_point_factor(&self) -> f64 {
        self.ten_point_factor
    }

    pub fn conversion(&self, from: Scale, to: Scale) -> Option<Conversion> {
        use Scale::*;
        match (from, to) {
            (a, b) if a == b => Some(Conversion::Identity),
            (TenPoint, Percentage) => Some(Conversion::Multiply(self.ten_point_factor)),
            (FourPoint, Percentage) => Some(Conversion::Proportion(4.0)),
            (FivePoint, Percentage) => Some(Conversion::Proportion(5.0)),
            (Philippine, FourPoint) => Some(Conversion::Steps(StepTable::philippine_to_four_point())),
            (FourPoint, Philippine) => Some(Conversion::Steps(StepTable::four_point_to_philippine())),
            (Percentage, FourPoint) => Some(Conversion::Steps(StepTable::percentage_to_four_point())),
            _ => None,
        }
    }

    pub fn convert(&self, value: f64, from: Scale, to: Scale) -> Result<f64, EngineError> {
        if !value.is_finite() {
            return Err(EngineError::UnparsableNumber {
                field: Field::Value,
                label: from.to_string(),
            });
        }
        let conversion = self
            .conversion(from, to)
            .ok_or(EngineError::UnsupportedConversion { from, to })?;
        let converted = conversion.apply(value);
        debug!(%from, %to, value, converted, "converted scale");
        Ok(converted)
    }
}

/// Convert with the default constants.
pub fn convert_scale(value: f64, from: Scale, to: Scale) -> Result<f64, EngineError> {
    ScaleConverter::default().convert(value, from, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_point_cgpa_to_percentage() {
        assert_eq!(convert_scale(7.8, Scale::TenPoint, Scale::Percentage).unwrap(), 74.1);
    }

    #[test]
    fn test_ten_point_clamps_at_hundred() {
        assert_eq!(convert_scale(10.0, Scale::TenPoint, Scale::Percentage).unwrap(), 95.0);
        let generous = ScaleConverter::with_ten_point_factor(11.0);
        assert_eq!(generous.convert(10.0, Scale::TenPoint, Scale::Percentage).unwrap(), 100.0);
    }

    #[test]
    fn test_negative_input_clamps_at_zero() {
        assert_eq!(convert_scale(-1.0, Scale::FourPoint, Scale::Percentage).unwrap(), 0.0);
    }

    #[test]
    fn test_four_and_five_point_proportions() {
        assert_eq!(convert_scale(3.0, Scale::FourPoint, Scale::Percentage).unwrap(), 75.0);
        assert_eq!(convert_scale(4.2, Scale::FivePoint, Scale::Percentage).unwrap(), 84.0);
    }

    #[test]
    fn test_philippine_to_four_point() {
        assert_eq!(convert_scale(2.0, Scale::Philippine, Scale::FourPoint).unwrap(), 3.0);
        assert_eq!(convert_scale(1.0, Scale::Philippine, Scale::FourPoint).unwrap(), 4.0);
        assert_eq!(convert_scale(1.1, Scale::Philippine, Scale::FourPoint).unwrap(), 3.75);
        assert_eq!(convert_scale(3.0, Scale::Philippine, Scale::FourPoint).unwrap(), 2.0);
        assert_eq!(convert_scale(5.0, Scale::Philippine, Scale::FourPoint).unwrap(), 0.0);
    }

    #[test]
    fn test_four_point_to_philippine() {
        assert_eq!(convert_scale(4.0, Scale::FourPoint, Scale::Philippine).unwrap(), 1.0);
        assert_eq!(convert_scale(3.0, Scale::FourPoint, Scale::Philippine).unwrap(), 1.75);
        assert_eq!(convert_scale(1.5, Scale::FourPoint, Scale::Philippine).unwrap(), 3.0);
        assert_eq!(convert_scale(0.5, Scale::FourPoint, Scale::Philippine).unwrap(), 5.0);
    }

    #[test]
    fn test_percentage_to_four_point() {
        assert_eq!(convert_scale(97.0, Scale::Percentage, Scale::FourPoint).unwrap(), 4.0);
        assert_eq!(convert_scale(88.0, Scale::Percentage, Scale::FourPoint).unwrap(), 3.0);
        assert_eq!(convert_scale(60.0, Scale::Percentage, Scale::FourPoint).unwrap(), 1.0);
        assert_eq!(convert_scale(59.9, Scale::Percentage, Scale::FourPoint).unwrap(), 0.0);
    }

    #[test]
    fn test_identity() {
        assert_eq!(convert_scale(2.346, Scale::Philippine, Scale::Philippine).unwrap(), 2.35);
    }

    #[test]
    fn test_unsupported_pair() {
        assert_eq!(
            convert_scale(2.0, Scale::Philippine, Scale::Percentage),
            Err(EngineError::UnsupportedConversion {
                from: Scale::Philippine,
                to: Scale::Percentage
            })
        );
    }

    #[test]
    fn test_non_finite_input() {
        assert!(matches!(
            convert_scale(f64::NAN, Scale::TenPoint, Scale::Percentage),
            Err(EngineError::UnparsableNumber { .. })
        ));
    }

    #[test]
    fn test_scale_from_str() {
        assert_eq!("1.0-5.0".parse::<Scale>().unwrap(), Scale::Philippine);
        assert_eq!("4.0".parse::<Scale>().unwrap(), Scale::FourPoint);
        assert_eq!("Percentage".parse::<Scale>().unwrap(), Scale::Percentage);
        assert_eq!("10".parse::<Scale>().unwrap(), Scale::TenPoint);
        assert!("7".parse::<Scale>().is_err());
    }
}
