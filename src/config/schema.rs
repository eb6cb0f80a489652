use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::engine::{Bound, ScaleConverter, ThresholdTable, ValidRange};
use crate::tools::{presets, LetterGrades};

/// Overrides for the built-in calculator tables. Every section is optional;
/// anything left out keeps its built-in value.
///
/// Example YAML:
/// ```yaml
/// gwa:
///   valid_range: { min: 0, max: 100 }
///   tiers:
///     bands:
///       - { range: ">=90", label: "Excellent" }
///       - { range: ">=75", label: "Passing" }
///     otherwise: "Failing"
/// cgpa:
///   ten_point_factor: 9.5
/// semester:
///   letter_grades: { "A": 4.0, "B": 3.0, "C": 2.0 }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gwa: Option<AveragingConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weighted: Option<AveragingConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average: Option<AveragingConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<SemesterConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cgpa: Option<CgpaConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_grade: Option<FinalGradeConfig>,
}

impl Config {
    /// Every section filled in with the built-in values. This is what
    /// `gradecalc init` writes out.
    pub fn builtin() -> Self {
        Self {
            gwa: Some(AveragingConfig {
                valid_range: Some(presets::GWA_RANGE),
                tiers: Some(TierConfig::from_table(&presets::average_tiers())),
            }),
            weighted: Some(AveragingConfig {
                valid_range: None,
                tiers: Some(TierConfig::from_table(&presets::average_tiers())),
            }),
            average: Some(AveragingConfig {
                valid_range: None,
                tiers: Some(TierConfig::from_table(&presets::average_tiers())),
            }),
            semester: Some(SemesterConfig {
                tiers: Some(TierConfig::from_table(&presets::honors_tiers())),
                letter_grades: Some(LetterGrades::default().as_map().clone()),
            }),
            cgpa: Some(CgpaConfig {
                ten_point_factor: Some(ScaleConverter::DEFAULT_TEN_POINT_FACTOR),
                tiers: Some(TierConfig::from_table(&presets::percentage_tiers())),
            }),
            final_grade: Some(FinalGradeConfig {
                tiers: Some(TierConfig::from_table(&presets::solver_bands())),
            }),
        }
    }
}

/// Settings shared by the tools that average a list of grades.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AveragingConfig {
    /// Grades outside this range are rejected (GWA) or skipped (others).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_range: Option<ValidRange>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiers: Option<TierConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SemesterConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiers: Option<TierConfig>,

    /// Letter grade to grade points, e.g. `{ "A": 4.0, "B+": 3.3 }`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_grades: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CgpaConfig {
    /// Percentage = CGPA x factor on the 10-point scale (default: 9.5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ten_point_factor: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiers: Option<TierConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FinalGradeConfig {
    /// Bands for the required score; use `<=` ranges, best band first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiers: Option<TierConfig>,
}

/// Threshold table as written in YAML.
///
/// Range format: ">=N", ">N", "<=N", "<N". Bands are checked top-down and
/// the first match wins.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TierConfig {
    pub bands: Vec<TierBand>,
    pub otherwise: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TierBand {
    pub range: String,
    pub label: String,
}

impl TierConfig {
    pub fn to_table(&self) -> Result<ThresholdTable> {
        let bands = self
            .bands
            .iter()
            .map(|band| Ok((Bound::parse(&band.range)?, band.label.clone())))
            .collect::<Result<Vec<_>>>()?;
        Ok(ThresholdTable::new(bands, self.otherwise.clone()))
    }

    pub fn from_table(table: &ThresholdTable) -> Self {
        Self {
            bands: table
                .bands()
                .iter()
                .map(|(bound, label)| TierBand {
                    range: bound.to_string(),
                    label: label.clone(),
                })
                .collect(),
            otherwise: table.otherwise().to_string(),
        }
    }
}
