use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::letter::LetterGrades;
use super::presets;
use super::{ConversionResult, Report, Tool};
use crate::config::{AveragingConfig, Config, TierConfig};
use crate::engine::{
    compute_weighted_average, parse_number, EngineError, EngineOptions, Field, RawEntry, Scale,
    ScaleConverter, SolverResult, ThresholdTable, ValidRange,
};

/// Every calculator, configured and ready to run.
///
/// Holds only immutable configuration; each call is an independent pure
/// computation.
#[derive(Debug, Clone, PartialEq)]
pub struct Toolkit {
    gwa: EngineOptions,
    weighted: EngineOptions,
    average: EngineOptions,
    semester: EngineOptions,
    letters: LetterGrades,
    converter: ScaleConverter,
    percentage_tiers: ThresholdTable,
    solver_bands: ThresholdTable,
}

impl Default for Toolkit {
    fn default() -> Self {
        Self {
            gwa: EngineOptions::strict(presets::GWA_RANGE, presets::average_tiers())
                .with_nouns("Subject", "Units"),
            weighted: EngineOptions::permissive(presets::average_tiers())
                .with_nouns("Assignment", "Weight"),
            average: EngineOptions::permissive(presets::average_tiers())
                .with_nouns("Subject", "Weight"),
            semester: EngineOptions::permissive(presets::honors_tiers())
                .with_nouns("Course", "Credits"),
            letters: LetterGrades::default(),
            converter: ScaleConverter::default(),
            percentage_tiers: presets::percentage_tiers(),
            solver_bands: presets::solver_bands(),
        }
    }
}

impl Toolkit {
    /// Apply config overrides on top of the built-in tables.
    ///
    /// Expects a config that already passed
    /// [`validate_config`](crate::config::validate_config); a table that
    /// fails to parse here is still reported as an error.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut kit = Self::default();

        apply_averaging(&mut kit.gwa, config.gwa.as_ref(), "gwa")?;
        apply_averaging(&mut kit.weighted, config.weighted.as_ref(), "weighted")?;
        apply_averaging(&mut kit.average, config.average.as_ref(), "average")?;

        if let Some(ref semester) = config.semester {
            if let Some(ref tiers) = semester.tiers {
                kit.semester.tiers = table(tiers, "semester")?;
            }
            if let Some(ref letters) = semester.letter_grades {
                kit.letters = LetterGrades::from_map(letters.clone());
            }
        }

        if let Some(ref cgpa) = config.cgpa {
            if let Some(factor) = cgpa.ten_point_factor {
                kit.converter = ScaleConverter::with_ten_point_factor(factor);
            }
            if let Some(ref tiers) = cgpa.tiers {
                kit.percentage_tiers = table(tiers, "cgpa")?;
            }
        }

        if let Some(ref final_grade) = config.final_grade {
            if let Some(ref tiers) = final_grade.tiers {
                kit.solver_bands = table(tiers, "final_grade")?;
            }
        }

        Ok(kit)
    }

    /// GWA: strict validation, grades 0-100, positive units.
    pub fn gwa(&self, rows: &[RawEntry]) -> Result<Report, EngineError> {
        let result = compute_weighted_average(rows, &self.gwa)?;
        Ok(Report::Average {
            tool: Tool::Gwa,
            result,
        })
    }

    /// Weighted grade: rows that do not parse are skipped.
    pub fn weighted_grade(&self, rows: &[RawEntry]) -> Result<Report, EngineError> {
        let result = compute_weighted_average(rows, &self.weighted)?;
        Ok(Report::Average {
            tool: Tool::WeightedGrade,
            result,
        })
    }

    /// Simple mean: every grade carries weight 1. Each grade is written as
    /// `[NAME:]GRADE`.
    pub fn grade_average<S: AsRef<str>>(&self, grades: &[S]) -> Result<Report, EngineError> {
        let rows: Vec<RawEntry> = grades
            .iter()
            .map(|g| match g.as_ref().rsplit_once(':') {
                Some((label, value)) => RawEntry::new(Some(label), value, "1"),
                None => RawEntry::new(None, g.as_ref(), "1"),
            })
            .collect();
        let result = compute_weighted_average(&rows, &self.average)?;
        Ok(Report::Average {
            tool: Tool::GradeAverage,
            result,
        })
    }

    /// Semester GPA from letter grades and credit hours.
    pub fn semester_gpa(&self, rows: &[RawEntry]) -> Result<Report, EngineError> {
        let resolved: Vec<RawEntry> = rows.iter().map(|r| self.letters.resolve(r)).collect();
        let result = compute_weighted_average(&resolved, &self.semester)?;
        Ok(Report::Average {
            tool: Tool::SemesterGpa,
            result,
        })
    }

    /// CGPA on a 10, 5 or 4 point scale to a percentage.
    pub fn cgpa_to_percentage(&self, value: &str, scale: Scale) -> Result<Report, EngineError> {
        if !matches!(scale, Scale::TenPoint | Scale::FivePoint | Scale::FourPoint) {
            return Err(EngineError::UnsupportedConversion {
                from: scale,
                to: Scale::Percentage,
            });
        }
        let mut result = self.conversion(value, scale, Scale::Percentage)?;
        result.category = Some(self.percentage_tiers.classify(result.converted));
        Ok(Report::Conversion {
            tool: Tool::CgpaToPercentage,
            result,
        })
    }

    /// Table-driven conversion between GWA, GPA and percentage scales.
    pub fn convert(&self, value: &str, from: Scale, to: Scale) -> Result<Report, EngineError> {
        let result = self.conversion(value, from, to)?;
        Ok(Report::Conversion {
            tool: Tool::GwaToGpa,
            result,
        })
    }

    /// Score needed on the final exam. `weight_percent` is the exam's share
    /// of the overall grade, in percent.
    pub fn final_grade(
        &self,
        current: &str,
        weight_percent: &str,
        target: &str,
    ) -> Result<Report, EngineError> {
        let current = number(current, Field::Value, "current grade")?;
        let weight_percent = number(weight_percent, Field::Weight, "final exam")?;
        let target = number(target, Field::Value, "target grade")?;

        if weight_percent <= 0.0 {
            return Err(EngineError::NonPositiveWeight {
                noun: "Weight".to_string(),
                label: "final exam".to_string(),
            });
        }
        if weight_percent > 100.0 {
            return Err(EngineError::OutOfRangeValue {
                label: "final exam weight".to_string(),
                bound: ValidRange::PERCENT,
            });
        }

        let result = SolverResult::solve(current, weight_percent / 100.0, target, &self.solver_bands);
        debug!(required = result.required, band = %result.band.label, "solved final exam requirement");
        Ok(Report::Solver {
            tool: Tool::FinalGrade,
            result,
        })
    }

    fn conversion(&self, value: &str, from: Scale, to: Scale) -> Result<ConversionResult, EngineError> {
        let input = number(value, Field::Value, &from.to_string())?;
        if !from.range().contains(input) {
            warn!(%from, input, "value lies outside the scale; result is an extrapolation");
        }
        let converted = self.converter.convert(input, from, to)?;
        Ok(ConversionResult {
            input,
            from,
            to,
            converted,
            category: None,
        })
    }
}

fn number(s: &str, field: Field, label: &str) -> Result<f64, EngineError> {
    parse_number(s).ok_or_else(|| EngineError::UnparsableNumber {
        field,
        label: label.to_string(),
    })
}

fn table(tiers: &TierConfig, section: &str) -> Result<ThresholdTable> {
    tiers
        .to_table()
        .with_context(|| format!("{}.tiers: invalid threshold table", section))
}

fn apply_averaging(
    options: &mut EngineOptions,
    config: Option<&AveragingConfig>,
    section: &str,
) -> Result<()> {
    let Some(config) = config else {
        return Ok(());
    };
    if let Some(range) = config.valid_range {
        options.valid_range = Some(range);
    }
    if let Some(ref tiers) = config.tiers {
        options.tiers = table(tiers, section)?;
    }
    Ok(())
}
