pub mod letter;
pub mod presets;
mod toolkit;

pub use letter::LetterGrades;
pub use toolkit::Toolkit;

use serde::Serialize;

use crate::engine::{Category, Mode, Scale, SolverResult, WeightedResult};

/// The calculators offered, each a configuration of the shared engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    Gwa,
    WeightedGrade,
    GradeAverage,
    SemesterGpa,
    CgpaToPercentage,
    GwaToGpa,
    FinalGrade,
}

impl Tool {
    pub fn title(&self) -> &'static str {
        match self {
            Tool::Gwa => "GWA Calculator",
            Tool::WeightedGrade => "Weighted Grade Calculator",
            Tool::GradeAverage => "Grade Average Calculator",
            Tool::SemesterGpa => "Semester GPA Calculator",
            Tool::CgpaToPercentage => "CGPA to Percentage Calculator",
            Tool::GwaToGpa => "GWA to GPA Converter",
            Tool::FinalGrade => "Final Grade Calculator",
        }
    }

    /// Name of the headline number.
    pub fn result_label(&self) -> &'static str {
        match self {
            Tool::Gwa => "GWA",
            Tool::WeightedGrade => "Weighted Average",
            Tool::GradeAverage => "Average",
            Tool::SemesterGpa => "Semester GPA",
            Tool::CgpaToPercentage => "Percentage",
            Tool::GwaToGpa => "Converted Grade",
            Tool::FinalGrade => "Required Final Score",
        }
    }

    /// Heading for the list of rows in copied results.
    pub fn entry_heading(&self) -> &'static str {
        match self {
            Tool::Gwa | Tool::GradeAverage => "Subjects",
            Tool::SemesterGpa => "Courses",
            _ => "Grades",
        }
    }

    pub fn value_noun(&self) -> &'static str {
        match self {
            Tool::SemesterGpa => "Grade points",
            _ => "Grade",
        }
    }

    pub fn weight_noun(&self) -> &'static str {
        match self {
            Tool::Gwa => "Units",
            Tool::SemesterGpa => "Credits",
            _ => "Weight",
        }
    }

    /// How the tool treats bad rows. Only the GWA calculator rejects the
    /// whole batch.
    pub fn mode(&self) -> Mode {
        match self {
            Tool::Gwa => Mode::Strict,
            _ => Mode::Permissive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    pub input: f64,
    pub from: Scale,
    pub to: Scale,
    pub converted: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

/// Outcome of running one tool, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Average { tool: Tool, result: WeightedResult },
    Conversion { tool: Tool, result: ConversionResult },
    Solver { tool: Tool, result: SolverResult },
}

impl Report {
    pub fn tool(&self) -> Tool {
        match self {
            Report::Average { tool, .. }
            | Report::Conversion { tool, .. }
            | Report::Solver { tool, .. } => *tool,
        }
    }

    pub fn category(&self) -> Option<&Category> {
        match self {
            Report::Average { result, .. } => Some(&result.category),
            Report::Conversion { result, .. } => result.category.as_ref(),
            Report::Solver { result, .. } => Some(&result.band),
        }
    }
}
