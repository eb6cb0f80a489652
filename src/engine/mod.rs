pub mod average;
pub mod bound;
pub mod classify;
pub mod convert;
pub mod entry;
pub mod error;
pub mod options;
pub mod solver;
pub mod validation;

pub use average::{compute_weighted_average, round2, weighted_totals, Totals, WeightedResult};
pub use bound::{Bound, Direction};
pub use classify::{classify, Category, ThresholdTable};
pub use convert::{convert_scale, Conversion, Scale, ScaleConverter, StepTable};
pub use entry::{parse_number, Entry, RawEntry};
pub use error::{EngineError, Field};
pub use options::{EngineOptions, Mode, ValidRange};
pub use solver::{projected_grade, solve_required_score, SolverResult};
pub use validation::{validate_entries, Validated};
