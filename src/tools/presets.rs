//! Built-in tables for each calculator. Everything here can be overridden
//! from the config file.

use crate::engine::{ThresholdTable, ValidRange};

/// Grades accepted by the GWA calculator.
pub const GWA_RANGE: ValidRange = ValidRange::PERCENT;

/// Messages shown under a 0-100 average (GWA, weighted grade, grade average).
pub fn average_tiers() -> ThresholdTable {
    ThresholdTable::at_least(
        &[
            (90.0, "Excellent! Keep up the great work!"),
            (80.0, "Good job! You're doing well!"),
            (70.0, "Fair performance. There's room for improvement!"),
        ],
        "Keep working hard. You can do better!",
    )
}

/// Categories for a converted CGPA percentage.
pub fn percentage_tiers() -> ThresholdTable {
    ThresholdTable::at_least(
        &[
            (90.0, "Excellent"),
            (80.0, "Very Good"),
            (70.0, "Good"),
            (60.0, "Above Average"),
            (50.0, "Average"),
        ],
        "Below Average",
    )
}

/// Latin-honors style bands on a 4.0 GPA.
pub fn honors_tiers() -> ThresholdTable {
    ThresholdTable::at_least(
        &[(3.4, "First Honors"), (3.0, "Second Honors")],
        "No Honors",
    )
}

/// Bands for the final-exam requirement; lower is better.
pub fn solver_bands() -> ThresholdTable {
    ThresholdTable::at_most(
        &[
            (0.0, "Target already secured"),
            (100.0, "Achievable with good preparation!"),
            (110.0, "Very challenging but possible"),
        ],
        "May not be achievable - consider other options",
    )
}
