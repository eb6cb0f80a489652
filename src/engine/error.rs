use serde::Serialize;
use std::fmt;
use thiserror::Error;

use super::convert::Scale;
use super::options::ValidRange;

/// Which half of an entry failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Value,
    Weight,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Value => write!(f, "Grade"),
            Field::Weight => write!(f, "Weight"),
        }
    }
}

/// Every way a calculation can be rejected. All variants are recoverable;
/// the messages are written to be shown to the person who typed the input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Please fill in at least one complete entry.")]
    InsufficientInput,

    #[error("Grade for {label} must be a number between {bound}.")]
    OutOfRangeValue { label: String, bound: ValidRange },

    #[error("{noun} for {label} must be a positive number.")]
    NonPositiveWeight { noun: String, label: String },

    #[error("Total weight is zero, so no average can be computed.")]
    ZeroTotalWeight,

    #[error("{field} for {label} is not a valid number.")]
    UnparsableNumber { field: Field, label: String },

    #[error("Converting from {from} to {to} is not supported.")]
    UnsupportedConversion { from: Scale, to: Scale },
}

impl EngineError {
    /// Short machine-readable tag, used by the JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::InsufficientInput => "insufficient_input",
            EngineError::OutOfRangeValue { .. } => "out_of_range_value",
            EngineError::NonPositiveWeight { .. } => "non_positive_weight",
            EngineError::ZeroTotalWeight => "zero_total_weight",
            EngineError::UnparsableNumber { .. } => "unparsable_number",
            EngineError::UnsupportedConversion { .. } => "unsupported_conversion",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message_names_label_and_bounds() {
        let err = EngineError::OutOfRangeValue {
            label: "Math".to_string(),
            bound: ValidRange::new(0.0, 100.0),
        };
        assert_eq!(
            err.to_string(),
            "Grade for Math must be a number between 0 and 100."
        );
    }

    #[test]
    fn test_unparsable_message_names_field() {
        let err = EngineError::UnparsableNumber {
            field: Field::Weight,
            label: "English".to_string(),
        };
        assert_eq!(err.to_string(), "Weight for English is not a valid number.");
        assert_eq!(err.kind(), "unparsable_number");
    }

    #[test]
    fn test_non_positive_weight_message_uses_noun() {
        let err = EngineError::NonPositiveWeight {
            noun: "Units".to_string(),
            label: "PE".to_string(),
        };
        assert_eq!(err.to_string(), "Units for PE must be a positive number.");
    }

    #[test]
    fn test_unsupported_conversion_message() {
        let err = EngineError::UnsupportedConversion {
            from: Scale::Philippine,
            to: Scale::Percentage,
        };
        assert_eq!(
            err.to_string(),
            "Converting from philippine to percentage is not supported."
        );
    }
}
