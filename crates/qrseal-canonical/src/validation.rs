use thiserror::Error;

/// Validation errors for payload inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty after trimming whitespace.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Field name that failed validation.
        field: &'static str,
    },
    /// A value required by the selected options was not supplied.
    #[error("{field} is required")]
    MissingField {
        /// Field name that is missing.
        field: &'static str,
    },
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// When a numeric value exceeds its bounds.
    #[error("{field} ({value}) is out of bounds")]
    OutOfBounds {
        /// Field name that is out of bounds.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// When a date-time is not RFC 3339 with an explicit offset.
    #[error("{field} ('{value}') is not an RFC 3339 date-time with offset")]
    InvalidDateTime {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
}
