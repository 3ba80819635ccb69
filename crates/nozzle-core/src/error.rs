//! Error types for nozzle-core.
//!
//! The reference parameter set never fails; these errors surface when
//! parameters come from a file or are built by hand.

use thiserror::Error;

/// Result type alias for nozzle-core operations.
pub type Result<T> = std::result::Result<T, NozzleError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NozzleError {
    /// A parameter is outside the domain the formulas accept.
    #[error("Invalid parameter '{field}': {value} - {reason}")]
    InvalidParameter {
        field: String,
        value: String,
        reason: String,
    },

    /// A parameter file could not be read or parsed.
    #[error("Config error on '{path}': {reason}")]
    Config { path: String, reason: String },
}

impl NozzleError {
    pub(crate) fn invalid(field: &str, value: impl ToString, reason: &str) -> Self {
        NozzleError::InvalidParameter {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = NozzleError::invalid("length", 0.0, "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'length': 0 - must be positive"
        );
    }
}
