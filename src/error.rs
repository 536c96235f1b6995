// Error taxonomy for the impact pipeline

use std::fmt;

/// Errors surfaced by the impact assessment pipeline.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ImpactError {
    /// An input was missing, out of range or not a finite number.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A formula produced a non-finite or non-positive value where a
    /// positive finite value is required.
    #[error("degenerate computation: {quantity} = {value}")]
    ComputationDegenerate { quantity: &'static str, value: f64 },

    /// The small-body catalog record could not be used.
    #[error("catalog record unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl ImpactError {
    pub fn validation(field: &'static str, reason: impl fmt::Display) -> Self {
        Self::Validation {
            field,
            reason: reason.to_string(),
        }
    }

    pub fn degenerate(quantity: &'static str, value: f64) -> Self {
        Self::ComputationDegenerate { quantity, value }
    }

    /// Name of the offending input field, for validation failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ImpactError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field() {
        let err = ImpactError::validation("angle_deg", "must be within [0, 90], got 95");
        assert_eq!(err.field(), Some("angle_deg"));
        assert_eq!(
            err.to_string(),
            "invalid angle_deg: must be within [0, 90], got 95"
        );
    }

    #[test]
    fn test_degenerate_has_no_field() {
        let err = ImpactError::degenerate("required_energy_j", 0.0);
        assert_eq!(err.field(), None);
        assert!(err.to_string().contains("required_energy_j"));
    }
}
