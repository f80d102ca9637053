//! Error types for motion-core.
//!
//! The inference algorithm itself never fails: angles wrap and magnitudes are
//! taken as given. Errors only arise at the API boundary, when an input cannot
//! participate in the rounding steps at all (`NaN`, `∞`), when it would carry
//! a coordinate outside `i32`, or when a tunable is out of range.

/// Severity level of an error, used for categorization by callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, should not retry without changes.
    Validation,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
        }
    }
}

/// Common interface for errors surfaced by this crate.
pub trait MotionFault: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Names the argument that carried an invalid value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum InputKind {
    X,
    Y,
    Angle,
    Magnitude,
    MagnitudeX,
    MagnitudeY,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum MotionError {
    #[error("{input} must be finite, got {value}")]
    NonFinite { input: InputKind, value: f64 },

    #[error("{input} of {value} would move outside the i32 pixel range")]
    OutOfRange { input: InputKind, value: f64 },

    #[error("config field {field} must be finite and positive, got {value}")]
    InvalidConfig { field: &'static str, value: f64 },
}

impl MotionError {
    /// Returns `value` unchanged if it is finite.
    pub(crate) fn check_finite(input: InputKind, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NonFinite { input, value })
        }
    }
}

impl MotionFault for MotionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NonFinite { .. } | Self::OutOfRange { .. } | Self::InvalidConfig { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NonFinite { .. } => "MOTION_NON_FINITE_INPUT",
            Self::OutOfRange { .. } => "MOTION_OUT_OF_RANGE",
            Self::InvalidConfig { .. } => "MOTION_INVALID_CONFIG",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_finite_passes_through_finite_values() {
        assert_eq!(MotionError::check_finite(InputKind::Angle, 1.5), Ok(1.5));
        assert_eq!(MotionError::check_finite(InputKind::X, -0.0), Ok(-0.0));
    }

    #[test]
    fn check_finite_names_the_input() {
        let err = MotionError::check_finite(InputKind::MagnitudeY, f64::INFINITY).unwrap_err();
        assert_eq!(err.to_string(), "magnitude_y must be finite, got inf");
        assert_eq!(err.error_code(), "MOTION_NON_FINITE_INPUT");
        assert_eq!(err.severity().as_str(), "validation");
    }

    #[test]
    fn out_of_range_names_the_input() {
        let err = MotionError::OutOfRange {
            input: InputKind::X,
            value: 3e9,
        };
        assert_eq!(
            err.to_string(),
            "x of 3000000000 would move outside the i32 pixel range"
        );
        assert_eq!(err.error_code(), "MOTION_OUT_OF_RANGE");
    }
}
