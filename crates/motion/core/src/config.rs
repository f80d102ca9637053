use crate::error::MotionError;

/// Tolerances and tunable parameters for position inference.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionConfig {
    /// Distance travelled on one angle before the error shadow is pulled
    /// fully onto the inferred line. Correction strength ramps quadratically
    /// up to this distance.
    pub correction_ramp: f64,

    /// Distance in pixels between the error shadow and the reported position
    /// at which the line is re-baselined.
    pub drift_threshold: f64,
}

impl MotionConfig {
    // ===== compile-time constants =====
    /// Decimal places used when comparing angles and slopes.
    pub const ANGLE_PRECISION: i32 = 3;
    /// Decimal places used to strip float error from positions.
    pub const POSITION_PRECISION: i32 = 5;
    /// Trig components smaller than this are treated as exactly zero.
    pub const TRIG_ZERO_EPS: f64 = 1e-3;
    /// Position tolerance matching `POSITION_PRECISION`.
    pub const POSITION_CORRECT_EPS: f64 = 1e-5;
    /// Pixels kept free between a moving coordinate and the `i32` limits.
    /// Line re-baselining may land a pixel or two past the travel itself.
    pub const EDGE_HEADROOM: f64 = 4.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CORRECTION_RAMP: f64 = 4.0;
    pub const DEFAULT_DRIFT_THRESHOLD: f64 = 1.0;

    pub fn new() -> Self {
        Self {
            correction_ramp: Self::DEFAULT_CORRECTION_RAMP,
            drift_threshold: Self::DEFAULT_DRIFT_THRESHOLD,
        }
    }

    #[must_use]
    pub fn with_correction_ramp(mut self, correction_ramp: f64) -> Self {
        self.correction_ramp = correction_ramp;
        self
    }

    #[must_use]
    pub fn with_drift_threshold(mut self, drift_threshold: f64) -> Self {
        self.drift_threshold = drift_threshold;
        self
    }

    /// Checks that every tunable is finite and strictly positive.
    pub fn validate(&self) -> Result<(), MotionError> {
        let fields = [
            ("correction_ramp", self.correction_ramp),
            ("drift_threshold", self.drift_threshold),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(MotionError::InvalidConfig { field, value });
            }
        }
        Ok(())
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self::new()
    }
}
