//! Line-inference strategy.
//!
//! Every straight run of same-angle movement is tracked as one continuous line
//! starting at an integer anchor. The dominant axis (the one the angle is
//! closest to) is derived directly from the distance travelled; the other axis
//! is a function of the dominant axis's *integer* position through the line's
//! slope. One dominant value therefore always maps to one secondary value,
//! which is what keeps shallow diagonals free of staircase plateaus.
//!
//! Truncating to the anchor side loses sub-pixel progress whenever a run is
//! restarted. An error shadow follows the raw, frame-by-frame displacement and
//! is pulled onto the line as the run lengthens; when the shadow's pixel and
//! the line's pixel disagree by at least [`MotionConfig::drift_threshold`], the
//! line is re-baselined at the shadow.

use core::f64::consts::{FRAC_PI_4, PI};

use crate::config::MotionConfig;
use crate::geometry::{
    angle_difference, infer_y_from_x, normalize_angle, raw_components, round_angle, round_position,
    round_towards, snap_to_cardinals, snapped_components,
};
use crate::position::Position;

use super::MovementStrategy;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearInference {
    anchor_x: f64,
    anchor_y: f64,
    /// Direction of the current run, in `[0, 2π)`.
    angle: f64,
    /// Distance travelled along `angle` since the anchor was set.
    delta: f64,
    /// Distance travelled since the angle last changed. Drives the
    /// correction ramp only.
    delta_on_angle: f64,
    error_x: f64,
    error_y: f64,
    config: MotionConfig,
}

impl LinearInference {
    pub fn new(position: Position, config: MotionConfig) -> Self {
        let (x, y) = position.as_f64();
        Self {
            anchor_x: x,
            anchor_y: y,
            angle: 0.0,
            delta: 0.0,
            delta_on_angle: 0.0,
            error_x: x,
            error_y: y,
            config,
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn delta_on_angle(&self) -> f64 {
        self.delta_on_angle
    }

    /// Continuous position the error shadow currently holds.
    pub fn error_shadow(&self) -> (f64, f64) {
        (self.error_x, self.error_y)
    }

    pub fn anchor(&self) -> Position {
        Position::new(self.anchor_x as i32, self.anchor_y as i32)
    }

    fn settle_at(&mut self, position: Position) {
        let (x, y) = position.as_f64();
        self.anchor_x = x;
        self.anchor_y = y;
        self.delta = 0.0;
    }

    /// Continuous point `delta` along the current line.
    fn line_point(&self) -> (f64, f64) {
        let (cos, sin) = snapped_components(self.angle);
        (
            self.anchor_x + cos * self.delta,
            self.anchor_y + sin * self.delta,
        )
    }

    /// The line's point truncated onto the grid on the anchor side.
    fn line_pixel(&self) -> (f64, f64) {
        let (x, y) = self.line_point();
        (
            round_towards(round_position(x), self.anchor_x),
            round_towards(round_position(y), self.anchor_y),
        )
    }

    fn shadow_pixel(&self) -> (f64, f64) {
        (
            round_towards(round_position(self.error_x), self.anchor_x),
            round_towards(round_position(self.error_y), self.anchor_y),
        )
    }

    fn direct_x(&self) -> f64 {
        self.line_pixel().0
    }

    fn direct_y(&self) -> f64 {
        self.line_pixel().1
    }

    /// y on the line through the anchor at the current integer x.
    fn inferred_y(&self) -> f64 {
        let (cos, sin) = snapped_components(self.angle);
        let slope = (sin * self.delta) / (cos * self.delta);
        let y = slope * (self.direct_x() - self.anchor_x) + self.anchor_y;
        round_towards(round_position(y), self.anchor_y)
    }

    /// x on the line through the anchor at the current integer y.
    fn inferred_x(&self) -> f64 {
        let (cos, sin) = snapped_components(self.angle);
        let slope = (cos * self.delta) / (sin * self.delta);
        let x = slope * (self.direct_y() - self.anchor_y) + self.anchor_x;
        round_towards(round_position(x), self.anchor_x)
    }

    /// Pulls the shadow towards the line, quadratically harder as the run on
    /// this angle lengthens.
    fn correct_error(&mut self) {
        let strength = (self.delta_on_angle / self.config.correction_ramp)
            .powi(2)
            .min(1.0);
        let (line_x, line_y) = self.line_point();
        self.error_x += strength * (line_x - self.error_x);
        self.error_y += strength * (line_y - self.error_y);
    }

    /// Re-baselines the line at the shadow's pixel when they have drifted
    /// apart. The new anchor stays within one pixel of `before` on each axis
    /// and never moves against the direction of travel.
    fn rebaseline_on_drift(&mut self, before: Position) {
        let (line_x, line_y) = self.line_pixel();
        let (shadow_x, shadow_y) = self.shadow_pixel();
        let drift = (shadow_x - line_x).hypot(shadow_y - line_y);
        if drift < self.config.drift_threshold {
            return;
        }

        let (cos, sin) = snapped_components(self.angle);
        let target = Position::new(
            step_towards(before.x, shadow_x, cos),
            step_towards(before.y, shadow_y, sin),
        );
        tracing::trace!(
            shadow_x = self.error_x,
            shadow_y = self.error_y,
            drift,
            from = %before,
            to = %target,
            "re-baselining line at error shadow"
        );
        self.settle_at(target);
    }
}

/// Moves from `from` towards `target` by at most one pixel, refusing to step
/// against a non-zero travel `component`.
fn step_towards(from: i32, target: f64, component: f64) -> i32 {
    let step = (target as i32 - from).clamp(-1, 1);
    if (component > 0.0 && step < 0) || (component < 0.0 && step > 0) {
        from
    } else {
        from + step
    }
}

impl MovementStrategy for LinearInference {
    fn advance(&mut self, angle: f64, magnitude: f64) {
        let (angle, magnitude) = if magnitude < 0.0 {
            (angle + PI, -magnitude)
        } else {
            (angle, magnitude)
        };
        let angle = snap_to_cardinals(normalize_angle(angle));
        let before = self.position();

        if magnitude == 0.0 || angle != self.angle {
            self.settle_at(before);
            self.delta_on_angle = 0.0;
        }
        if magnitude == 0.0
            || round_angle(angle_difference(self.angle, angle)) >= round_angle(FRAC_PI_4)
        {
            (self.error_x, self.error_y) = before.as_f64();
        }

        self.angle = angle;
        self.delta += magnitude;
        self.delta_on_angle += magnitude;

        let (raw_x, raw_y) = raw_components(angle);
        self.error_x += raw_x * magnitude;
        self.error_y += raw_y * magnitude;

        self.correct_error();
        self.rebaseline_on_drift(before);
    }

    fn position_x(&self) -> i32 {
        if self.delta == 0.0 {
            return self.anchor_x as i32;
        }
        let x = if infer_y_from_x(self.angle) {
            self.direct_x()
        } else {
            self.inferred_x()
        };
        x as i32
    }

    fn position_y(&self) -> i32 {
        if self.delta == 0.0 {
            return self.anchor_y as i32;
        }
        let y = if infer_y_from_x(self.angle) {
            self.inferred_y()
        } else {
            self.direct_y()
        };
        y as i32
    }

    fn reanchor(&mut self, position: Position) {
        self.settle_at(position);
        self.delta_on_angle = 0.0;
        (self.error_x, self.error_y) = position.as_f64();
    }
}
