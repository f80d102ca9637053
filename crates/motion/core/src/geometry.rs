//! Angle and rounding helpers shared by both movement strategies.
//!
//! Trigonometry on exact principal angles does not produce exact results
//! (`cos(π/2)` is `6.1e-17`, `cos(π/4) != sin(π/4)` in the last bit), so every
//! value that feeds an integer decision first passes through one of the
//! controlled-precision helpers here.

use core::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use crate::config::MotionConfig;

/// One of the eight principal movement directions, spaced `π/4` apart.
///
/// Angles grow towards increasing `y`, so [`Direction::North`] is `+y`.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::NorthEast,
        Direction::North,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// Exact angle of this direction in `[0, 2π)`.
    pub const fn angle(self) -> f64 {
        match self {
            Direction::East => 0.0,
            Direction::NorthEast => FRAC_PI_4,
            Direction::North => FRAC_PI_2,
            Direction::NorthWest => 3.0 * FRAC_PI_4,
            Direction::West => PI,
            Direction::SouthWest => 5.0 * FRAC_PI_4,
            Direction::South => 3.0 * FRAC_PI_2,
            Direction::SouthEast => 7.0 * FRAC_PI_4,
        }
    }

    /// Returns the direction whose exact angle equals `angle` after snapping.
    pub fn from_angle(angle: f64) -> Option<Self> {
        let snapped = snap_to_cardinals(normalize_angle(angle));
        Self::ALL.into_iter().find(|dir| dir.angle() == snapped)
    }

    /// Unit grid step `(dx, dy)` for this direction.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::NorthEast => (1, 1),
            Direction::North => (0, 1),
            Direction::NorthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::SouthWest => (-1, -1),
            Direction::South => (0, -1),
            Direction::SouthEast => (1, -1),
        }
    }
}

/// Rounds `value` to `places` decimal places.
pub fn round_to_places(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// Rounding used for angle and slope comparisons.
pub fn round_angle(value: f64) -> f64 {
    round_to_places(value, MotionConfig::ANGLE_PRECISION)
}

/// Rounding used to strip accumulated float error from positions.
pub fn round_position(value: f64) -> f64 {
    round_to_places(value, MotionConfig::POSITION_PRECISION)
}

/// Wraps any finite angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can land on TAU itself for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Shortest distance between two angles, ignoring direction of rotation.
pub fn angle_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs();
    diff.min(TAU - diff)
}

/// Replaces `angle` with the exact principal angle it matches at three
/// decimal places. A match on `2π` snaps to `0`.
pub fn snap_to_cardinals(angle: f64) -> f64 {
    let rounded = round_angle(angle);
    if rounded == round_angle(TAU) {
        return 0.0;
    }
    Direction::ALL
        .into_iter()
        .map(Direction::angle)
        .find(|&exact| round_angle(exact) == rounded)
        .unwrap_or(angle)
}

/// Returns `0.0` for values indistinguishable from zero at trig precision.
pub fn snap_to_zero(value: f64) -> f64 {
    if value.abs() < MotionConfig::TRIG_ZERO_EPS {
        0.0
    } else {
        value
    }
}

/// Rounds `a` to an integer on the side of `b`: floor when `a >= b`, ceil
/// otherwise. Never returns negative zero.
pub fn round_towards(a: f64, b: f64) -> f64 {
    let rounded = if a >= b { a.floor() } else { a.ceil() };
    rounded + 0.0
}

/// `(cos, sin)` of `angle` with near-zero components flushed to zero.
pub fn snapped_components(angle: f64) -> (f64, f64) {
    (snap_to_zero(angle.cos()), snap_to_zero(angle.sin()))
}

/// `(cos, sin)` of `angle`, zero only when the angle is exactly
/// perpendicular to that axis.
pub fn raw_components(angle: f64) -> (f64, f64) {
    let x = if angle == FRAC_PI_2 || angle == 3.0 * FRAC_PI_2 {
        0.0
    } else {
        angle.cos()
    };
    let y = if angle == 0.0 || angle == PI {
        0.0
    } else {
        angle.sin()
    };
    (x, y)
}

/// True when `angle` lies within `π/4` of the x-axis, making x the dominant
/// axis and y the one inferred from it.
pub fn infer_y_from_x(angle: f64) -> bool {
    angle <= FRAC_PI_4
        || angle >= 7.0 * FRAC_PI_4
        || (3.0 * FRAC_PI_4..=5.0 * FRAC_PI_4).contains(&angle)
}
