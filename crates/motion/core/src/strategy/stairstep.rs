use crate::config::MotionConfig;
use crate::geometry::{
    normalize_angle, round_position, round_towards, snap_to_cardinals, snapped_components,
};
use crate::position::Position;

use super::MovementStrategy;

/// Per-axis accumulation from an integer origin.
///
/// Each axis collects its share of every frame's magnitude independently.
/// Once an axis holds a whole pixel (after stripping float error at
/// [`MotionConfig::POSITION_PRECISION`]) the pixel is committed into the
/// origin and the remainder carries over.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StairstepAccumulator {
    origin_x: i32,
    origin_y: i32,
    accum_x: f64,
    accum_y: f64,
}

impl StairstepAccumulator {
    pub fn new(position: Position) -> Self {
        Self {
            origin_x: position.x,
            origin_y: position.y,
            accum_x: 0.0,
            accum_y: 0.0,
        }
    }

    /// Uncommitted sub-pixel progress on each axis.
    pub fn pending(&self) -> (f64, f64) {
        (self.accum_x, self.accum_y)
    }

    fn commit(&mut self) {
        let (moved_x, rest_x) = split_whole(self.accum_x);
        let (moved_y, rest_y) = split_whole(self.accum_y);
        self.origin_x += moved_x;
        self.origin_y += moved_y;
        self.accum_x = rest_x;
        self.accum_y = rest_y;
    }
}

/// Whole pixels contained in `accum`, truncated towards zero, plus the
/// remainder. Remainders below [`MotionConfig::POSITION_CORRECT_EPS`] are
/// float residue and dropped.
fn split_whole(accum: f64) -> (i32, f64) {
    let whole = whole_pixels(accum);
    let rest = accum - whole;
    let rest = if rest.abs() < MotionConfig::POSITION_CORRECT_EPS {
        0.0
    } else {
        rest
    };
    (whole as i32, rest)
}

fn whole_pixels(accum: f64) -> f64 {
    round_towards(round_position(accum), 0.0)
}

impl MovementStrategy for StairstepAccumulator {
    fn advance(&mut self, angle: f64, magnitude: f64) {
        if magnitude == 0.0 {
            return;
        }
        let (cos, sin) = snapped_components(snap_to_cardinals(normalize_angle(angle)));
        self.accum_x += cos * magnitude;
        self.accum_y += sin * magnitude;
        self.commit();
    }

    fn position_x(&self) -> i32 {
        self.origin_x + whole_pixels(self.accum_x) as i32
    }

    fn position_y(&self) -> i32 {
        self.origin_y + whole_pixels(self.accum_y) as i32
    }

    fn reanchor(&mut self, position: Position) {
        *self = Self::new(position);
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::{FRAC_PI_2, PI};

    use super::*;

    #[test]
    fn accumulates_until_a_whole_pixel() {
        let mut acc = StairstepAccumulator::new(Position::ORIGIN);
        for _ in 0..3 {
            acc.advance(0.0, 0.3);
            assert_eq!(acc.position(), Position::ORIGIN);
        }
        acc.advance(0.0, 0.3);
        assert_eq!(acc.position(), Position::new(1, 0));
        let (rest_x, rest_y) = acc.pending();
        assert!((rest_x - 0.2).abs() < 1e-9);
        assert_eq!(rest_y, 0.0);
    }

    #[test]
    fn negative_travel_truncates_towards_origin() {
        let mut acc = StairstepAccumulator::new(Position::new(5, 5));
        acc.advance(PI, 0.6);
        assert_eq!(acc.position(), Position::new(5, 5));
        acc.advance(PI, 0.6);
        assert_eq!(acc.position(), Position::new(4, 5));
    }

    #[test]
    fn negative_magnitude_moves_backwards() {
        let mut acc = StairstepAccumulator::new(Position::ORIGIN);
        acc.advance(FRAC_PI_2, -2.0);
        assert_eq!(acc.position(), Position::new(0, -2));
    }

    #[test]
    fn ten_tenths_make_one_pixel() {
        let mut acc = StairstepAccumulator::new(Position::ORIGIN);
        for _ in 0..10 {
            acc.advance(0.0, 0.1);
        }
        assert_eq!(acc.position(), Position::new(1, 0));
        assert_eq!(acc.pending(), (0.0, 0.0));
    }
}
