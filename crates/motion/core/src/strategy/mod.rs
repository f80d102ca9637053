//! Movement strategies deriving integer positions from continuous motion.
//!
//! Both strategies consume the same per-frame `(angle, magnitude)` vectors and
//! differ only in how the reported pixel is derived:
//!
//! - [`StairstepAccumulator`] rounds each axis independently. Cheap, but a
//!   shallow diagonal shows visible plateaus.
//! - [`LinearInference`] treats each straight run as a line and infers the
//!   secondary axis from the dominant one, so a line never doubles back or
//!   staircases.
//!
//! [`Strategy`] is the closed set of variants used by [`crate::Mover`].

mod linear;
mod stairstep;

pub use linear::LinearInference;
pub use stairstep::StairstepAccumulator;

use crate::config::MotionConfig;
use crate::position::Position;

/// Common interface for movement strategies.
///
/// Inputs are assumed finite; validation happens in [`crate::Mover`].
pub trait MovementStrategy {
    /// Applies one frame of displacement.
    fn advance(&mut self, angle: f64, magnitude: f64);

    fn position_x(&self) -> i32;

    fn position_y(&self) -> i32;

    fn position(&self) -> Position {
        Position::new(self.position_x(), self.position_y())
    }

    /// Restarts the strategy at `position` with every accumulator cleared.
    fn reanchor(&mut self, position: Position);
}

/// Selects which strategy a [`crate::Mover`] uses.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MovementType {
    /// Independent per-axis accumulation.
    #[default]
    Stairstep,
    /// Line inference with drift correction.
    Smooth,
}

/// Active strategy state, one variant per [`MovementType`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    Stairstep(StairstepAccumulator),
    Smooth(LinearInference),
}

impl Strategy {
    pub fn new(kind: MovementType, position: Position, config: MotionConfig) -> Self {
        match kind {
            MovementType::Stairstep => Self::Stairstep(StairstepAccumulator::new(position)),
            MovementType::Smooth => Self::Smooth(LinearInference::new(position, config)),
        }
    }

    pub fn kind(&self) -> MovementType {
        match self {
            Self::Stairstep(_) => MovementType::Stairstep,
            Self::Smooth(_) => MovementType::Smooth,
        }
    }
}

impl MovementStrategy for Strategy {
    fn advance(&mut self, angle: f64, magnitude: f64) {
        match self {
            Self::Stairstep(inner) => inner.advance(angle, magnitude),
            Self::Smooth(inner) => inner.advance(angle, magnitude),
        }
    }

    fn position_x(&self) -> i32 {
        match self {
            Self::Stairstep(inner) => inner.position_x(),
            Self::Smooth(inner) => inner.position_x(),
        }
    }

    fn position_y(&self) -> i32 {
        match self {
            Self::Stairstep(inner) => inner.position_y(),
            Self::Smooth(inner) => inner.position_y(),
        }
    }

    fn position(&self) -> Position {
        match self {
            Self::Stairstep(inner) => inner.position(),
            Self::Smooth(inner) => inner.position(),
        }
    }

    fn reanchor(&mut self, position: Position) {
        match self {
            Self::Stairstep(inner) => inner.reanchor(position),
            Self::Smooth(inner) => inner.reanchor(position),
        }
    }
}
