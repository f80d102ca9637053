//! Public entry point for pixel-grid movement.

use crate::config::MotionConfig;
use crate::error::{InputKind, MotionError};
use crate::geometry::{normalize_angle, snap_to_cardinals, snapped_components};
use crate::position::Position;
use crate::strategy::{MovementStrategy, MovementType, Strategy};

/// Integer-positioned entity driven by continuous motion vectors.
///
/// A `Mover` owns exactly one active [`Strategy`] and forwards every movement
/// and query to it. Movement calls validate their inputs and mutate state;
/// queries never do. The `*_if_moved_*` queries run the same movement on a
/// copy of the mover, so a prediction always matches the real move.
///
/// Coordinates live in the `i32` range. A start position outside it, or a
/// move starting or ending within [`MotionConfig::EDGE_HEADROOM`] pixels of
/// its limits, is rejected with [`MotionError::OutOfRange`].
///
/// ```
/// use motion_core::{Mover, MovementType};
///
/// let mut mover = Mover::new(0.0, 0.0)?;
/// mover.set_movement_type(MovementType::Smooth);
/// for _ in 0..10 {
///     mover.move_by_magnitudes(1.0, 0.5)?;
/// }
/// assert_eq!((mover.x(), mover.y()), (10, 5));
/// # Ok::<(), motion_core::MotionError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mover {
    strategy: Strategy,
    config: MotionConfig,
}

/// Complete copy of a mover's state, restorable with [`Mover::restore`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoverSnapshot {
    strategy: Strategy,
    config: MotionConfig,
}

impl MoverSnapshot {
    pub fn movement_type(&self) -> MovementType {
        self.strategy.kind()
    }

    pub fn position(&self) -> Position {
        self.strategy.position()
    }
}

impl Mover {
    /// Creates a mover at `(floor(x), floor(y))` using the stairstep strategy.
    pub fn new(x: f64, y: f64) -> Result<Self, MotionError> {
        Self::with_config(x, y, MotionConfig::default())
    }

    pub fn with_config(x: f64, y: f64, config: MotionConfig) -> Result<Self, MotionError> {
        config.validate()?;
        let position = floored(x, y)?;
        Ok(Self {
            strategy: Strategy::new(MovementType::default(), position, config),
            config,
        })
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn movement_type(&self) -> MovementType {
        self.strategy.kind()
    }

    /// Read access to the active strategy's state.
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Switches strategy. The new strategy starts at the current reported
    /// position with empty accumulators; selecting the active type again
    /// keeps its sub-pixel progress.
    pub fn set_movement_type(&mut self, kind: MovementType) {
        if kind == self.strategy.kind() {
            return;
        }
        let position = self.position();
        tracing::debug!(
            from = %self.strategy.kind(),
            to = %kind,
            %position,
            "switching movement type"
        );
        self.strategy = Strategy::new(kind, position, self.config);
    }

    /// Moves to `(floor(x), floor(y))` and clears all sub-pixel progress.
    pub fn set_position(&mut self, x: f64, y: f64) -> Result<(), MotionError> {
        let position = floored(x, y)?;
        tracing::debug!(%position, "position set");
        self.strategy.reanchor(position);
        Ok(())
    }

    /// Applies one frame of movement of `magnitude` along `angle` (radians,
    /// growing towards `+y`). Any finite angle is accepted and wrapped.
    pub fn move_by_vector(&mut self, angle: f64, magnitude: f64) -> Result<(), MotionError> {
        let angle = MotionError::check_finite(InputKind::Angle, angle)?;
        let magnitude = MotionError::check_finite(InputKind::Magnitude, magnitude)?;
        self.advance(angle, magnitude)
    }

    /// Applies one frame of movement given as per-axis magnitudes.
    pub fn move_by_magnitudes(&mut self, mx: f64, my: f64) -> Result<(), MotionError> {
        let (angle, magnitude) = to_vector(mx, my)?;
        self.advance(angle, magnitude)
    }

    fn advance(&mut self, angle: f64, magnitude: f64) -> Result<(), MotionError> {
        let (cos, sin) = snapped_components(snap_to_cardinals(normalize_angle(angle)));
        let Position { x, y } = self.position();
        if !within_reach(x, cos * magnitude) || !within_reach(y, sin * magnitude) {
            return Err(MotionError::OutOfRange {
                input: InputKind::Magnitude,
                value: magnitude,
            });
        }
        self.strategy.advance(angle, magnitude);
        Ok(())
    }

    pub fn x(&self) -> i32 {
        self.strategy.position_x()
    }

    pub fn y(&self) -> i32 {
        self.strategy.position_y()
    }

    pub fn position(&self) -> Position {
        self.strategy.position()
    }

    pub fn position_if_moved_by_vector(
        &self,
        angle: f64,
        magnitude: f64,
    ) -> Result<Position, MotionError> {
        let mut copy = *self;
        copy.move_by_vector(angle, magnitude)?;
        Ok(copy.position())
    }

    pub fn position_if_moved_by_magnitudes(
        &self,
        mx: f64,
        my: f64,
    ) -> Result<Position, MotionError> {
        let mut copy = *self;
        copy.move_by_magnitudes(mx, my)?;
        Ok(copy.position())
    }

    pub fn x_if_moved_by_vector(&self, angle: f64, magnitude: f64) -> Result<i32, MotionError> {
        self.position_if_moved_by_vector(angle, magnitude)
            .map(|p| p.x)
    }

    pub fn y_if_moved_by_vector(&self, angle: f64, magnitude: f64) -> Result<i32, MotionError> {
        self.position_if_moved_by_vector(angle, magnitude)
            .map(|p| p.y)
    }

    pub fn x_if_moved_by_magnitudes(&self, mx: f64, my: f64) -> Result<i32, MotionError> {
        self.position_if_moved_by_magnitudes(mx, my).map(|p| p.x)
    }

    pub fn y_if_moved_by_magnitudes(&self, mx: f64, my: f64) -> Result<i32, MotionError> {
        self.position_if_moved_by_magnitudes(mx, my).map(|p| p.y)
    }

    pub fn snapshot(&self) -> MoverSnapshot {
        MoverSnapshot {
            strategy: self.strategy,
            config: self.config,
        }
    }

    pub fn restore(&mut self, snapshot: MoverSnapshot) {
        self.strategy = snapshot.strategy;
        self.config = snapshot.config;
    }
}

fn within_reach(coordinate: i32, travel: f64) -> bool {
    let from = f64::from(coordinate);
    let furthest = from.abs().max((from + travel).abs());
    furthest + MotionConfig::EDGE_HEADROOM <= f64::from(i32::MAX)
}

fn floored(x: f64, y: f64) -> Result<Position, MotionError> {
    Ok(Position::new(
        pixel_coordinate(InputKind::X, x)?,
        pixel_coordinate(InputKind::Y, y)?,
    ))
}

/// Floors `value` onto the grid.
fn pixel_coordinate(input: InputKind, value: f64) -> Result<i32, MotionError> {
    let floored = MotionError::check_finite(input, value)?.floor();
    if floored < f64::from(i32::MIN) || floored > f64::from(i32::MAX) {
        return Err(MotionError::OutOfRange { input, value });
    }
    Ok(floored as i32)
}

/// Converts per-axis magnitudes into `(angle, magnitude)`.
fn to_vector(mx: f64, my: f64) -> Result<(f64, f64), MotionError> {
    let mx = MotionError::check_finite(InputKind::MagnitudeX, mx)?;
    let my = MotionError::check_finite(InputKind::MagnitudeY, my)?;
    Ok((my.atan2(mx), mx.hypot(my)))
}
