//! Pixel-grid positions for continuously moving entities.
//!
//! `motion-core` turns a stream of per-frame motion vectors into integer
//! pixel positions that never skip a pixel, never backtrack along a straight
//! line and never accumulate unbounded rounding error. All state lives in a
//! [`Mover`], which dispatches to one of two strategies (see [`strategy`]).
//! The crate is deterministic and performs no I/O; it only emits `tracing`
//! events.
pub mod config;
pub mod error;
pub mod geometry;
pub mod mover;
pub mod position;
pub mod strategy;

pub use config::MotionConfig;
pub use error::{ErrorSeverity, InputKind, MotionError, MotionFault};
pub use geometry::{Direction, angle_difference};
pub use mover::{Mover, MoverSnapshot};
pub use position::Position;
pub use strategy::{
    LinearInference, MovementStrategy, MovementType, StairstepAccumulator, Strategy,
};
