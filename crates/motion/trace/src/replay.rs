use motion_core::{MotionError, MovementType, Mover, Position};
use serde::Serialize;

use crate::script::Script;

/// Reported position after a frame. Frame 0 is the start position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TraceStep {
    pub frame: u64,
    pub x: i32,
    pub y: i32,
}

impl TraceStep {
    fn at(frame: u64, position: Position) -> Self {
        Self {
            frame,
            x: position.x,
            y: position.y,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Runs every frame of `script` through a fresh mover.
pub fn replay(script: &Script, kind: MovementType) -> Result<Vec<TraceStep>, MotionError> {
    let [x, y] = script.start;
    let mut mover = Mover::with_config(x, y, script.config)?;
    mover.set_movement_type(kind);

    let capacity = script.frame_count().min(Script::MAX_FRAMES) as usize + 1;
    let mut trace = Vec::with_capacity(capacity);
    trace.push(TraceStep::at(0, mover.position()));

    let mut frame = 0;
    for scripted in &script.frames {
        for _ in 0..scripted.repeat {
            scripted.motion.apply(&mut mover)?;
            frame += 1;
            trace.push(TraceStep::at(frame, mover.position()));
        }
    }

    tracing::debug!(%kind, frames = frame, end = %mover.position(), "replay finished");
    Ok(trace)
}

/// First pair of consecutive steps more than one pixel apart.
pub fn find_gap(trace: &[TraceStep]) -> Option<(TraceStep, TraceStep)> {
    trace
        .windows(2)
        .find(|pair| pair[0].position().chebyshev_distance(pair[1].position()) > 1)
        .map(|pair| (pair[0], pair[1]))
}
