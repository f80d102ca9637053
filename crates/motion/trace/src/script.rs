//! Motion scripts: a start position and a list of per-frame movements.
//!
//! ```toml
//! start = [0.0, 0.0]
//! movement_type = "smooth"
//!
//! [config]
//! correction_ramp = 4.0
//!
//! [[frames]]
//! angle_deg = 26.5
//! magnitude = 0.25
//! repeat = 120
//!
//! [[frames]]
//! dx = -0.1
//! dy = 0.1
//! repeat = 10
//! ```

use std::path::Path;

use anyhow::{Context, Result, bail};
use motion_core::{MotionConfig, MotionError, MovementType, Mover};
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub start: [f64; 2],

    #[serde(default)]
    pub movement_type: Option<MovementType>,

    #[serde(default)]
    pub config: MotionConfig,

    #[serde(default)]
    pub frames: Vec<Frame>,
}

/// One scripted movement, applied `repeat` times.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Frame {
    #[serde(flatten)]
    pub motion: Motion,

    #[serde(default = "Frame::default_repeat")]
    pub repeat: u32,
}

impl Frame {
    fn default_repeat() -> u32 {
        1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Motion {
    /// Angle in radians.
    Vector { angle: f64, magnitude: f64 },
    /// Angle in degrees.
    VectorDegrees { angle_deg: f64, magnitude: f64 },
    /// Per-axis magnitudes.
    Magnitudes { dx: f64, dy: f64 },
}

impl Motion {
    pub fn apply(self, mover: &mut Mover) -> Result<(), MotionError> {
        match self {
            Motion::Vector { angle, magnitude } => mover.move_by_vector(angle, magnitude),
            Motion::VectorDegrees {
                angle_deg,
                magnitude,
            } => mover.move_by_vector(angle_deg.to_radians(), magnitude),
            Motion::Magnitudes { dx, dy } => mover.move_by_magnitudes(dx, dy),
        }
    }
}

impl Script {
    /// Load a script from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid script {}", path.display()))
    }

    /// Most frames a script may expand to.
    pub const MAX_FRAMES: u64 = 1_000_000;

    pub fn parse(content: &str) -> Result<Self> {
        let script: Script = toml::from_str(content).context("Failed to parse TOML")?;
        script.config.validate()?;

        let (frames, limit) = (script.frame_count(), Self::MAX_FRAMES);
        if frames > limit {
            bail!("Script expands to {frames} frames, more than {limit}");
        }
        Ok(script)
    }

    /// Total number of frames after expanding repeats.
    pub fn frame_count(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.repeat)).sum()
    }
}
