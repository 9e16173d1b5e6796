// Gameplay and posture tuning, kept apart from runtime configuration.

pub mod body;
pub mod obstacle;
pub mod posture;

use serde::Deserialize;

pub use body::BodyTuning;
pub use obstacle::ObstacleTuning;
pub use posture::{PostureConfig, PostureThresholds};

/// Arena size plus the body/obstacle tuning for one game.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GamePhysics {
    /// Arena width in render units; obstacles spawn at this x.
    pub arena_width: f64,
    /// Arena height in render units; the floor sits at this y.
    pub arena_height: f64,
    pub body: BodyTuning,
    pub obstacle: ObstacleTuning,
}

impl Default for GamePhysics {
    fn default() -> Self {
        Self {
            arena_width: 400.0,
            arena_height: 600.0,
            body: BodyTuning::default(),
            obstacle: ObstacleTuning::default(),
        }
    }
}
