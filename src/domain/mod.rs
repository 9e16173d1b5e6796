// Domain layer: posture rules, simulation state and session statistics.

pub mod errors;
pub mod landmarks;
pub mod ports;
pub mod posture;
pub mod state;
pub mod stats;
pub mod systems;
pub mod tuning;

pub use errors::PersistenceError;
pub use landmarks::{BodyPoint, Landmark, LandmarkSet};
pub use posture::{Baseline, PostureMetrics, Severity, Warning, WarningKind};
pub use state::{Body, GameState, Obstacle};
pub use stats::{SessionKind, SessionRecord, SessionStats};
pub use tuning::{GamePhysics, PostureConfig, PostureThresholds};
