// Use cases layer: game, posture and exercise workflows.

pub mod exercise;
pub mod game;
pub mod posture;
pub mod session;
pub mod types;

#[cfg(test)]
mod test_support;

pub use exercise::{Biofeedback, ExerciseCycle, ExercisePhase, Feedback, PhaseTiming};
pub use game::{
    EngineSettings, GameOverCause, SessionOutcome, SimulationEngine, TickResult, game_task,
};
pub use posture::{PostureAnalyzer, posture_task};
pub use session::{ENGAGED_STRENGTH, RecordSessionUseCase, SessionAggregator};
pub use types::{EngineStatus, GameCommand, GameUpdate, PostureCommand};
