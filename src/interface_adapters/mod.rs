// Interface adapters: port implementations, UI DTOs and input stand-ins.

pub mod clock;
pub mod input;
pub mod protocol;
pub mod stores;

pub use clock::SystemClock;
pub use input::{ContractionSimulator, PulsePattern, ScriptedLandmarkSource, upright_torso};
pub use stores::{
    FileHighScoreStore, InMemoryHighScoreStore, InMemorySessionRecorder, TracingSessionRecorder,
};
