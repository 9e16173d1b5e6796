// Use-case level inputs/outputs for the engine tasks.

use crate::domain::{GameState, LandmarkSet};

#[derive(Debug, Clone)]
pub enum GameCommand {
    /// Start a new game; ignored while one is running.
    Start,
    /// Latest strength reading; applied on every tick until replaced.
    Strength(u8),
    Stop,
}

#[derive(Debug, Clone)]
pub enum PostureCommand {
    /// Result of one pose inference; `None` when no body was found.
    Frame(Option<LandmarkSet>),
    /// Turns camera-assisted posture mode on or off.
    SetEnabled(bool),
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    Idle,
    Playing,
    GameOver,
}

#[derive(Debug, Clone)]
pub struct GameUpdate {
    pub tick: u64,
    pub state: GameState,
}
