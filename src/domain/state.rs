// Simulation entities for the strength-driven game.

use crate::domain::tuning::GamePhysics;

pub const MAX_STRENGTH: u8 = 100;

/// Clamps a raw strength reading into `0..=100`.
pub fn clamp_strength(value: u8) -> u8 {
    value.min(MAX_STRENGTH)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub x: f64,
    pub y: f64,
    /// Vertical velocity per tick, negative is up.
    pub velocity: f64,
    /// Degrees, negative is nose-up.
    pub rotation: f64,
    pub radius: f64,
}

impl Body {
    /// Body at its launch position, vertically centred in the arena.
    pub fn launch(physics: &GamePhysics) -> Self {
        Self {
            x: physics.body.start_x,
            y: physics.arena_height / 2.0,
            velocity: physics.body.initial_impulse,
            rotation: 0.0,
            radius: physics.body.radius,
        }
    }

    /// Body resting at its launch position before a game starts.
    pub fn resting(physics: &GamePhysics) -> Self {
        Self {
            velocity: 0.0,
            ..Self::launch(physics)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Left edge.
    pub x: f64,
    /// Bottom edge of the top part.
    pub top_height: f64,
    /// Top edge of the bottom part, always `top_height + gap`.
    pub bottom_y: f64,
    pub width: f64,
    /// Set once the body has cleared this obstacle.
    pub passed: bool,
}

impl Obstacle {
    pub fn new(x: f64, top_height: f64, gap: f64, width: f64) -> Self {
        Self {
            x,
            top_height,
            bottom_y: top_height + gap,
            width,
            passed: false,
        }
    }

    pub fn trailing_edge(&self) -> f64 {
        self.x + self.width
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub body: Body,
    /// Spawn order.
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub is_playing: bool,
    pub is_over: bool,
    pub high_score: u64,
    /// Last strength fed to the engine, 0..=100.
    pub strength: u8,
}

impl GameState {
    pub fn idle(physics: &GamePhysics, high_score: u64) -> Self {
        Self {
            body: Body::resting(physics),
            obstacles: Vec::new(),
            score: 0,
            is_playing: false,
            is_over: false,
            high_score,
            strength: 0,
        }
    }
}
