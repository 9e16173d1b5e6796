// JSON DTOs for the read-only UI views.

use crate::domain::{
    Body, GameState, Obstacle, PostureMetrics, Severity, SessionStats, Warning, WarningKind,
};
use crate::use_cases::{EngineStatus, GameUpdate};
use serde::Serialize;

/// Messages published to the UI.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ViewMessage {
    // Snapshot of the game for a given tick.
    GameUpdate(GameUpdateDto),
    // Idle / playing / game over transitions.
    Status(EngineStatusDto),
    // Result of scoring one camera frame.
    Posture(PostureMetricsDto),
    // Summary shown on the game-over screen.
    SessionSummary(SessionStatsDto),
}

#[derive(Debug, Clone, Serialize)]
pub struct GameUpdateDto {
    pub tick: u64,
    #[serde(flatten)]
    pub state: GameStateDto,
}

impl From<&GameUpdate> for GameUpdateDto {
    fn from(update: &GameUpdate) -> Self {
        Self {
            tick: update.tick,
            state: GameStateDto::from(&update.state),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GameStateDto {
    pub bird: BodyDto,
    pub pipes: Vec<ObstacleDto>,
    pub score: u64,
    pub high_score: u64,
    pub strength: u8,
    pub is_playing: bool,
    pub game_over: bool,
}

impl From<&GameState> for GameStateDto {
    fn from(state: &GameState) -> Self {
        Self {
            bird: BodyDto::from(&state.body),
            pipes: state.obstacles.iter().map(ObstacleDto::from).collect(),
            score: state.score,
            high_score: state.high_score,
            strength: state.strength,
            is_playing: state.is_playing,
            game_over: state.is_over,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BodyDto {
    pub x: f64,
    pub y: f64,
    pub rot: f64,
    pub radius: f64,
}

impl From<&Body> for BodyDto {
    fn from(body: &Body) -> Self {
        Self {
            x: body.x,
            y: body.y,
            rot: body.rotation,
            radius: body.radius,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ObstacleDto {
    pub x: f64,
    pub top_height: f64,
    pub bottom_y: f64,
    pub width: f64,
}

impl From<&Obstacle> for ObstacleDto {
    fn from(obstacle: &Obstacle) -> Self {
        Self {
            x: obstacle.x,
            top_height: obstacle.top_height,
            bottom_y: obstacle.bottom_y,
            width: obstacle.width,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineStatusDto {
    Idle,
    Playing,
    GameOver,
}

impl From<EngineStatus> for EngineStatusDto {
    fn from(status: EngineStatus) -> Self {
        match status {
            EngineStatus::Idle => EngineStatusDto::Idle,
            EngineStatus::Playing => EngineStatusDto::Playing,
            EngineStatus::GameOver => EngineStatusDto::GameOver,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostureMetricsDto {
    pub shoulder_stability: f64,
    pub hip_stability: f64,
    pub is_correct: bool,
    pub subject_detected: bool,
    pub warnings: Vec<WarningDto>,
}

impl From<&PostureMetrics> for PostureMetricsDto {
    fn from(metrics: &PostureMetrics) -> Self {
        Self {
            shoulder_stability: metrics.shoulder_stability.round(),
            hip_stability: metrics.hip_stability.round(),
            is_correct: metrics.is_correct,
            subject_detected: metrics.subject_detected,
            warnings: metrics.warnings.iter().map(WarningDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WarningDto {
    pub kind: &'static str,
    pub severity: &'static str,
    pub message: &'static str,
    pub timestamp: u64,
}

impl From<&Warning> for WarningDto {
    fn from(warning: &Warning) -> Self {
        Self {
            kind: kind_name(warning.kind),
            severity: severity_name(warning.severity),
            message: warning.message,
            timestamp: warning.timestamp_ms,
        }
    }
}

fn kind_name(kind: WarningKind) -> &'static str {
    match kind {
        WarningKind::ShouldersRaised => "shoulders_raised",
        WarningKind::ShouldersAsymmetric => "shoulders_asymmetric",
        WarningKind::HipsShifted => "hips_shifted",
        WarningKind::HipsTilted => "hips_tilted",
        WarningKind::LeanForward => "lean_forward",
        WarningKind::LeanBackward => "lean_backward",
    }
}

fn severity_name(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => "low",
        Severity::Medium => "medium",
        Severity::High => "high",
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatsDto {
    pub final_score: u64,
    pub max_strength: u8,
    pub mean_strength: f64,
    pub contractions: usize,
    pub duration_secs: f64,
}

impl From<&SessionStats> for SessionStatsDto {
    fn from(stats: &SessionStats) -> Self {
        Self {
            final_score: stats.final_score,
            max_strength: stats.max_strength,
            mean_strength: stats.mean_strength,
            contractions: stats.sample_count,
            duration_secs: stats.duration.as_secs_f64(),
        }
    }
}

/// Serializes a view message; failures are logged and yield `None`.
pub fn encode(message: &ViewMessage) -> Option<String> {
    serde_json::to_string(message)
        .inspect_err(|e| tracing::warn!(error = %e, "failed to serialize view message"))
        .ok()
}
