use super::types::{EngineStatus, GameCommand, GameUpdate};
use crate::domain::ports::{Clock, HighScoreStore};
use crate::domain::state::{Body, GameState, clamp_strength};
use crate::domain::stats::SessionStats;
use crate::domain::systems::body::{Boundary, tick_body};
use crate::domain::systems::obstacles::{
    SpawnTimer, advance_obstacles, any_collision, spawn_obstacle,
};
use crate::domain::{GamePhysics, PersistenceError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, info, warn};

/// Settings for one simulation engine.
#[derive(Debug, Clone, Copy)]
pub struct EngineSettings {
    pub physics: GamePhysics,
    /// Seed for obstacle heights.
    pub rng_seed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    Floor,
    Obstacle,
}

/// Everything produced when a game ends.
#[derive(Debug)]
pub struct SessionOutcome {
    pub stats: SessionStats,
    pub cause: GameOverCause,
    pub high_score: u64,
    pub new_high_score: bool,
    /// Result of writing the new high score. The outcome stands even when this failed.
    pub persistence: Result<(), PersistenceError>,
}

#[derive(Debug)]
pub enum TickResult {
    /// Not playing; state is unchanged.
    Skipped,
    Running { tick: u64, score: u64 },
    Finished(SessionOutcome),
}

/// Single-owner game simulation. Not reentrant: drive it from one task.
pub struct SimulationEngine<C, S> {
    physics: GamePhysics,
    clock: C,
    high_scores: S,
    rng: ChaCha8Rng,
    state: GameState,
    spawn_timer: SpawnTimer,
    // Strength of every engaged tick in the current game.
    contractions: Vec<u8>,
    started_at_ms: u64,
    tick: u64,
}

impl<C, S> SimulationEngine<C, S>
where
    C: Clock,
    S: HighScoreStore,
{
    pub fn new(settings: EngineSettings, clock: C, high_scores: S) -> Self {
        let high_score = high_scores.load().unwrap_or_else(|e| {
            warn!(error = %e, "failed to load high score, starting from 0");
            0
        });

        Self {
            physics: settings.physics,
            clock,
            high_scores,
            rng: ChaCha8Rng::seed_from_u64(settings.rng_seed),
            state: GameState::idle(&settings.physics, high_score),
            spawn_timer: SpawnTimer::new(&settings.physics.obstacle),
            contractions: Vec::new(),
            started_at_ms: 0,
            tick: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn status(&self) -> EngineStatus {
        if self.state.is_over {
            EngineStatus::GameOver
        } else if self.state.is_playing {
            EngineStatus::Playing
        } else {
            EngineStatus::Idle
        }
    }

    /// Starts a new game. Returns false (and changes nothing) while a game is running.
    pub fn start(&mut self) -> bool {
        if self.status() == EngineStatus::Playing {
            debug!("start ignored, game already running");
            return false;
        }

        let high_score = self.reload_high_score();
        self.state = GameState {
            body: Body::launch(&self.physics),
            obstacles: Vec::new(),
            score: 0,
            is_playing: true,
            is_over: false,
            high_score,
            strength: 0,
        };
        self.spawn_timer = SpawnTimer::new(&self.physics.obstacle);
        self.contractions.clear();
        self.started_at_ms = self.clock.now_millis();
        self.tick = 0;

        info!(high_score, "game started");
        true
    }

    /// Returns a finished game to idle. No-op unless the game is over.
    pub fn reset(&mut self) -> bool {
        if self.status() != EngineStatus::GameOver {
            return false;
        }
        self.state = GameState::idle(&self.physics, self.state.high_score);
        self.contractions.clear();
        self.tick = 0;
        true
    }

    /// Advances one tick covering `dt` of game time with the given strength
    /// (clamped to 0..=100). `dt` only drives the obstacle spawn clock.
    pub fn tick(&mut self, strength: u8, dt: Duration) -> TickResult {
        if self.status() != EngineStatus::Playing {
            return TickResult::Skipped;
        }

        let strength = clamp_strength(strength);
        let physics = self.physics;
        self.tick += 1;
        self.state.strength = strength;

        let step = tick_body(
            &mut self.state.body,
            strength,
            &physics.body,
            physics.arena_height,
        );
        if step.engaged {
            self.contractions.push(strength);
        }

        let advanced = advance_obstacles(
            &mut self.state.obstacles,
            self.state.body.x,
            physics.obstacle.speed,
        );
        if advanced.passed > 0 {
            self.state.score += advanced.passed;
            debug!(tick = self.tick, score = self.state.score, "obstacle passed");
        }

        if self.spawn_timer.advance(dt.as_micros() as f64 / 1000.0) {
            let obstacle = spawn_obstacle(
                &mut self.rng,
                physics.arena_width,
                physics.arena_height,
                &physics.obstacle,
            );
            debug!(
                tick = self.tick,
                top_height = obstacle.top_height,
                "obstacle spawned"
            );
            self.state.obstacles.push(obstacle);
        }

        // Obstacles are checked even when the floor was already hit.
        let hit_obstacle = any_collision(&self.state.body, &self.state.obstacles);
        let cause = match (step.boundary, hit_obstacle) {
            (Some(Boundary::Floor), _) => Some(GameOverCause::Floor),
            (_, true) => Some(GameOverCause::Obstacle),
            _ => None,
        };

        match cause {
            Some(cause) => TickResult::Finished(self.finish(cause)),
            None => TickResult::Running {
                tick: self.tick,
                score: self.state.score,
            },
        }
    }

    fn finish(&mut self, cause: GameOverCause) -> SessionOutcome {
        self.state.is_over = true;
        self.state.is_playing = false;

        let elapsed_ms = self.clock.now_millis().saturating_sub(self.started_at_ms);
        let score = self.state.score;
        let stats = SessionStats::from_samples(
            score,
            &self.contractions,
            Duration::from_millis(elapsed_ms),
        );

        let new_high_score = score > self.state.high_score;
        let persistence = if new_high_score {
            self.state.high_score = score;
            self.high_scores.save(score)
        } else {
            Ok(())
        };
        if let Err(e) = &persistence {
            warn!(error = %e, high_score = score, "failed to persist high score");
        }

        info!(
            score,
            high_score = self.state.high_score,
            ?cause,
            contractions = stats.sample_count,
            duration_ms = elapsed_ms,
            "game over"
        );

        SessionOutcome {
            stats,
            cause,
            high_score: self.state.high_score,
            new_high_score,
            persistence,
        }
    }

    fn reload_high_score(&self) -> u64 {
        match self.high_scores.load() {
            // Keep an in-memory best that failed to persist earlier.
            Ok(stored) => stored.max(self.state.high_score),
            Err(e) => {
                warn!(error = %e, "failed to load high score, keeping in-memory value");
                self.state.high_score
            }
        }
    }
}

/// Drives one engine at a fixed tick rate until `Stop` or until every command sender is gone.
/// Strength readings may arrive at any cadence; the latest one is applied on every
/// tick until a newer one replaces it.
pub async fn game_task<C, S>(
    mut engine: SimulationEngine<C, S>,
    mut command_rx: mpsc::Receiver<GameCommand>,
    update_tx: broadcast::Sender<GameUpdate>,
    status_tx: watch::Sender<EngineStatus>,
    outcome_tx: mpsc::Sender<SessionOutcome>,
    tick_interval: Duration,
) where
    C: Clock,
    S: HighScoreStore,
{
    let mut interval = tokio::time::interval(tick_interval);
    let mut strength: u8 = 0;

    loop {
        interval.tick().await;

        loop {
            match command_rx.try_recv() {
                Ok(GameCommand::Start) => {
                    if engine.start() {
                        strength = 0;
                        let _ = status_tx.send(EngineStatus::Playing);
                    }
                }
                Ok(GameCommand::Strength(value)) => strength = value,
                Ok(GameCommand::Stop) | Err(TryRecvError::Disconnected) => {
                    info!(tick = engine.tick_count(), "game task stopping");
                    return;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        match engine.tick(strength, tick_interval) {
            TickResult::Skipped => {}
            TickResult::Running { tick, .. } => {
                let _ = update_tx.send(GameUpdate {
                    tick,
                    state: engine.state().clone(),
                });
            }
            TickResult::Finished(outcome) => {
                let _ = update_tx.send(GameUpdate {
                    tick: engine.tick_count(),
                    state: engine.state().clone(),
                });
                let _ = status_tx.send(EngineStatus::GameOver);
                if outcome_tx.send(outcome).await.is_err() {
                    warn!("session outcome dropped, no receiver");
                }
            }
        }
    }
}
