// Framework bootstrap for the headless session runner.

use crate::domain::ports::{HighScoreStore, LandmarkSource, SessionRecorder};
use crate::domain::{PostureMetrics, SessionRecord};
use crate::frameworks::config::{self, RuntimeSettings};
use crate::interface_adapters::protocol::{SessionStatsDto, ViewMessage, encode};
use crate::interface_adapters::{
    ContractionSimulator, FileHighScoreStore, InMemoryHighScoreStore, PulsePattern,
    ScriptedLandmarkSource, SystemClock, TracingSessionRecorder, upright_torso,
};
use crate::use_cases::{
    EngineSettings, EngineStatus, GameCommand, GameUpdate, PostureAnalyzer, PostureCommand,
    RecordSessionUseCase, SessionAggregator, SessionOutcome, SimulationEngine, game_task,
    posture_task,
};
use std::io::{Error, ErrorKind, Result};
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::{broadcast, mpsc, watch};

// Ticks the scripted player holds, then rests, per contraction.
const PULSE_HOLD_TICKS: u32 = 3;
const PULSE_REST_TICKS: u32 = 18;

/// What one headless game produced.
#[derive(Debug)]
pub struct RunSummary {
    pub outcome: SessionOutcome,
    pub record: SessionRecord,
    /// False when the session recorder rejected the record.
    pub recorded: bool,
}

pub fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Plays one scripted game with the configured high-score store and logs the session.
pub async fn run(settings: RuntimeSettings) -> Result<RunSummary> {
    match settings.high_score_path.clone() {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using file high score store");
            run_session(
                settings,
                FileHighScoreStore::new(path),
                TracingSessionRecorder,
                demo_landmarks(),
            )
            .await
        }
        None => {
            run_session(
                settings,
                InMemoryHighScoreStore::default(),
                TracingSessionRecorder,
                demo_landmarks(),
            )
            .await
        }
    }
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let settings = RuntimeSettings::from_env().map_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
        Error::new(ErrorKind::InvalidInput, e)
    })?;
    tracing::debug!(
        tick_interval_ms = settings.tick_interval.as_millis(),
        posture_interval_ms = settings.posture_interval.as_millis(),
        rng_seed = settings.rng_seed,
        max_ticks = settings.max_ticks,
        "runtime configured"
    );

    let summary = run(settings).await?;
    if !summary.recorded {
        tracing::warn!(
            session_id = %summary.record.session_id,
            "session finished but was not recorded"
        );
    }
    Ok(())
}

/// Wires the game and posture tasks, drives them with scripted input until the
/// game ends, then records the session.
pub async fn run_session<S, R, L>(
    settings: RuntimeSettings,
    high_scores: S,
    recorder: R,
    mut landmarks: L,
) -> Result<RunSummary>
where
    S: HighScoreStore + 'static,
    R: SessionRecorder,
    L: LandmarkSource,
{
    // Setup Channels
    let (game_tx, game_rx) = mpsc::channel::<GameCommand>(config::GAME_COMMAND_CHANNEL_CAPACITY);
    let (update_tx, mut update_rx) =
        broadcast::channel::<GameUpdate>(config::UPDATE_BROADCAST_CAPACITY);
    let (status_tx, mut status_rx) = watch::channel(EngineStatus::Idle);
    let (outcome_tx, mut outcome_rx) = mpsc::channel::<SessionOutcome>(1);
    let (posture_tx, posture_rx) =
        mpsc::channel::<PostureCommand>(config::POSTURE_COMMAND_CHANNEL_CAPACITY);
    let (metrics_tx, mut metrics_rx) =
        broadcast::channel::<PostureMetrics>(config::METRICS_BROADCAST_CAPACITY);

    let engine = SimulationEngine::new(
        EngineSettings {
            physics: settings.physics,
            rng_seed: settings.rng_seed,
        },
        SystemClock,
        high_scores,
    );
    let game = tokio::spawn(game_task(
        engine,
        game_rx,
        update_tx,
        status_tx,
        outcome_tx,
        settings.tick_interval,
    ));
    let posture = tokio::spawn(posture_task(
        PostureAnalyzer::new(settings.posture),
        SystemClock,
        posture_rx,
        metrics_tx,
        true,
    ));

    let mut aggregator = SessionAggregator::new(true);
    let mut pattern = PulsePattern::new(
        ContractionSimulator::for_game(),
        PULSE_HOLD_TICKS,
        PULSE_REST_TICKS,
    );
    let mut strength_interval = tokio::time::interval(settings.tick_interval);
    let mut posture_interval = tokio::time::interval(settings.posture_interval);
    let mut sent_ticks: u64 = 0;
    let mut metrics_open = true;

    send(&game_tx, GameCommand::Start).await?;

    let outcome = loop {
        tokio::select! {
            outcome = outcome_rx.recv() => {
                break outcome.ok_or_else(|| Error::other("game task ended without an outcome"))?;
            }
            _ = strength_interval.tick() => {
                if sent_ticks >= settings.max_ticks {
                    stop(&game_tx, &posture_tx).await;
                    tracing::error!(max_ticks = settings.max_ticks, "game did not finish in time");
                    return Err(Error::new(ErrorKind::TimedOut, "game exceeded REHAB_MAX_TICKS"));
                }
                sent_ticks += 1;
                send(&game_tx, GameCommand::Strength(pattern.next_strength())).await?;
            }
            _ = posture_interval.tick() => {
                send(&posture_tx, PostureCommand::Frame(landmarks.next_frame())).await?;
            }
            received = metrics_rx.recv(), if metrics_open => {
                metrics_open = absorb_metrics(received, &mut aggregator);
            }
            Ok(update) = update_rx.recv() => {
                tracing::trace!(tick = update.tick, score = update.state.score, "game update");
            }
            Ok(()) = status_rx.changed() => {
                let status = *status_rx.borrow_and_update();
                tracing::debug!(?status, "engine status changed");
            }
        }
    };

    stop(&game_tx, &posture_tx).await;
    let _ = game.await;
    let _ = posture.await;
    drain_metrics(&mut metrics_rx, &mut aggregator);

    if let Some(summary) = encode(&ViewMessage::SessionSummary(SessionStatsDto::from(
        &outcome.stats,
    ))) {
        tracing::info!(%summary, "session summary");
    }

    let record = aggregator.game_record(&outcome.stats);
    let recorded = RecordSessionUseCase { recorder }
        .execute(&record)
        .await
        .is_ok();

    Ok(RunSummary {
        outcome,
        record,
        recorded,
    })
}

async fn send<T>(tx: &mpsc::Sender<T>, command: T) -> Result<()> {
    tx.send(command)
        .await
        .map_err(|_| Error::new(ErrorKind::BrokenPipe, "engine task stopped unexpectedly"))
}

async fn stop(game_tx: &mpsc::Sender<GameCommand>, posture_tx: &mpsc::Sender<PostureCommand>) {
    let _ = game_tx.send(GameCommand::Stop).await;
    let _ = posture_tx.send(PostureCommand::Stop).await;
}

// Returns false once the metrics channel is closed.
fn absorb_metrics(
    received: std::result::Result<PostureMetrics, RecvError>,
    aggregator: &mut SessionAggregator,
) -> bool {
    match received {
        Ok(metrics) => aggregator.record_metrics(&metrics),
        Err(RecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "posture metrics dropped");
        }
        Err(RecvError::Closed) => return false,
    }
    true
}

// Picks up metrics published after the last select round.
fn drain_metrics(rx: &mut broadcast::Receiver<PostureMetrics>, aggregator: &mut SessionAggregator) {
    loop {
        match rx.try_recv() {
            Ok(metrics) => aggregator.record_metrics(&metrics),
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "posture metrics dropped");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}

/// A mostly steady subject who shrugs now and then and briefly leaves the frame.
pub fn demo_landmarks() -> ScriptedLandmarkSource {
    let steady = Some(upright_torso(200.0, 400.0));
    let shrug = Some(upright_torso(165.0, 400.0));
    ScriptedLandmarkSource::new(vec![
        steady.clone(),
        steady.clone(),
        steady.clone(),
        steady.clone(),
        shrug.clone(),
        shrug,
        steady,
        None,
    ])
}
