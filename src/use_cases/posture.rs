// Posture analysis workflow: owns the session baseline and scores incoming frames.

use super::types::PostureCommand;
use crate::domain::ports::Clock;
use crate::domain::posture::{self, Baseline, PostureMetrics};
use crate::domain::{LandmarkSet, PostureConfig};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

/// Holds the calibration baseline for one analysis session.
#[derive(Debug, Clone)]
pub struct PostureAnalyzer {
    config: PostureConfig,
    baseline: Option<Baseline>,
}

impl PostureAnalyzer {
    pub fn new(config: PostureConfig) -> Self {
        Self {
            config,
            baseline: None,
        }
    }

    pub fn config(&self) -> &PostureConfig {
        &self.config
    }

    pub fn baseline(&self) -> Option<Baseline> {
        self.baseline
    }

    pub fn analyze(&mut self, frame: Option<&LandmarkSet>, timestamp_ms: u64) -> PostureMetrics {
        let calibrated = self.baseline.is_some();
        let metrics = posture::analyze(frame, &mut self.baseline, &self.config, timestamp_ms);

        if let (false, Some(baseline)) = (calibrated, self.baseline) {
            info!(
                shoulder_height = baseline.shoulder_height,
                hip_height = baseline.hip_height,
                "posture baseline captured"
            );
        }
        if !metrics.warnings.is_empty() {
            debug!(
                warning_count = metrics.warnings.len(),
                shoulder_stability = metrics.shoulder_stability,
                hip_stability = metrics.hip_stability,
                "posture warnings"
            );
        }

        metrics
    }

    /// Forgets the baseline; the next usable frame recalibrates.
    pub fn reset(&mut self) {
        self.baseline = None;
    }
}

/// Scores frames as they arrive from the pose model.
///
/// Frames received while posture mode is off are dropped. Turning the mode on
/// starts a new calibration.
pub async fn posture_task<C: Clock>(
    mut analyzer: PostureAnalyzer,
    clock: C,
    mut command_rx: mpsc::Receiver<PostureCommand>,
    metrics_tx: broadcast::Sender<PostureMetrics>,
    mut enabled: bool,
) {
    while let Some(command) = command_rx.recv().await {
        match command {
            PostureCommand::Frame(frame) => {
                if !enabled {
                    continue;
                }
                let metrics = analyzer.analyze(frame.as_ref(), clock.now_millis());
                let _ = metrics_tx.send(metrics);
            }
            PostureCommand::SetEnabled(on) => {
                if on && !enabled {
                    analyzer.reset();
                }
                if on != enabled {
                    info!(enabled = on, "posture mode toggled");
                }
                enabled = on;
            }
            PostureCommand::Stop => break,
        }
    }
    debug!("posture task stopped");
}
