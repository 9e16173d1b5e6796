// Session aggregation: folds a run's strength samples and posture warnings into
// the summary handed to the persistence collaborator.

use crate::domain::PersistenceError;
use crate::domain::ports::SessionRecorder;
use crate::domain::posture::{PostureMetrics, WarningKind};
use crate::domain::state::clamp_strength;
use crate::domain::stats::{
    SessionKind, SessionRecord, SessionStats, StrengthSummary, summarize,
};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

/// Strength above which a sample counts as a contraction.
pub const ENGAGED_STRENGTH: u8 = 70;

#[derive(Debug, Default)]
pub struct SessionAggregator {
    samples: Vec<u8>,
    warning_counts: BTreeMap<WarningKind, u32>,
    analyzed_frames: u32,
    undetected_frames: u32,
    stability_sum: f64,
    posture_enabled: bool,
}

impl SessionAggregator {
    pub fn new(posture_enabled: bool) -> Self {
        Self {
            posture_enabled,
            ..Self::default()
        }
    }

    pub fn set_posture_enabled(&mut self, enabled: bool) {
        self.posture_enabled = enabled;
    }

    pub fn record_strength(&mut self, strength: u8) {
        self.samples.push(clamp_strength(strength));
    }

    pub fn record_metrics(&mut self, metrics: &PostureMetrics) {
        self.analyzed_frames += 1;
        self.stability_sum += metrics.average_stability();

        // The not-detected warning is tracked separately from real posture faults.
        if !metrics.subject_detected {
            self.undetected_frames += 1;
            return;
        }
        for warning in &metrics.warnings {
            *self.warning_counts.entry(warning.kind).or_default() += 1;
        }
    }

    pub fn warning_count(&self, kind: WarningKind) -> u32 {
        self.warning_counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total_warnings(&self) -> u32 {
        self.warning_counts.values().sum()
    }

    pub fn undetected_frames(&self) -> u32 {
        self.undetected_frames
    }

    /// Mean of `(shoulder + hip) / 2` over every analyzed frame; 0 before any frame.
    pub fn average_stability(&self) -> f64 {
        if self.analyzed_frames == 0 {
            return 0.0;
        }
        self.stability_sum / f64::from(self.analyzed_frames)
    }

    pub fn strength_summary(&self) -> StrengthSummary {
        summarize(&self.samples)
    }

    /// Number of separate contractions: runs of samples above [`ENGAGED_STRENGTH`].
    pub fn contractions(&self) -> usize {
        let mut engaged = false;
        let mut count = 0;
        for &sample in &self.samples {
            let now = sample > ENGAGED_STRENGTH;
            if now && !engaged {
                count += 1;
            }
            engaged = now;
        }
        count
    }

    /// Record for a finished game, using the engine's engaged-tick statistics.
    pub fn game_record(&self, stats: &SessionStats) -> SessionRecord {
        SessionRecord {
            session_id: Uuid::new_v4(),
            kind: SessionKind::Game,
            exercise_name: None,
            duration_secs: stats.duration.as_secs_f64(),
            contractions: stats.sample_count,
            score: Some(stats.final_score),
            posture_enabled: self.posture_enabled,
            posture_warnings: self.total_warnings(),
            average_stability: self.average_stability(),
            max_strength: stats.max_strength,
            mean_strength: stats.mean_strength,
        }
    }

    /// Record for a guided exercise, using the samples collected here.
    pub fn exercise_record(&self, exercise_name: &str, duration: Duration) -> SessionRecord {
        let summary = self.strength_summary();
        SessionRecord {
            session_id: Uuid::new_v4(),
            kind: SessionKind::Exercise,
            exercise_name: Some(exercise_name.to_string()),
            duration_secs: duration.as_secs_f64(),
            contractions: self.contractions(),
            score: None,
            posture_enabled: self.posture_enabled,
            posture_warnings: self.total_warnings(),
            average_stability: self.average_stability(),
            max_strength: summary.max,
            mean_strength: summary.mean,
        }
    }
}

// Hands finished sessions to the persistence collaborator.
pub struct RecordSessionUseCase<R> {
    pub recorder: R,
}

impl<R> RecordSessionUseCase<R>
where
    R: SessionRecorder,
{
    /// The caller keeps `record` so a failed write can be retried.
    pub async fn execute(&self, record: &SessionRecord) -> Result<(), PersistenceError> {
        let session_id = record.session_id;
        self.recorder
            .record(record.clone())
            .await
            .inspect_err(|e| warn!(%session_id, error = %e, "failed to record session"))?;

        info!(
            %session_id,
            kind = ?record.kind,
            score = ?record.score,
            contractions = record.contractions,
            "session recorded"
        );
        Ok(())
    }
}
