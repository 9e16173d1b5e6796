// Session statistics handed to the persistence collaborator.

use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StrengthSummary {
    pub max: u8,
    /// 0 when there are no samples.
    pub mean: f64,
    pub count: usize,
}

/// Folds strength samples into max/mean/count.
pub fn summarize(samples: &[u8]) -> StrengthSummary {
    if samples.is_empty() {
        return StrengthSummary::default();
    }
    let total: u64 = samples.iter().map(|&s| u64::from(s)).sum();
    StrengthSummary {
        max: samples.iter().copied().max().unwrap_or(0),
        mean: total as f64 / samples.len() as f64,
        count: samples.len(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionStats {
    pub final_score: u64,
    pub max_strength: u8,
    pub mean_strength: f64,
    pub sample_count: usize,
    pub duration: Duration,
}

impl SessionStats {
    pub fn from_samples(final_score: u64, samples: &[u8], duration: Duration) -> Self {
        let summary = summarize(samples);
        Self {
            final_score,
            max_strength: summary.max,
            mean_strength: summary.mean,
            sample_count: summary.count,
            duration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Game,
    Exercise,
}

// Summary row stored by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRecord {
    pub session_id: Uuid,
    pub kind: SessionKind,
    pub exercise_name: Option<String>,
    pub duration_secs: f64,
    pub contractions: usize,
    pub score: Option<u64>,
    pub posture_enabled: bool,
    pub posture_warnings: u32,
    pub average_stability: f64,
    pub max_strength: u8,
    pub mean_strength: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_there_are_no_samples_then_summary_is_zero() {
        let stats = SessionStats::from_samples(3, &[], Duration::from_secs(12));

        assert_eq!(stats.final_score, 3);
        assert_eq!(stats.max_strength, 0);
        assert_eq!(stats.mean_strength, 0.0);
        assert_eq!(stats.sample_count, 0);
        assert_eq!(stats.duration, Duration::from_secs(12));
    }

    #[test]
    fn when_samples_exist_then_max_mean_and_count_are_reported() {
        let summary = summarize(&[85, 90, 75, 100]);

        assert_eq!(summary.max, 100);
        assert_eq!(summary.mean, 87.5);
        assert_eq!(summary.count, 4);
    }
}
