// Posture rules: landmark positions against a calibrated baseline.

use crate::domain::landmarks::{Landmark, LandmarkSet};
use crate::domain::tuning::PostureConfig;

pub const FULL_STABILITY: f64 = 100.0;

const SHOULDER_RISE_HIGH_PENALTY: f64 = 40.0;
const SHOULDER_RISE_MEDIUM_PENALTY: f64 = 20.0;
const SHOULDER_ASYMMETRY_PENALTY: f64 = 30.0;
const HIP_SHIFT_HIGH_PENALTY: f64 = 50.0;
const HIP_SHIFT_MEDIUM_PENALTY: f64 = 25.0;
const HIP_TILT_PENALTY: f64 = 30.0;

const NOT_DETECTED_MESSAGE: &str = "Cannot detect your posture, make sure you are in frame";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WarningKind {
    ShouldersRaised,
    ShouldersAsymmetric,
    HipsShifted,
    HipsTilted,
    LeanForward,
    LeanBackward,
}

impl WarningKind {
    pub const ALL: [WarningKind; 6] = [
        WarningKind::ShouldersRaised,
        WarningKind::ShouldersAsymmetric,
        WarningKind::HipsShifted,
        WarningKind::HipsTilted,
        WarningKind::LeanForward,
        WarningKind::LeanBackward,
    ];

    /// Coaching text shown to the user for this kind at the given severity.
    pub fn message(self, severity: Severity) -> &'static str {
        match (self, severity) {
            (WarningKind::ShouldersRaised, Severity::High) => "Relax your shoulders",
            (WarningKind::ShouldersRaised, _) => "Shoulders slightly raised",
            (WarningKind::ShouldersAsymmetric, _) => "Keep your shoulders level",
            (WarningKind::HipsShifted, Severity::High) => "Keep your hips still",
            (WarningKind::HipsShifted, _) => "Hips slightly shifted",
            (WarningKind::HipsTilted, _) => "Keep your hips level",
            (WarningKind::LeanForward, _) => "You are leaning forward",
            (WarningKind::LeanBackward, _) => "You are leaning backward",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub kind: WarningKind,
    pub severity: Severity,
    pub message: &'static str,
    pub timestamp_ms: u64,
}

impl Warning {
    pub fn new(kind: WarningKind, severity: Severity, timestamp_ms: u64) -> Self {
        Self {
            kind,
            severity,
            message: kind.message(severity),
            timestamp_ms,
        }
    }

    /// The single warning attached to frames where no body could be measured.
    pub fn not_detected(timestamp_ms: u64) -> Self {
        Self {
            kind: WarningKind::LeanForward,
            severity: Severity::High,
            message: NOT_DETECTED_MESSAGE,
            timestamp_ms,
        }
    }
}

/// Reference shoulder/hip heights captured on the first usable frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    pub shoulder_height: f64,
    pub hip_height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostureMetrics {
    /// 0..=100, 100 means shoulders are where they were at calibration.
    pub shoulder_stability: f64,
    /// 0..=100
    pub hip_stability: f64,
    /// Mean y of both shoulders.
    pub shoulder_height: f64,
    /// Absolute height difference between the hips.
    pub hip_alignment: f64,
    pub is_correct: bool,
    /// False when the required points were missing or below confidence.
    pub subject_detected: bool,
    pub warnings: Vec<Warning>,
}

impl PostureMetrics {
    pub fn not_detected(timestamp_ms: u64) -> Self {
        Self {
            shoulder_stability: 0.0,
            hip_stability: 0.0,
            shoulder_height: 0.0,
            hip_alignment: 0.0,
            is_correct: false,
            subject_detected: false,
            warnings: vec![Warning::not_detected(timestamp_ms)],
        }
    }

    pub fn average_stability(&self) -> f64 {
        (self.shoulder_stability + self.hip_stability) / 2.0
    }
}

/// The four points every rule needs, already confidence-filtered.
struct TorsoPoints {
    left_shoulder: Landmark,
    right_shoulder: Landmark,
    left_hip: Landmark,
    right_hip: Landmark,
}

impl TorsoPoints {
    fn from_set(set: &LandmarkSet, min_confidence: f64) -> Option<Self> {
        let usable = |point: Option<Landmark>| {
            point.filter(|p| p.confidence >= min_confidence && p.x.is_finite() && p.y.is_finite())
        };
        Some(Self {
            left_shoulder: usable(set.left_shoulder)?,
            right_shoulder: usable(set.right_shoulder)?,
            left_hip: usable(set.left_hip)?,
            right_hip: usable(set.right_hip)?,
        })
    }

    fn shoulder_height(&self) -> f64 {
        (self.left_shoulder.y + self.right_shoulder.y) / 2.0
    }

    fn hip_height(&self) -> f64 {
        (self.left_hip.y + self.right_hip.y) / 2.0
    }
}

/// Scores one frame.
///
/// The first frame with all four torso points sets `baseline` and is then scored
/// against itself. Frames without a usable torso leave `baseline` untouched and
/// yield [`PostureMetrics::not_detected`].
pub fn analyze(
    landmarks: Option<&LandmarkSet>,
    baseline: &mut Option<Baseline>,
    config: &PostureConfig,
    timestamp_ms: u64,
) -> PostureMetrics {
    let Some(torso) = landmarks.and_then(|set| TorsoPoints::from_set(set, config.min_confidence))
    else {
        return PostureMetrics::not_detected(timestamp_ms);
    };

    let shoulder_height = torso.shoulder_height();
    let hip_height = torso.hip_height();
    let baseline = *baseline.get_or_insert(Baseline {
        shoulder_height,
        hip_height,
    });

    let thresholds = &config.thresholds;
    let mut warnings = Vec::new();
    let mut shoulder_stability = FULL_STABILITY;
    let mut hip_stability = FULL_STABILITY;

    // Image y grows downward, so a positive rise means the shoulders went up.
    let shoulder_rise = baseline.shoulder_height - shoulder_height;
    if shoulder_rise > thresholds.shoulder_rise_high {
        shoulder_stability -= SHOULDER_RISE_HIGH_PENALTY;
        warnings.push(Warning::new(
            WarningKind::ShouldersRaised,
            Severity::High,
            timestamp_ms,
        ));
    } else if shoulder_rise > thresholds.shoulder_rise_medium {
        shoulder_stability -= SHOULDER_RISE_MEDIUM_PENALTY;
        warnings.push(Warning::new(
            WarningKind::ShouldersRaised,
            Severity::Medium,
            timestamp_ms,
        ));
    }

    let shoulder_diff = (torso.left_shoulder.y - torso.right_shoulder.y).abs();
    if shoulder_diff > thresholds.shoulder_asymmetry {
        shoulder_stability -= SHOULDER_ASYMMETRY_PENALTY;
        warnings.push(Warning::new(
            WarningKind::ShouldersAsymmetric,
            Severity::Medium,
            timestamp_ms,
        ));
    }

    let hip_shift = (baseline.hip_height - hip_height).abs();
    if hip_shift > thresholds.hip_shift_high {
        hip_stability -= HIP_SHIFT_HIGH_PENALTY;
        warnings.push(Warning::new(
            WarningKind::HipsShifted,
            Severity::High,
            timestamp_ms,
        ));
    } else if hip_shift > thresholds.hip_shift_medium {
        hip_stability -= HIP_SHIFT_MEDIUM_PENALTY;
        warnings.push(Warning::new(
            WarningKind::HipsShifted,
            Severity::Medium,
            timestamp_ms,
        ));
    }

    let hip_alignment = (torso.left_hip.y - torso.right_hip.y).abs();
    if hip_alignment > thresholds.hip_tilt {
        hip_stability -= HIP_TILT_PENALTY;
        warnings.push(Warning::new(
            WarningKind::HipsTilted,
            Severity::Medium,
            timestamp_ms,
        ));
    }

    let shoulder_stability = shoulder_stability.clamp(0.0, FULL_STABILITY);
    let hip_stability = hip_stability.clamp(0.0, FULL_STABILITY);
    let average = (shoulder_stability + hip_stability) / 2.0;

    PostureMetrics {
        shoulder_stability,
        hip_stability,
        shoulder_height,
        hip_alignment,
        is_correct: average >= config.stability_threshold * FULL_STABILITY,
        subject_detected: true,
        warnings,
    }
}
