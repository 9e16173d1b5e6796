//! Thresholds for posture analysis.
//!
//! Distances share the landmark source's coordinate space and are tuned for a
//! 480-unit tall frame (640x480 webcam input).

use serde::Deserialize;

/// Frame height the default distance thresholds were tuned against.
pub const REFERENCE_FRAME_HEIGHT: f64 = 480.0;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PostureThresholds {
    /// Shoulder rise above baseline that counts as slightly raised.
    pub shoulder_rise_medium: f64,
    /// Shoulder rise above baseline that counts as clearly raised.
    pub shoulder_rise_high: f64,
    /// Left/right shoulder height difference.
    pub shoulder_asymmetry: f64,
    pub hip_shift_medium: f64,
    pub hip_shift_high: f64,
    /// Left/right hip height difference.
    pub hip_tilt: f64,
}

impl Default for PostureThresholds {
    fn default() -> Self {
        Self {
            shoulder_rise_medium: 15.0,
            shoulder_rise_high: 30.0,
            shoulder_asymmetry: 40.0,
            hip_shift_medium: 20.0,
            hip_shift_high: 40.0,
            hip_tilt: 30.0,
        }
    }
}

impl PostureThresholds {
    /// Rescales every distance for a frame of `frame_height` units.
    pub fn scaled_to(self, frame_height: f64) -> Self {
        let factor = frame_height / REFERENCE_FRAME_HEIGHT;
        Self {
            shoulder_rise_medium: self.shoulder_rise_medium * factor,
            shoulder_rise_high: self.shoulder_rise_high * factor,
            shoulder_asymmetry: self.shoulder_asymmetry * factor,
            hip_shift_medium: self.hip_shift_medium * factor,
            hip_shift_high: self.hip_shift_high * factor,
            hip_tilt: self.hip_tilt * factor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PostureConfig {
    /// Keypoints below this confidence count as missing.
    pub min_confidence: f64,

    /// Fraction (0..=1) of full stability required for correct posture.
    pub stability_threshold: f64,

    pub thresholds: PostureThresholds,
}

impl Default for PostureConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            stability_threshold: 0.85,
            thresholds: PostureThresholds::default(),
        }
    }
}
