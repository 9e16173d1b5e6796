// Guided exercise: rest/contract/release phase cycle and live biofeedback.

use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExercisePhase {
    Rest,
    Contract,
    Release,
}

/// Seconds spent in each phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PhaseTiming {
    pub rest_secs: u32,
    pub contract_secs: u32,
    pub release_secs: u32,
}

impl Default for PhaseTiming {
    fn default() -> Self {
        Self {
            rest_secs: 10,
            contract_secs: 5,
            release_secs: 3,
        }
    }
}

impl PhaseTiming {
    fn duration_of(&self, phase: ExercisePhase) -> u32 {
        match phase {
            ExercisePhase::Rest => self.rest_secs,
            ExercisePhase::Contract => self.contract_secs,
            ExercisePhase::Release => self.release_secs,
        }
    }
}

/// Countdown through Rest -> Contract -> Release -> Rest, one call per second.
#[derive(Debug, Clone)]
pub struct ExerciseCycle {
    timing: PhaseTiming,
    phase: ExercisePhase,
    remaining_secs: u32,
    completed_cycles: u32,
}

impl ExerciseCycle {
    pub fn new(timing: PhaseTiming) -> Self {
        Self {
            timing,
            phase: ExercisePhase::Rest,
            remaining_secs: timing.rest_secs,
            completed_cycles: 0,
        }
    }

    pub fn phase(&self) -> ExercisePhase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Full Rest/Contract/Release rounds finished so far.
    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    /// Counts one second down; returns the new phase when the current one ran out.
    pub fn tick_second(&mut self) -> Option<ExercisePhase> {
        if self.remaining_secs > 1 {
            self.remaining_secs -= 1;
            return None;
        }

        let next = match self.phase {
            ExercisePhase::Rest => ExercisePhase::Contract,
            ExercisePhase::Contract => ExercisePhase::Release,
            ExercisePhase::Release => {
                self.completed_cycles += 1;
                ExercisePhase::Rest
            }
        };
        self.phase = next;
        self.remaining_secs = self.timing.duration_of(next);
        debug!(phase = ?next, remaining_secs = self.remaining_secs, "exercise phase changed");
        Some(next)
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.timing);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Success,
    Warning,
    Neutral,
}

/// What the biofeedback display shows for the current reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Biofeedback {
    pub current: u8,
    pub target: u8,
    /// Reached at 90% of the target.
    pub in_target: bool,
    /// `current / target` as a percentage, capped at 100.
    pub progress: f64,
    pub feedback: Feedback,
}

impl Biofeedback {
    const TARGET_TOLERANCE: f64 = 0.9;

    pub fn evaluate(current: u8, target: u8) -> Self {
        let current = current.min(100);
        let in_target = f64::from(current) >= f64::from(target) * Self::TARGET_TOLERANCE;
        let progress = if target == 0 {
            0.0
        } else {
            (f64::from(current) / f64::from(target) * 100.0).min(100.0)
        };

        Self {
            current,
            target,
            in_target,
            progress,
            feedback: if in_target {
                Feedback::Success
            } else {
                Feedback::Neutral
            },
        }
    }

    /// Downgrades the feedback to a warning when posture is off.
    pub fn with_posture(mut self, is_correct: bool) -> Self {
        if !is_correct {
            self.feedback = Feedback::Warning;
        }
        self
    }
}
