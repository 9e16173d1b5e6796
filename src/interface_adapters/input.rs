// Input stand-ins: the binary contraction fallback and scripted pose frames.

use crate::domain::ports::LandmarkSource;
use crate::domain::state::clamp_strength;
use crate::domain::{BodyPoint, Landmark, LandmarkSet};

/// Strength reported while the fallback control is held during a game.
pub const GAME_ENGAGED_STRENGTH: u8 = 85;
/// Strength reported while the fallback control is held during an exercise.
pub const EXERCISE_ENGAGED_STRENGTH: u8 = 75;

/// Keyboard/touch fallback for the sensor: held reads as a fixed strength, released as 0.
#[derive(Debug, Clone, Copy)]
pub struct ContractionSimulator {
    engaged_strength: u8,
    engaged: bool,
}

impl ContractionSimulator {
    pub fn new(engaged_strength: u8) -> Self {
        Self {
            engaged_strength: clamp_strength(engaged_strength),
            engaged: false,
        }
    }

    pub fn for_game() -> Self {
        Self::new(GAME_ENGAGED_STRENGTH)
    }

    pub fn for_exercise() -> Self {
        Self::new(EXERCISE_ENGAGED_STRENGTH)
    }

    pub fn press(&mut self) {
        self.engaged = true;
    }

    pub fn release(&mut self) {
        self.engaged = false;
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn strength(&self) -> u8 {
        if self.engaged { self.engaged_strength } else { 0 }
    }
}

/// Presses and releases a simulator on a fixed schedule, one step per tick.
#[derive(Debug, Clone)]
pub struct PulsePattern {
    simulator: ContractionSimulator,
    hold_ticks: u32,
    rest_ticks: u32,
    position: u32,
}

impl PulsePattern {
    /// Each period rests for `rest_ticks` then holds for `hold_ticks`.
    pub fn new(simulator: ContractionSimulator, hold_ticks: u32, rest_ticks: u32) -> Self {
        Self {
            simulator,
            hold_ticks,
            rest_ticks,
            position: 0,
        }
    }

    pub fn next_strength(&mut self) -> u8 {
        let period = self.hold_ticks + self.rest_ticks;
        if period == 0 {
            return 0;
        }
        if self.position % period < self.rest_ticks {
            self.simulator.release();
        } else {
            self.simulator.press();
        }
        self.position = self.position.wrapping_add(1);
        self.simulator.strength()
    }
}

/// Replays a fixed list of frames in a loop; `None` entries mean nobody in frame.
#[derive(Debug, Clone)]
pub struct ScriptedLandmarkSource {
    frames: Vec<Option<LandmarkSet>>,
    next: usize,
}

impl ScriptedLandmarkSource {
    pub fn new(frames: Vec<Option<LandmarkSet>>) -> Self {
        Self { frames, next: 0 }
    }

    /// A subject that never moves from the given heights.
    pub fn steady(shoulder_y: f64, hip_y: f64) -> Self {
        Self::new(vec![Some(upright_torso(shoulder_y, hip_y))])
    }
}

impl LandmarkSource for ScriptedLandmarkSource {
    fn next_frame(&mut self) -> Option<LandmarkSet> {
        if self.frames.is_empty() {
            return None;
        }
        let frame = self.frames[self.next % self.frames.len()].clone();
        self.next = (self.next + 1) % self.frames.len();
        frame
    }
}

/// Level shoulders and hips centred in a 640-wide frame, all points fully confident.
pub fn upright_torso(shoulder_y: f64, hip_y: f64) -> LandmarkSet {
    LandmarkSet::default()
        .with(BodyPoint::Nose, Landmark::new(320.0, shoulder_y - 80.0, 1.0))
        .with(BodyPoint::LeftShoulder, Landmark::new(260.0, shoulder_y, 1.0))
        .with(BodyPoint::RightShoulder, Landmark::new(380.0, shoulder_y, 1.0))
        .with(BodyPoint::LeftHip, Landmark::new(280.0, hip_y, 1.0))
        .with(BodyPoint::RightHip, Landmark::new(360.0, hip_y, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_simulator_is_held_then_it_reports_the_engaged_strength() {
        let mut game = ContractionSimulator::for_game();
        let mut exercise = ContractionSimulator::for_exercise();
        assert_eq!(game.strength(), 0);

        game.press();
        exercise.press();
        assert_eq!(game.strength(), 85);
        assert_eq!(exercise.strength(), 75);

        game.release();
        assert_eq!(game.strength(), 0);
        assert!(!game.is_engaged());
    }

    #[test]
    fn when_engaged_strength_is_out_of_range_then_it_is_clamped() {
        let mut simulator = ContractionSimulator::new(200);
        simulator.press();

        assert_eq!(simulator.strength(), 100);
    }

    #[test]
    fn when_pattern_runs_then_it_alternates_rest_and_hold() {
        let mut pattern = PulsePattern::new(ContractionSimulator::for_game(), 2, 3);

        let strengths: Vec<u8> = (0..10).map(|_| pattern.next_strength()).collect();

        assert_eq!(strengths, vec![0, 0, 0, 85, 85, 0, 0, 0, 85, 85]);
    }

    #[test]
    fn when_pattern_has_no_period_then_it_stays_released() {
        let mut pattern = PulsePattern::new(ContractionSimulator::for_game(), 0, 0);

        assert_eq!(pattern.next_strength(), 0);
    }

    #[test]
    fn when_script_is_exhausted_then_it_loops() {
        let frame = upright_torso(200.0, 400.0);
        let mut source = ScriptedLandmarkSource::new(vec![Some(frame.clone()), None]);

        assert_eq!(source.next_frame(), Some(frame.clone()));
        assert_eq!(source.next_frame(), None);
        assert_eq!(source.next_frame(), Some(frame));
    }

    #[test]
    fn when_script_is_empty_then_nobody_is_in_frame() {
        let mut source = ScriptedLandmarkSource::new(Vec::new());

        assert_eq!(source.next_frame(), None);
    }
}
