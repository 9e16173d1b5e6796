use serde::Deserialize;

/// Tuning for the strength-driven body.
///
/// Velocities are in render units per tick, angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BodyTuning {
    /// Fixed horizontal position of the body.
    pub start_x: f64,

    /// Collision radius.
    pub radius: f64,

    /// Downward acceleration added each tick while relaxed.
    pub gravity: f64,

    /// Velocity applied on an engaged tick (negative is up).
    pub jump_force: f64,

    /// Terminal falling velocity.
    pub max_velocity: f64,

    /// Velocity given by `start()` so the body does not drop immediately.
    pub initial_impulse: f64,

    /// Strength above which a tick counts as engaged.
    pub high_strength_threshold: u8,

    /// Rotation set on an engaged tick.
    pub jump_rotation: f64,

    /// Degrees of nose-down rotation per unit of falling velocity.
    pub rotation_per_velocity: f64,

    /// Upper bound for the falling rotation.
    pub max_fall_rotation: f64,
}

impl Default for BodyTuning {
    fn default() -> Self {
        Self {
            start_x: 80.0,
            radius: 20.0,
            gravity: 0.6,
            jump_force: -10.0,
            max_velocity: 10.0,
            initial_impulse: -3.0,
            high_strength_threshold: 70,
            jump_rotation: -25.0,
            rotation_per_velocity: 3.0,
            max_fall_rotation: 90.0,
        }
    }
}
