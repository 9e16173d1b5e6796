use serde::Deserialize;

/// Tuning for the scrolling obstacles.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ObstacleTuning {
    /// Leftward scroll per tick.
    pub speed: f64,

    /// Vertical opening between the top and bottom parts.
    pub gap: f64,

    pub width: f64,

    /// Smallest allowed height for either part.
    pub min_height: f64,

    /// Steady-state time between spawns.
    pub spawn_interval_ms: u64,

    /// Extra wait before the spawn clock starts after `start()`.
    pub first_spawn_delay_ms: u64,
}

impl Default for ObstacleTuning {
    fn default() -> Self {
        Self {
            speed: 3.0,
            gap: 150.0,
            width: 60.0,
            min_height: 50.0,
            spawn_interval_ms: 1500,
            first_spawn_delay_ms: 2000,
        }
    }
}
