use crate::domain::{GamePhysics, PostureConfig};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, time::Duration};

// Runtime constants (not gameplay tuning).

pub const GAME_COMMAND_CHANNEL_CAPACITY: usize = 1024;
pub const POSTURE_COMMAND_CHANNEL_CAPACITY: usize = 64;
pub const UPDATE_BROADCAST_CAPACITY: usize = 128;
pub const METRICS_BROADCAST_CAPACITY: usize = 64;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);
pub const DEFAULT_POSTURE_INTERVAL: Duration = Duration::from_millis(100);
// About ten minutes of play at the default tick rate.
pub const DEFAULT_MAX_TICKS: u64 = 37_500;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidValue { name: &'static str, value: String },
    TuningUnreadable { path: PathBuf, message: String },
    TuningInvalid { path: PathBuf, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { name, value } => {
                write!(f, "invalid value {value:?} for {name}")
            }
            ConfigError::TuningUnreadable { path, message } => {
                write!(f, "cannot read tuning file {}: {message}", path.display())
            }
            ConfigError::TuningInvalid { path, message } => {
                write!(f, "invalid tuning file {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Gameplay and posture overrides read from the optional TOML file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub physics: GamePhysics,
    pub posture: PostureConfig,
}

impl Tuning {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::TuningUnreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::TuningInvalid {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Everything the runner needs, resolved from the environment.
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub tick_interval: Duration,
    pub posture_interval: Duration,
    /// `None` keeps the high score in memory.
    pub high_score_path: Option<PathBuf>,
    pub physics: GamePhysics,
    pub posture: PostureConfig,
    pub rng_seed: u64,
    pub max_ticks: u64,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            posture_interval: DEFAULT_POSTURE_INTERVAL,
            high_score_path: None,
            physics: GamePhysics::default(),
            posture: PostureConfig::default(),
            rng_seed: 0,
            max_ticks: DEFAULT_MAX_TICKS,
        }
    }
}

impl RuntimeSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolves settings through `lookup`; unset variables fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tick_interval =
            millis(&lookup, "REHAB_TICK_INTERVAL_MS")?.unwrap_or(DEFAULT_TICK_INTERVAL);
        let posture_interval =
            millis(&lookup, "REHAB_POSTURE_INTERVAL_MS")?.unwrap_or(DEFAULT_POSTURE_INTERVAL);

        let tuning = match lookup("REHAB_TUNING_PATH") {
            Some(path) => Tuning::load(Path::new(&path))?,
            None => Tuning::default(),
        };

        let mut posture = tuning.posture;
        if let Some(frame_height) = parse::<f64>(&lookup, "REHAB_FRAME_HEIGHT")? {
            if !(frame_height.is_finite() && frame_height > 0.0) {
                return Err(ConfigError::InvalidValue {
                    name: "REHAB_FRAME_HEIGHT",
                    value: frame_height.to_string(),
                });
            }
            posture.thresholds = posture.thresholds.scaled_to(frame_height);
        }

        Ok(Self {
            tick_interval,
            posture_interval,
            high_score_path: lookup("REHAB_HIGH_SCORE_PATH").map(PathBuf::from),
            physics: tuning.physics,
            posture,
            rng_seed: parse::<u64>(&lookup, "REHAB_RNG_SEED")?.unwrap_or_else(rand::random),
            max_ticks: parse::<u64>(&lookup, "REHAB_MAX_TICKS")?.unwrap_or(DEFAULT_MAX_TICKS),
        })
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(value) = lookup(name) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue { name, value })
}

// Intervals must be at least one millisecond.
fn millis(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<Duration>, ConfigError> {
    match parse::<u64>(lookup, name)? {
        Some(0) => Err(ConfigError::InvalidValue {
            name,
            value: "0".to_string(),
        }),
        other => Ok(other.map(Duration::from_millis)),
    }
}
