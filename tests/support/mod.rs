// Shared fixtures for driving whole sessions in integration tests.

use async_trait::async_trait;
use rehab_engine::RuntimeSettings;
use rehab_engine::domain::ports::SessionRecorder;
use rehab_engine::domain::{PersistenceError, SessionRecord};
use std::path::PathBuf;
use std::time::Duration;

// Settings for a deterministic run: fixed seed, default physics, bounded length.
pub fn settings() -> RuntimeSettings {
    RuntimeSettings {
        tick_interval: Duration::from_millis(16),
        posture_interval: Duration::from_millis(100),
        rng_seed: 7,
        max_ticks: 20_000,
        ..RuntimeSettings::default()
    }
}

// Recorder that rejects every session, standing in for an unreachable backend.
#[derive(Clone, Copy, Default)]
pub struct FailingRecorder;

#[async_trait]
impl SessionRecorder for FailingRecorder {
    async fn record(&self, _record: SessionRecord) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable("backend offline".to_string()))
    }
}

// Unique scratch file path under the system temp directory.
pub fn scratch_file(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{prefix}-{}", uuid::Uuid::new_v4()))
}
