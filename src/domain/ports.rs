use async_trait::async_trait;

use crate::domain::errors::PersistenceError;
use crate::domain::landmarks::LandmarkSet;
use crate::domain::stats::SessionRecord;

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> u64;
}

// Port for the key-value store holding the best game score.
pub trait HighScoreStore: Send + Sync {
    fn load(&self) -> Result<u64, PersistenceError>;
    fn save(&self, high_score: u64) -> Result<(), PersistenceError>;
}

// Port for the collaborator that stores finished sessions.
#[async_trait]
pub trait SessionRecorder: Send + Sync {
    async fn record(&self, record: SessionRecord) -> Result<(), PersistenceError>;
}

// Port for the pose model; `None` means no body in frame.
pub trait LandmarkSource: Send {
    fn next_frame(&mut self) -> Option<LandmarkSet>;
}
