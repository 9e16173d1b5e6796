// Adapters for the persistence ports: high-score storage and session recording.

use crate::domain::PersistenceError;
use crate::domain::ports::{HighScoreStore, SessionRecorder};
use crate::domain::stats::SessionRecord;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// High score kept only for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHighScoreStore {
    value: Arc<Mutex<u64>>,
}

impl InMemoryHighScoreStore {
    pub fn new(initial: u64) -> Self {
        Self {
            value: Arc::new(Mutex::new(initial)),
        }
    }
}

impl HighScoreStore for InMemoryHighScoreStore {
    fn load(&self) -> Result<u64, PersistenceError> {
        self.value
            .lock()
            .map(|value| *value)
            .map_err(|_| PersistenceError::Unavailable("high score lock poisoned".to_string()))
    }

    fn save(&self, high_score: u64) -> Result<(), PersistenceError> {
        let mut value = self
            .value
            .lock()
            .map_err(|_| PersistenceError::Unavailable("high score lock poisoned".to_string()))?;
        *value = high_score;
        Ok(())
    }
}

/// High score stored as a decimal number in a single file.
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for FileHighScoreStore {
    /// A missing file reads as 0.
    fn load(&self) -> Result<u64, PersistenceError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(PersistenceError::Unavailable(format!(
                    "{}: {e}",
                    self.path.display()
                )));
            }
        };

        contents.trim().parse::<u64>().map_err(|e| {
            PersistenceError::Corrupt(format!("{}: {e}", self.path.display()))
        })
    }

    /// Writes a sibling `.tmp` file and renames it over the target; an interrupted
    /// save leaves the previous value.
    fn save(&self, high_score: u64) -> Result<(), PersistenceError> {
        let unavailable = |e: std::io::Error| {
            PersistenceError::Unavailable(format!("{}: {e}", self.path.display()))
        };
        let staging = self.staging_path();

        std::fs::write(&staging, high_score.to_string()).map_err(unavailable)?;
        std::fs::rename(&staging, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&staging);
            unavailable(e)
        })
    }
}

impl FileHighScoreStore {
    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

/// Emits each finished session as one JSON line through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSessionRecorder;

#[async_trait]
impl SessionRecorder for TracingSessionRecorder {
    async fn record(&self, record: SessionRecord) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(&record)
            .map_err(|e| PersistenceError::Unavailable(format!("serialize session: {e}")))?;
        tracing::info!(target: "session_record", session = %json, "session summary");
        Ok(())
    }
}

/// Keeps recorded sessions in memory; clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionRecorder {
    records: Arc<Mutex<Vec<SessionRecord>>>,
}

impl InMemorySessionRecorder {
    pub fn records(&self) -> Vec<SessionRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SessionRecorder for InMemorySessionRecorder {
    async fn record(&self, record: SessionRecord) -> Result<(), PersistenceError> {
        self.records
            .lock()
            .map_err(|_| PersistenceError::Unavailable("session list lock poisoned".to_string()))?
            .push(record);
        Ok(())
    }
}
