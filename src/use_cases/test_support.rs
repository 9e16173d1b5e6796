use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::errors::PersistenceError;
use crate::domain::ports::{Clock, HighScoreStore, SessionRecorder};
use crate::domain::stats::SessionRecord;

// Shared manually-advanced time source for deterministic use-case tests.
#[derive(Clone, Default)]
pub(crate) struct ManualClock(Arc<AtomicU64>);

impl ManualClock {
    pub(crate) fn at(now_ms: u64) -> Self {
        Self(Arc::new(AtomicU64::new(now_ms)))
    }

    pub(crate) fn advance(&self, ms: u64) {
        self.0.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub load: bool,
    pub save: bool,
}

#[derive(Clone)]
pub(crate) struct RecordingHighScores {
    value: Arc<Mutex<u64>>,
    saves: Arc<Mutex<Vec<u64>>>,
    failures: FailureFlags,
}

impl RecordingHighScores {
    pub(crate) fn new(initial: u64) -> Self {
        Self {
            value: Arc::new(Mutex::new(initial)),
            saves: Arc::new(Mutex::new(Vec::new())),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn saves(&self) -> Vec<u64> {
        self.saves.lock().expect("saves mutex poisoned").clone()
    }
}

impl HighScoreStore for RecordingHighScores {
    fn load(&self) -> Result<u64, PersistenceError> {
        if self.failures.load {
            return Err(PersistenceError::Unavailable("load failed".to_string()));
        }
        Ok(*self.value.lock().expect("value mutex poisoned"))
    }

    fn save(&self, high_score: u64) -> Result<(), PersistenceError> {
        if self.failures.save {
            return Err(PersistenceError::Unavailable("save failed".to_string()));
        }
        *self.value.lock().expect("value mutex poisoned") = high_score;
        self.saves.lock().expect("saves mutex poisoned").push(high_score);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingRecorder {
    records: Arc<Mutex<Vec<SessionRecord>>>,
    fail: bool,
}

impl RecordingRecorder {
    pub(crate) fn failing() -> Self {
        Self {
            records: Arc::default(),
            fail: true,
        }
    }

    pub(crate) fn records(&self) -> Vec<SessionRecord> {
        self.records.lock().expect("records mutex poisoned").clone()
    }
}

#[async_trait]
impl SessionRecorder for RecordingRecorder {
    async fn record(&self, record: SessionRecord) -> Result<(), PersistenceError> {
        if self.fail {
            return Err(PersistenceError::Unavailable("record failed".to_string()));
        }
        self.records
            .lock()
            .expect("records mutex poisoned")
            .push(record);
        Ok(())
    }
}
