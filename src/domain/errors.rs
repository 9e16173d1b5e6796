use std::fmt;

// Failures reported by persistence adapters (high scores, session records).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    Unavailable(String),
    Corrupt(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Unavailable(reason) => write!(f, "store unavailable: {reason}"),
            PersistenceError::Corrupt(reason) => write!(f, "stored value is corrupt: {reason}"),
        }
    }
}

impl std::error::Error for PersistenceError {}
