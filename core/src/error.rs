//! Error types for the IPA-generation boundary.
//!
//! None of these cross `Phonemizer::phonemize`: failures are turned into a
//! bracketed sentinel string there.

use std::time::Duration;

use thiserror::Error;

/// Failure raised by a concrete engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("invalid engine output: {0}")]
    InvalidOutput(String),

    #[error("engine unavailable: {0}")]
    Unavailable(String),
}

/// Failure of a (shared) initialization attempt.
///
/// Cloned to every caller waiting on the same attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InitError {
    #[error("engine initialization timed out after {0:?}")]
    Timeout(Duration),

    #[error("engine initialization failed: {0}")]
    Engine(String),
}

#[derive(Debug, Error)]
pub enum PhonemizeError {
    #[error(transparent)]
    Init(#[from] InitError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl PhonemizeError {
    /// Literal returned to callers in place of a transcription.
    pub fn sentinel(&self) -> String {
        format!("[Error: {}]", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_bracketed() {
        let err = PhonemizeError::from(InitError::Engine("no voice".to_string()));
        assert_eq!(err.sentinel(), "[Error: engine initialization failed: no voice]");
    }
}
