//! Speech port: optional dictation capability.
//!
//! Whether dictation exists is decided once at startup; the rest of the
//! application only ever sees a `SpeechCapability`.

use std::fmt;
use std::sync::Arc;

/// Errors from a dictation session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("invalid recognizer command: {0}")]
    InvalidCommand(String),

    #[error("failed to launch recognizer: {0}")]
    Launch(String),

    #[error("recognizer failed: {0}")]
    Failed(String),

    #[error("no speech recognized")]
    NoMatch,
}

/// A speech-to-text engine that captures a single utterance.
pub trait SpeechRecognizer: Send + Sync {
    /// Run one non-continuous session and return the final transcript.
    ///
    /// # Errors
    /// `SpeechError::NoMatch` when nothing was recognized; other variants when
    /// the engine itself failed.
    fn recognize_once(&self, locale: &str) -> Result<String, SpeechError>;

    /// Engine name for logs.
    fn name(&self) -> &str;
}

/// Dictation capability injected into the app.
#[derive(Clone)]
pub enum SpeechCapability {
    Available(Arc<dyn SpeechRecognizer>),
    Unavailable,
}

impl SpeechCapability {
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    #[must_use]
    pub fn recognizer(&self) -> Option<Arc<dyn SpeechRecognizer>> {
        match self {
            Self::Available(r) => Some(Arc::clone(r)),
            Self::Unavailable => None,
        }
    }
}

impl fmt::Debug for SpeechCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available(r) => f.debug_tuple("Available").field(&r.name()).finish(),
            Self::Unavailable => f.write_str("Unavailable"),
        }
    }
}
