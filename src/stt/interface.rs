//! Speech Input Interface & Core Types
//!
//! Defines the abstract contract for platform speech recognition: a
//! start/stop listening session that reports transcripts and errors
//! through callbacks.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::VoiceConfig;

// ── Core Data Structures ────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionOptions {
    /// Keep listening across pauses until stopped.
    pub continuous: bool,
    /// Deliver non-final hypotheses as well.
    pub interim_results: bool,
    pub language: String,
}

impl Default for RecognitionOptions {
    fn default() -> Self {
        Self::from_config(&VoiceConfig::default())
    }
}

impl RecognitionOptions {
    pub fn from_config(config: &VoiceConfig) -> Self {
        Self {
            continuous: true,
            interim_results: true,
            language: config.language.clone(),
        }
    }
}

/// One recognition hypothesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    pub is_final: bool,
}

impl Transcript {
    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }

    pub fn final_(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: true,
        }
    }
}

// ── Error Handling ─────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum SttError {
    #[error("speech recognition is not supported on this platform")]
    NotSupported,
    #[error("microphone permission denied")]
    PermissionDenied,
    #[error("no speech detected")]
    NoSpeech,
    /// The session finished on its own. Not a failure.
    #[error("recognition session ended")]
    SessionEnded,
    #[error("speech recognition failed: {0}")]
    Failed(String),
}

// ── Input Capability ───────────────────────────────────

pub type ResultCallback = Box<dyn FnMut(Transcript) + Send>;
pub type ErrorCallback = Box<dyn FnMut(SttError) + Send>;

/// A running listening session.
pub trait ListenSession: Send {
    fn stop(&mut self);
}

/// Platform speech-recognition facility.
///
/// Starting while a session is already running is not guarded against;
/// callers track their own listening state.
pub trait SpeechInput: Send {
    fn is_supported(&self) -> bool;

    fn start(
        &mut self,
        options: &RecognitionOptions,
        on_result: ResultCallback,
        on_error: ErrorCallback,
    ) -> Result<Box<dyn ListenSession>, SttError>;
}
