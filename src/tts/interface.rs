use serde::{Deserialize, Serialize};

use crate::config::VoiceConfig;

// ── Speech Parameters ──────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechParams {
    /// Speaking rate, 1.0 = platform normal. Slower for elderly listeners.
    pub rate: f32,
    pub volume: f32,
    /// BCP-47 language tag, e.g. "en-US".
    pub language: String,
}

impl Default for SpeechParams {
    fn default() -> Self {
        Self::from_config(&VoiceConfig::default())
    }
}

impl SpeechParams {
    pub fn from_config(config: &VoiceConfig) -> Self {
        Self {
            rate: config.rate,
            volume: config.volume,
            language: config.language.clone(),
        }
    }
}

// ── Output Capability ──────────────────────────────────

/// Platform text-to-speech facility.
///
/// Speaking is fire-and-forget: callers do not wait for completion and
/// overlapping requests are the platform's business.
pub trait SpeechOutput: Send {
    /// Unique identifier for this output (e.g., "browser", "silent")
    fn id(&self) -> String;

    /// Queue `text` for speaking.
    fn speak(&mut self, text: &str, params: &SpeechParams);

    /// Stop all current and queued speech.
    fn cancel(&mut self);
}
