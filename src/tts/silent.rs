use super::interface::{SpeechOutput, SpeechParams};

/// Output for hosts without a speech engine.
///
/// Nothing is spoken; text is only traced so the rest of the core keeps
/// working on headless or unsupported platforms.
#[derive(Debug, Default)]
pub struct SilentSpeech;

impl SilentSpeech {
    pub fn new() -> Self {
        Self
    }
}

impl SpeechOutput for SilentSpeech {
    fn id(&self) -> String {
        "silent".to_string()
    }

    fn speak(&mut self, text: &str, params: &SpeechParams) {
        tracing::debug!(text, rate = params.rate, "speech dropped, no output available");
    }

    fn cancel(&mut self) {}
}
