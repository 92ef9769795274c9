use super::interface::{
    ErrorCallback, ListenSession, RecognitionOptions, ResultCallback, SpeechInput, SttError,
};

/// Input for platforms without speech recognition. Every start fails.
#[derive(Debug, Default)]
pub struct UnsupportedInput;

impl SpeechInput for UnsupportedInput {
    fn is_supported(&self) -> bool {
        false
    }

    fn start(
        &mut self,
        _options: &RecognitionOptions,
        _on_result: ResultCallback,
        _on_error: ErrorCallback,
    ) -> Result<Box<dyn ListenSession>, SttError> {
        Err(SttError::NotSupported)
    }
}
