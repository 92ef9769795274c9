pub mod interface;
pub mod unsupported;

pub use interface::{
    ErrorCallback, ListenSession, RecognitionOptions, ResultCallback, SpeechInput, SttError,
    Transcript,
};
pub use unsupported::UnsupportedInput;
