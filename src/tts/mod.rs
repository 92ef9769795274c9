pub mod interface;
pub mod silent;

pub use interface::{SpeechOutput, SpeechParams};
pub use silent::SilentSpeech;
