pub mod ai;
pub mod care;
pub mod config;
pub mod logging;
pub mod notify;
pub mod photo;
pub mod stt;
pub mod tts;
pub mod utils;

pub use ai::{classify_intent, Intent, IntentResponse, VoiceAssistant};
pub use care::{CareError, CareStore};
pub use config::{load_config, save_config, CompanionConfig};
pub use logging::init_logging;
pub use photo::{infer_gender, select_photo, Gender, PersonProfile, PhotoCatalog, PhotoGenerator, PhotoSelector};
pub use utils::random::{RandomSource, ThreadRandom};
