pub mod assistant;
pub mod intent;

#[cfg(test)]
mod tests;

pub use assistant::{AssistantError, QuickCommand, VoiceAssistant, QUICK_COMMANDS};
pub use intent::{classify_intent, ClockFormat, Intent, IntentClassifier, IntentResponse, MatchMode};
