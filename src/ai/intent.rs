//! Voice Command Intent Classifier: keyword-based topic detection.
//!
//! Uses substring matching (fast, no model call) against an ordered rule
//! list. The first rule with any matching keyword wins; anything else falls
//! through to an echo response listing the supported topics.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Caregiving topic recognised in an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Medication,
    Family,
    Routine,
    Time,
    Quiz,
    Help,
    Birthday,
    Emergency,
    Fallback,
}

/// Classifier output: what to say and which rule produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResponse {
    pub response_text: String,
    pub matched_intent: Intent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockFormat {
    /// `02:05 PM`
    #[default]
    TwelveHour,
    /// `14:05`
    TwentyFourHour,
}

impl ClockFormat {
    pub fn format(self, now: NaiveTime) -> String {
        match self {
            ClockFormat::TwelveHour => now.format("%I:%M %p").to_string(),
            ClockFormat::TwentyFourHour => now.format("%H:%M").to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Keyword anywhere in the utterance, including inside other words.
    #[default]
    Substring,
    /// Keyword must be bounded by non-alphanumeric characters or the ends.
    WholeWord,
}

impl MatchMode {
    fn matches(self, haystack: &str, keyword: &str) -> bool {
        match self {
            MatchMode::Substring => haystack.contains(keyword),
            MatchMode::WholeWord => contains_word(haystack, keyword),
        }
    }
}

fn contains_word(haystack: &str, keyword: &str) -> bool {
    haystack.match_indices(keyword).any(|(start, _)| {
        let end = start + keyword.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}

// ── Rules ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub enum ResponseTemplate {
    Fixed(&'static str),
    /// "The current time is {time}"
    CurrentTime,
}

#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub intent: Intent,
    pub keywords: &'static [&'static str],
    pub response: ResponseTemplate,
}

/// Priority order matters: the first matching rule wins.
pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::Medication,
        keywords: &["medication", "medicine", "pill"],
        response: ResponseTemplate::Fixed(
            "Let me remind you about your medications. Your morning blood pressure medication is due at 8 AM, and your heart medication at 8 AM, 2 PM, and 8 PM. Don't forget to take them with food.",
        ),
    },
    IntentRule {
        intent: Intent::Family,
        keywords: &["family", "daughter", "son"],
        response: ResponseTemplate::Fixed(
            "Your family loves you! Sarah, your daughter, is a teacher in Seattle. Michael, your son, lives nearby with his two children Emma and Jack. Your sister Margaret calls you every Sunday from Florida.",
        ),
    },
    IntentRule {
        intent: Intent::Routine,
        keywords: &["routine", "schedule", "today"],
        response: ResponseTemplate::Fixed(
            "Today's routine includes your morning walk at 7 AM, breakfast at 8 AM, medications at 8:30 AM, reading the newspaper at 9 AM, calling family at 2 PM, afternoon rest at 3 PM, dinner at 6 PM, and evening medications at 7 PM.",
        ),
    },
    IntentRule {
        intent: Intent::Time,
        keywords: &["time", "what time"],
        response: ResponseTemplate::CurrentTime,
    },
    IntentRule {
        intent: Intent::Quiz,
        keywords: &["quiz", "memory", "brain"],
        response: ResponseTemplate::Fixed(
            "The memory quiz helps exercise your brain! It includes questions about your family, daily routine, and general health knowledge. Regular mental exercise is great for keeping your mind sharp.",
        ),
    },
    IntentRule {
        intent: Intent::Help,
        keywords: &["help", "what can you do"],
        response: ResponseTemplate::Fixed(
            "I can help you with medications, remind you about family members, tell you about your daily routine, announce the time, and provide memory exercises. Just speak naturally and I'll do my best to help!",
        ),
    },
    IntentRule {
        intent: Intent::Birthday,
        keywords: &["birthday", "birthdays"],
        response: ResponseTemplate::Fixed(
            "Here are some important birthdays: Sarah's birthday is March 15th, Michael's is July 22nd, Emma's is September 8th, Jack's is December 3rd, and your sister Margaret's is May 10th.",
        ),
    },
    IntentRule {
        intent: Intent::Emergency,
        keywords: &["emergency", "help me"],
        response: ResponseTemplate::Fixed(
            "If this is an emergency, please call 911 immediately. For medication questions, contact your doctor. Your family members' phone numbers are available in the family section.",
        ),
    },
];

const SUPPORTED_TOPICS: &str =
    "I can help with medications, family information, daily routines, time, and memory exercises. What would you like to know about?";

// ── Classifier ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier {
    clock_format: ClockFormat,
    match_mode: MatchMode,
}

impl IntentClassifier {
    pub fn new(clock_format: ClockFormat, match_mode: MatchMode) -> Self {
        Self {
            clock_format,
            match_mode,
        }
    }

    pub fn from_config(config: &crate::config::AssistantConfig) -> Self {
        Self::new(config.clock_format, config.match_mode)
    }

    /// First rule whose keywords appear in the utterance, if any.
    pub fn match_rule(&self, utterance: &str) -> Option<&'static IntentRule> {
        let lower = utterance.to_lowercase();
        INTENT_RULES.iter().find(|rule| {
            rule.keywords
                .iter()
                .any(|kw| self.match_mode.matches(&lower, kw))
        })
    }

    /// Classify an utterance. Total: every input produces a response.
    pub fn classify(&self, utterance: &str, now: NaiveTime) -> IntentResponse {
        let response = match self.match_rule(utterance) {
            Some(rule) => IntentResponse {
                response_text: match rule.response {
                    ResponseTemplate::Fixed(text) => text.to_string(),
                    ResponseTemplate::CurrentTime => {
                        format!("The current time is {}", self.clock_format.format(now))
                    }
                },
                matched_intent: rule.intent,
            },
            None => IntentResponse {
                response_text: format!("I heard you say: {}. {}", utterance, SUPPORTED_TOPICS),
                matched_intent: Intent::Fallback,
            },
        };
        tracing::debug!(intent = ?response.matched_intent, utterance, "classified voice command");
        response
    }
}

/// Classify with the default substring matching and 12-hour clock.
pub fn classify_intent(utterance: &str, now: NaiveTime) -> IntentResponse {
    IntentClassifier::default().classify(utterance, now)
}
