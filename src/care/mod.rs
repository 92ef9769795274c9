//! Care data owned by the presentation layer: routine checklist, medication
//! schedule, family cards and the memory quiz.

pub mod family;
pub mod medication;
pub mod quiz;
pub mod routine;
pub mod store;

use chrono::NaiveTime;
use thiserror::Error;

pub use family::{FamilyDirectory, FamilyMember, FamilyUpdate};
pub use medication::{DoseStatus, Medication, MedicationSchedule};
pub use quiz::{AnswerFeedback, MemoryQuiz, QuestionKind, QuizQuestion, QuizRating, QuizStep, QuizSummary};
pub use routine::{DailyRoutine, RoutineItem, RoutineProgress, ToggleOutcome};
pub use store::CareStore;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CareError {
    #[error("no routine item with id {0}")]
    UnknownRoutineItem(String),
    #[error("no medication with id {0}")]
    UnknownMedication(String),
    #[error("{medication} is not scheduled at {time}")]
    UnscheduledDose { medication: String, time: String },
    #[error("no family member with id {0}")]
    UnknownFamilyMember(String),
    #[error("\"{0}\" is not one of the options")]
    InvalidOption(String),
    #[error("this question has already been answered")]
    AlreadyAnswered,
    #[error("answer the current question first")]
    NotAnswered,
    #[error("the quiz is already finished")]
    QuizFinished,
}

/// Clock label as shown and spoken on the care screens, e.g. "8:30 AM".
pub fn clock_label(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Build a `NaiveTime` for seed data; invalid input falls back to midnight.
pub(crate) fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_label_drops_leading_zero() {
        assert_eq!(clock_label(hm(8, 30)), "8:30 AM");
        assert_eq!(clock_label(hm(19, 0)), "7:00 PM");
        assert_eq!(clock_label(hm(12, 5)), "12:05 PM");
    }
}
