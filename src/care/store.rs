//! CareStore: the single owner of the companion's care data.

use chrono::NaiveTime;

use super::{DailyRoutine, FamilyDirectory, MedicationSchedule, MemoryQuiz};
use crate::config::CompanionConfig;
use crate::photo::PhotoSelector;
use crate::utils::random::RandomSource;

/// Routine, medications, family and quiz state for one person.
#[derive(Debug, Clone)]
pub struct CareStore {
    pub routine: DailyRoutine,
    pub medications: MedicationSchedule,
    pub family: FamilyDirectory,
    pub quiz: MemoryQuiz,
}

impl CareStore {
    pub fn new(
        routine: DailyRoutine,
        medications: MedicationSchedule,
        family: FamilyDirectory,
        quiz: MemoryQuiz,
    ) -> Self {
        Self {
            routine,
            medications,
            family,
            quiz,
        }
    }

    /// Demo data set; family photos are picked through `selector`.
    pub fn sample<R: RandomSource>(config: &CompanionConfig, selector: &mut PhotoSelector<R>) -> Self {
        let store = Self::new(
            DailyRoutine::sample(),
            MedicationSchedule::sample(&config.medication),
            FamilyDirectory::sample(selector),
            MemoryQuiz::sample(),
        );
        tracing::info!(
            routine = store.routine.items().len(),
            medications = store.medications.medications().len(),
            family = store.family.members().len(),
            "care store seeded"
        );
        store
    }

    /// Clear today's checkmarks and taken doses.
    pub fn start_new_day(&mut self) {
        self.routine.reset_day();
        self.medications.reset_day();
        self.quiz.reset();
        tracing::info!("care store reset for a new day");
    }

    /// Reminders for doses that are due around `now` and not yet taken.
    pub fn due_reminders(&self, now: NaiveTime) -> Vec<String> {
        self.medications
            .due_soon(now)
            .iter()
            .filter_map(|dose| self.medications.reminder(&dose.medication_id, dose.time).ok())
            .collect()
    }
}
