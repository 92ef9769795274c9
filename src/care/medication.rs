use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{clock_label, hm, CareError};
use crate::config::MedicationConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub id: String,
    pub name: String,
    pub dosage: String,
    pub times: Vec<NaiveTime>,
    /// Scheduled times already taken today.
    #[serde(default)]
    pub taken: BTreeSet<NaiveTime>,
    pub important: bool,
    pub instructions: String,
}

impl Medication {
    pub fn is_taken(&self, time: NaiveTime) -> bool {
        self.taken.contains(&time)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoseStatus {
    pub medication_id: String,
    pub name: String,
    pub time: NaiveTime,
    pub taken: bool,
    pub near_time: bool,
}

const DEFAULT_WINDOW_MINUTES: i64 = 30;

/// Out-of-range windows from a hand-edited config fall back to the default.
fn reminder_window(minutes: i64) -> Duration {
    Duration::try_minutes(minutes).unwrap_or_else(|| {
        tracing::warn!(
            minutes,
            fallback = DEFAULT_WINDOW_MINUTES,
            "reminder window out of range, using default"
        );
        Duration::minutes(DEFAULT_WINDOW_MINUTES)
    })
}

#[derive(Debug, Clone)]
pub struct MedicationSchedule {
    medications: Vec<Medication>,
    reminder_window: Duration,
}

impl MedicationSchedule {
    pub fn new(medications: Vec<Medication>, config: &MedicationConfig) -> Self {
        Self {
            medications,
            reminder_window: reminder_window(config.reminder_window_minutes),
        }
    }

    pub fn sample(config: &MedicationConfig) -> Self {
        let med = |id: &str, name: &str, dosage: &str, times: Vec<NaiveTime>, important, instructions: &str| {
            Medication {
                id: id.to_string(),
                name: name.to_string(),
                dosage: dosage.to_string(),
                times,
                taken: BTreeSet::new(),
                important,
                instructions: instructions.to_string(),
            }
        };
        Self::new(
            vec![
                med(
                    "1",
                    "Blood Pressure Medication",
                    "10mg",
                    vec![hm(8, 0), hm(20, 0)],
                    true,
                    "Take with food",
                ),
                med("2", "Vitamin D", "1000 IU", vec![hm(8, 0)], false, "Take with breakfast"),
                med(
                    "3",
                    "Heart Medication",
                    "5mg",
                    vec![hm(8, 0), hm(14, 0), hm(20, 0)],
                    true,
                    "Do not skip doses",
                ),
            ],
            config,
        )
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    pub fn get(&self, id: &str) -> Option<&Medication> {
        self.medications.iter().find(|m| m.id == id)
    }

    fn scheduled(&self, id: &str, time: NaiveTime) -> Result<&Medication, CareError> {
        let medication = self
            .get(id)
            .ok_or_else(|| CareError::UnknownMedication(id.to_string()))?;
        if !medication.times.contains(&time) {
            return Err(CareError::UnscheduledDose {
                medication: medication.name.clone(),
                time: clock_label(time),
            });
        }
        Ok(medication)
    }

    /// Record a dose. Returns the spoken confirmation.
    pub fn mark_taken(&mut self, id: &str, time: NaiveTime) -> Result<String, CareError> {
        self.scheduled(id, time)?;
        let medication = self
            .medications
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| CareError::UnknownMedication(id.to_string()))?;
        medication.taken.insert(time);
        tracing::info!(medication = %medication.name, time = %time, "dose taken");
        Ok(format!(
            "Good job! You took your {} at {}",
            medication.name,
            clock_label(time)
        ))
    }

    /// Spoken reminder for one scheduled dose.
    pub fn reminder(&self, id: &str, time: NaiveTime) -> Result<String, CareError> {
        let m = self.scheduled(id, time)?;
        Ok(format!(
            "Reminder: It's time to take your {}, {} at {}. {}",
            m.name,
            m.dosage,
            clock_label(time),
            m.instructions
        ))
    }

    /// Whether `now` is within the reminder window of `scheduled`, same day.
    pub fn is_near_time(&self, scheduled: NaiveTime, now: NaiveTime) -> bool {
        let diff = now.signed_duration_since(scheduled);
        diff <= self.reminder_window && diff >= -self.reminder_window
    }

    /// Every scheduled dose with its status at `now`.
    pub fn doses(&self, now: NaiveTime) -> Vec<DoseStatus> {
        self.medications
            .iter()
            .flat_map(|m| {
                m.times.iter().map(move |&time| DoseStatus {
                    medication_id: m.id.clone(),
                    name: m.name.clone(),
                    time,
                    taken: m.is_taken(time),
                    near_time: self.is_near_time(time, now),
                })
            })
            .collect()
    }

    /// Untaken doses inside the reminder window.
    pub fn due_soon(&self, now: NaiveTime) -> Vec<DoseStatus> {
        self.doses(now)
            .into_iter()
            .filter(|d| d.near_time && !d.taken)
            .collect()
    }

    pub fn reset_day(&mut self) {
        for m in &mut self.medications {
            m.taken.clear();
        }
    }
}
