use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::{clock_label, hm, CareError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineItem {
    pub id: String,
    pub task: String,
    pub time: NaiveTime,
    pub completed: bool,
    pub important: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoutineProgress {
    pub completed: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent.
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Newly completed; carries the spoken congratulation.
    Completed { announcement: String },
    Reopened,
}

#[derive(Debug, Clone, Default)]
pub struct DailyRoutine {
    items: Vec<RoutineItem>,
}

impl DailyRoutine {
    pub fn new(items: Vec<RoutineItem>) -> Self {
        Self { items }
    }

    pub fn sample() -> Self {
        let seed = [
            ("1", "Take morning walk", hm(7, 0), true),
            ("2", "Eat breakfast", hm(8, 0), true),
            ("3", "Take morning medications", hm(8, 30), true),
            ("4", "Read newspaper", hm(9, 0), false),
            ("5", "Call family", hm(14, 0), true),
            ("6", "Afternoon rest", hm(15, 0), false),
            ("7", "Dinner", hm(18, 0), true),
            ("8", "Evening medications", hm(19, 0), true),
        ];
        Self::new(
            seed.into_iter()
                .map(|(id, task, time, important)| RoutineItem {
                    id: id.to_string(),
                    task: task.to_string(),
                    time,
                    completed: false,
                    important,
                })
                .collect(),
        )
    }

    pub fn items(&self) -> &[RoutineItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&RoutineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut RoutineItem, CareError> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| CareError::UnknownRoutineItem(id.to_string()))
    }

    pub fn toggle_complete(&mut self, id: &str) -> Result<ToggleOutcome, CareError> {
        let item = self.get_mut(id)?;
        item.completed = !item.completed;
        if item.completed {
            tracing::info!(task = %item.task, "routine task completed");
            Ok(ToggleOutcome::Completed {
                announcement: format!("Well done! You completed {}", item.task),
            })
        } else {
            Ok(ToggleOutcome::Reopened)
        }
    }

    /// Spoken reminder for one task.
    pub fn task_reminder(&self, id: &str) -> Result<String, CareError> {
        let item = self
            .get(id)
            .ok_or_else(|| CareError::UnknownRoutineItem(id.to_string()))?;
        Ok(format!("Your task: {} at {}", item.task, clock_label(item.time)))
    }

    /// Add a task, keeping the list ordered by time. Returns the new id.
    pub fn add_item(&mut self, task: impl Into<String>, time: NaiveTime, important: bool) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let at = self.items.partition_point(|item| item.time <= time);
        self.items.insert(
            at,
            RoutineItem {
                id: id.clone(),
                task: task.into(),
                time,
                completed: false,
                important,
            },
        );
        id
    }

    pub fn progress(&self) -> RoutineProgress {
        let total = self.items.len();
        let completed = self.items.iter().filter(|item| item.completed).count();
        let percent = if total == 0 {
            0
        } else {
            (completed as f64 / total as f64 * 100.0).round() as u32
        };
        RoutineProgress {
            completed,
            total,
            percent,
        }
    }

    pub fn all_completed(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|item| item.completed)
    }

    /// Start a new day: clear every checkbox.
    pub fn reset_day(&mut self) {
        for item in &mut self.items {
            item.completed = false;
        }
    }
}
