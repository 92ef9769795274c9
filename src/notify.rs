//! In-memory notification log backing the toast surface.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    #[default]
    Info,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Vec<Notification>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.push(title.into(), description.into(), NotificationVariant::Info);
    }

    pub fn destructive(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.push(title.into(), description.into(), NotificationVariant::Destructive);
    }

    fn push(&mut self, title: String, description: String, variant: NotificationVariant) {
        tracing::debug!(%title, %description, ?variant, "notification");
        self.entries.push(Notification {
            title,
            description,
            variant,
        });
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    /// Hand pending notifications to the presentation layer.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
