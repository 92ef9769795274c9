//! Shared config utilities for loading/saving JSON config files,
//! plus the top-level companion configuration.

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ai::intent::{ClockFormat, MatchMode};

const APP_DIR: &str = "elder-companion";
const CONFIG_FILE: &str = "companion_config.json";

/// Generic load for any Serde config type with a `Default` implementation.
/// Falls back to `T::default()` if the file is missing or unparsable.
pub fn load_json_config<T: DeserializeOwned + Default>(path: &Path, label: &str) -> T {
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<T>(&content) {
            Ok(config) => {
                tracing::info!(label, path = %path.display(), "loaded config");
                config
            }
            Err(e) => {
                tracing::warn!(
                    label,
                    path = %path.display(),
                    error = %e,
                    "failed to parse config, using defaults"
                );
                T::default()
            }
        },
        Err(_) => {
            tracing::info!(label, path = %path.display(), "no config file, using defaults");
            T::default()
        }
    }
}

/// Generic save for any Serde config type.
pub fn save_json_config<T: Serialize>(path: &Path, config: &T, label: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write config file {}", path.display()))?;
    tracing::info!(label, path = %path.display(), "saved config");
    Ok(())
}

/// Application data directory, `./elder-companion` when the platform has none.
pub fn app_data_dir() -> PathBuf {
    dirs_next::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

pub fn default_config_path() -> PathBuf {
    app_data_dir().join(CONFIG_FILE)
}

// ── Voice ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// Global voice switch ("Voice On" / "Voice Off").
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_rate")]
    pub rate: f32,
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rate: default_rate(),
            volume: default_volume(),
            language: default_language(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_rate() -> f32 {
    0.8
}
fn default_volume() -> f32 {
    0.8
}
fn default_language() -> String {
    "en-US".to_string()
}

// ── Assistant ──────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default)]
    pub clock_format: ClockFormat,
    #[serde(default)]
    pub match_mode: MatchMode,
}

// ── Photo ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoConfig {
    /// Artificial loading delay before a generated photo is shown.
    #[serde(default = "default_loading_delay_ms")]
    pub loading_delay_ms: u64,
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            loading_delay_ms: default_loading_delay_ms(),
        }
    }
}

fn default_loading_delay_ms() -> u64 {
    500
}

// ── Medication ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationConfig {
    /// A dose counts as "near time" within this many minutes either side.
    #[serde(default = "default_reminder_window")]
    pub reminder_window_minutes: i64,
}

impl Default for MedicationConfig {
    fn default() -> Self {
        Self {
            reminder_window_minutes: default_reminder_window(),
        }
    }
}

fn default_reminder_window() -> i64 {
    30
}

// ── Top-Level Config ───────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanionConfig {
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub photo: PhotoConfig,
    #[serde(default)]
    pub medication: MedicationConfig,
}

/// Load companion config from a JSON file. Falls back to defaults if file is missing or invalid.
pub fn load_config(path: &Path) -> CompanionConfig {
    load_json_config(path, "Companion")
}

/// Save companion config to a JSON file.
pub fn save_config(path: &Path, config: &CompanionConfig) -> anyhow::Result<()> {
    save_json_config(path, config, "Companion")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("nope.json"));
        assert_eq!(config, CompanionConfig::default());
        assert_eq!(config.voice.rate, 0.8);
        assert_eq!(config.photo.loading_delay_ms, 500);
        assert_eq!(config.medication.reminder_window_minutes, 30);
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join(CONFIG_FILE);

        let mut config = CompanionConfig::default();
        config.voice.enabled = false;
        config.assistant.clock_format = ClockFormat::TwentyFourHour;
        config.assistant.match_mode = MatchMode::WholeWord;
        save_config(&path, &config).unwrap();

        assert_eq!(load_config(&path), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "voice": { "rate": 1.0 } }"#).unwrap();

        let config = load_config(&path);
        assert_eq!(config.voice.rate, 1.0);
        assert_eq!(config.voice.volume, 0.8);
        assert!(config.voice.enabled);
        assert_eq!(config.assistant.match_mode, MatchMode::Substring);
    }

    #[test]
    fn garbage_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(load_config(&path), CompanionConfig::default());
    }
}
