//! Game settings and preferences
//!
//! Session-only: nothing here is written to storage. A reload starts from
//! `GameSettings::default()`.

use serde::{Deserialize, Serialize};

use crate::i18n::Language;

/// Slider range for look sensitivity
pub const SENSITIVITY_MIN: f32 = 0.1;
pub const SENSITIVITY_MAX: f32 = 3.0;
pub const SENSITIVITY_STEP: f32 = 0.1;

/// Slider range for master volume
pub const VOLUME_MIN: f32 = 0.0;
pub const VOLUME_MAX: f32 = 1.0;
pub const VOLUME_STEP: f32 = 0.05;

/// Game settings/preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Look sensitivity multiplier (0.1 - 3.0)
    pub sensitivity: f32,
    /// Master volume (0.0 - 1.0)
    pub volume: f32,
    /// UI and notification language
    pub language: Language,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            volume: 0.8,
            language: Language::Tr,
        }
    }
}

/// Partial settings update; `None` fields are left untouched
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsPatch {
    #[serde(default)]
    pub sensitivity: Option<f32>,
    #[serde(default)]
    pub volume: Option<f32>,
    #[serde(default)]
    pub language: Option<Language>,
}

impl SettingsPatch {
    pub fn sensitivity(value: f32) -> Self {
        Self {
            sensitivity: Some(value),
            ..Default::default()
        }
    }

    pub fn volume(value: f32) -> Self {
        Self {
            volume: Some(value),
            ..Default::default()
        }
    }

    pub fn language(language: Language) -> Self {
        Self {
            language: Some(language),
            ..Default::default()
        }
    }
}

impl GameSettings {
    /// Shallow merge. Values are taken as given: the sliders enforce ranges,
    /// the store does not.
    pub fn merge(&mut self, patch: SettingsPatch) {
        if let Some(sensitivity) = patch.sensitivity {
            self.sensitivity = sensitivity;
        }
        if let Some(volume) = patch.volume {
            self.volume = volume;
        }
        if let Some(language) = patch.language {
            self.language = language;
        }
    }

    /// Copy with every numeric field forced into its slider range
    pub fn clamped(&self) -> Self {
        Self {
            sensitivity: self.sensitivity.clamp(SENSITIVITY_MIN, SENSITIVITY_MAX),
            volume: self.volume.clamp(VOLUME_MIN, VOLUME_MAX),
            language: self.language,
        }
    }

    /// Sensitivity as shown next to the slider ("1.0")
    pub fn sensitivity_label(&self) -> String {
        format!("{:.1}", self.sensitivity)
    }

    /// Volume as shown next to the slider ("80%")
    pub fn volume_label(&self) -> String {
        format!("{}%", (self.volume * 100.0).round() as i32)
    }
}
