//! Game settings and preferences
//!
//! Loaded from a JSON file on native builds; anything missing or broken
//! falls back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// One-shot sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Looped cues volume (pause beat, scared siren)
    pub loop_volume: f32,
    /// Volume toggle
    pub muted: bool,

    // === Simulation ===
    /// Fixed RNG seed; random per run when absent
    pub seed: Option<u64>,
    /// Gameplay balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            loop_volume: 0.7,
            muted: false,
            seed: None,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.tuning.validate()?;
        settings.clamp_volumes();
        Ok(settings)
    }

    /// Read settings from a file
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Serialize for saving
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn clamp_volumes(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.loop_volume = self.loop_volume.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_volumes_clamped() {
        let settings = Settings::from_json(r#"{ "master_volume": 3.0, "sfx_volume": -1 }"#).unwrap();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
    }

    #[test]
    fn test_nested_tuning_validated() {
        let err = Settings::from_json(r#"{ "tuning": { "scared_ticks": 0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "scared_ticks",
                ..
            }
        ));
    }

    #[test]
    fn test_round_trip_through_json() {
        let settings = Settings {
            muted: true,
            seed: Some(42),
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load(Path::new("/definitely/not/here/settings.json"));
        assert_eq!(settings, Settings::default());
    }
}
