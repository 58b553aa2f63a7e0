//! Tuning for the camera shaker, persisted as JSON.
//!
//! Holds the global strength multiplier and the parameter blocks the preset
//! shortcuts use, so they can be tweaked without recompiling.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::features::shakes::{
    BounceShake, BounceShakeParams, KickShake, KickShakeParams, NoiseShake, NoiseShakeParams, Shake,
};
use crate::resources::presets;
use crate::utils::displacement::Displacement;

const CONFIG_FILE_NAME: &str = "shake_config.json";

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakeConfig {
    /// Global scale in [0, 1] applied to the summed camera displacement.
    pub strength_multiplier: f32,
    pub short_shake_2d: BounceShakeParams,
    pub short_shake_3d: BounceShakeParams,
    pub explosion_2d: NoiseShakeParams,
    pub explosion_3d: NoiseShakeParams,
    pub rumble: NoiseShakeParams,
    pub recoil: KickShakeParams,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            strength_multiplier: 1.0,
            short_shake_2d: presets::short_shake_2d(0.08, 0.1, 25.0, 5),
            short_shake_3d: presets::short_shake_3d(0.3, 25.0, 5),
            explosion_2d: presets::explosion_2d(1.0, 10.0, 0.5),
            explosion_3d: presets::explosion_3d(8.0, 0.7),
            rumble: presets::rumble(0.02, 0.4),
            recoil: presets::recoil(1.0),
        }
    }
}

impl ShakeConfig {
    pub fn short_shake_2d(&self) -> Shake {
        BounceShake::new(self.short_shake_2d.clone(), None).into()
    }

    pub fn short_shake_3d(&self) -> Shake {
        BounceShake::new(self.short_shake_3d.clone(), None).into()
    }

    /// 2D explosion, attenuated by distance when a source is given.
    pub fn explosion_2d(&self, source_position: Option<Vec3>) -> Shake {
        NoiseShake::new(self.explosion_2d.clone(), 1.0, source_position, false).into()
    }

    /// 3D explosion, attenuated by distance when a source is given.
    pub fn explosion_3d(&self, source_position: Option<Vec3>) -> Shake {
        NoiseShake::new(self.explosion_3d.clone(), 1.0, source_position, false).into()
    }

    /// Manually controlled rumble starting at zero amplitude.
    pub fn rumble(&self) -> Shake {
        NoiseShake::new(self.rumble.clone(), 0.0, None, true).into()
    }

    /// Kick away from a source if given, otherwise a straight pitch-up kick.
    pub fn recoil(&self, source_position: Option<Vec3>) -> Shake {
        match source_position {
            Some(position) => KickShake::from_source(self.recoil.clone(), position, true).into(),
            None => KickShake::with_direction(self.recoil.clone(), Displacement::from_rotation(Vec3::X)).into(),
        }
    }

    /// Parses a config from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Clamps values that would otherwise be rejected later.
    pub fn sanitized(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.strength_multiplier) {
            warn!(
                "Shake strength multiplier {} outside [0, 1], clamping",
                self.strength_multiplier
            );
            self.strength_multiplier = if self.strength_multiplier.is_nan() {
                0.0
            } else {
                self.strength_multiplier.clamp(0.0, 1.0)
            };
        }
        self
    }

    /// Loads the config from the default location, or returns defaults.
    ///
    /// Location is platform-specific:
    /// - macOS: ~/Library/Application Support/camshake/
    /// - Linux: ~/.config/camshake/
    /// - Windows: %APPDATA%/camshake/
    pub fn load_from_file() -> Self {
        let Some(path) = Self::get_config_path() else {
            warn!("Could not determine config directory, using default shake config");
            return Self::default();
        };

        if !path.exists() {
            info!("No shake config found, using defaults");
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(config) => {
                    info!("Loaded shake config from {:?}", path);
                    config
                }
                Err(e) => {
                    error!("Failed to parse shake config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                error!("Failed to read shake config: {}", e);
                Self::default()
            }
        }
    }

    pub fn get_config_dir() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("camshake");
            path
        })
    }

    pub fn get_config_path() -> Option<std::path::PathBuf> {
        Self::get_config_dir().map(|mut path| {
            path.push(CONFIG_FILE_NAME);
            path
        })
    }

    /// Writes the config to the default location, creating the directory if needed.
    pub fn save_to_file(&self) -> Result<(), String> {
        let Some(path) = Self::get_config_path() else {
            return Err("Could not determine config directory".to_string());
        };

        if let Some(dir) = Self::get_config_dir() {
            if !dir.exists() {
                if let Err(e) = std::fs::create_dir_all(&dir) {
                    return Err(format!("Failed to create config directory: {}", e));
                }
                info!("Created config directory: {:?}", dir);
            }
        }

        match serde_json::to_string_pretty(self) {
            Ok(json) => match std::fs::write(&path, json) {
                Ok(()) => {
                    info!("Saved shake config to {:?}", path);
                    Ok(())
                }
                Err(e) => Err(format!("Failed to write shake config: {}", e)),
            },
            Err(e) => Err(format!("Failed to serialize shake config: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip_keeps_tuning() {
        let mut config = ShakeConfig::default();
        config.strength_multiplier = 0.4;
        config.short_shake_3d.num_bounces = 9;
        let json = serde_json::to_string(&config).expect("serialize");
        assert_eq!(ShakeConfig::from_json(&json).expect("parse"), config);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = ShakeConfig::from_json(r#"{ "strength_multiplier": 0.5 }"#).expect("parse");
        assert_eq!(config.strength_multiplier, 0.5);
        assert_eq!(config.explosion_3d, ShakeConfig::default().explosion_3d);
    }

    #[test]
    fn test_nested_partial_params() {
        let json = r#"{ "recoil": { "attack_time": 0.1 } }"#;
        let config = ShakeConfig::from_json(json).expect("parse");
        assert_eq!(config.recoil.attack_time, 0.1);
        assert_eq!(config.recoil.release_time, KickShakeParams::default().release_time);
    }

    #[test]
    fn test_out_of_range_multiplier_is_clamped() {
        let config = ShakeConfig::from_json(r#"{ "strength_multiplier": 4.0 }"#).expect("parse");
        assert_eq!(config.strength_multiplier, 1.0);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(ShakeConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_builders_pick_expected_kinds() {
        let config = ShakeConfig::default();
        assert_eq!(config.short_shake_2d().kind(), "bounce");
        assert_eq!(config.explosion_3d(None).kind(), "noise");
        assert_eq!(config.recoil(Some(Vec3::ONE)).kind(), "kick");
        let mut rumble = config.rumble();
        assert!(rumble.amplitude_controller().is_some());
    }
}
