use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::input::Key;

/// Star count used when the configuration leaves it out.
pub const DEFAULT_STAR_COUNT: u32 = 10;

/// Shared depth velocity the world starts with, in depth units per tick.
pub const DEFAULT_DEPTH_VELOCITY: f64 = 0.01;

/// Largest grid resolution accepted; the grid holds `(count + 1)²` stars.
pub const MAX_STAR_COUNT: u32 = 1000;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

impl SettingsError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

/// How a star is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StarShape {
    Rect,
    #[default]
    Circle,
}

/// Game settings, loaded once at startup from a JSON file.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_pause_key")]
    pub pause_key: String,
    /// Target tick rate (frames per second)
    pub fps: f64,
    /// Gates per-tick diagnostic logging
    #[serde(default)]
    pub debug: bool,
    /// Near edge of the visible depth range
    #[serde(rename = "min_z", alias = "minZ")]
    pub min_z: f64,
    /// Far edge of the visible depth range
    #[serde(rename = "max_z", alias = "maxZ")]
    pub max_z: f64,
    /// Grid resolution handed to the factory
    #[serde(default, alias = "stars")]
    pub stars_count: Option<u32>,
    /// Seed for star placement; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub star_shape: StarShape,
    /// Send stars leaving the depth range back to the opposite edge
    #[serde(default = "default_true")]
    pub wrap_depth: bool,
    #[serde(default = "default_depth_velocity")]
    pub initial_depth_velocity: f64,
}

fn default_pause_key() -> String {
    "p".to_string()
}

fn default_true() -> bool {
    true
}

fn default_depth_velocity() -> f64 {
    DEFAULT_DEPTH_VELOCITY
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: "Starfield".to_string(),
            description: String::new(),
            pause_key: default_pause_key(),
            fps: 60.0,
            debug: false,
            min_z: -5.0,
            max_z: 1.0,
            stars_count: None,
            seed: None,
            star_shape: StarShape::default(),
            wrap_depth: true,
            initial_depth_velocity: DEFAULT_DEPTH_VELOCITY,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate the settings file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if Key::parse(&self.pause_key).is_none() {
            return Err(SettingsError::invalid(format!(
                "pauseKey {:?} is not a recognised key",
                self.pause_key
            )));
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(SettingsError::invalid("fps must be finite and > 0"));
        }
        match Duration::try_from_secs_f64(1.0 / self.fps) {
            Ok(period) if !period.is_zero() => {}
            _ => {
                return Err(SettingsError::invalid(format!(
                    "fps ({}) gives a tick period that cannot be timed",
                    self.fps
                )));
            }
        }
        if !self.min_z.is_finite() || !self.max_z.is_finite() {
            return Err(SettingsError::invalid("min_z and max_z must be finite"));
        }
        if self.min_z >= self.max_z {
            return Err(SettingsError::invalid(format!(
                "min_z ({}) must be less than max_z ({})",
                self.min_z, self.max_z
            )));
        }
        if self.stars_count == Some(0) {
            return Err(SettingsError::invalid("starsCount must be > 0"));
        }
        if let Some(count) = self.stars_count.filter(|&c| c > MAX_STAR_COUNT) {
            return Err(SettingsError::invalid(format!(
                "starsCount ({}) must be at most {}",
                count, MAX_STAR_COUNT
            )));
        }
        if !self.initial_depth_velocity.is_finite() {
            return Err(SettingsError::invalid("initialDepthVelocity must be finite"));
        }
        Ok(())
    }

    pub fn star_count(&self) -> u32 {
        self.stars_count.unwrap_or(DEFAULT_STAR_COUNT)
    }

    /// The configured pause key. Falls back to `p` on unvalidated settings.
    pub fn pause_key(&self) -> Key {
        Key::parse(&self.pause_key).unwrap_or(Key::Char('p'))
    }

    /// Wall-clock length of one tick at the configured rate.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "name": "Stars",
        "description": "A starfield",
        "pauseKey": "p",
        "fps": 30,
        "debug": false,
        "min_z": -5,
        "max_z": 1
    }"#;

    mod parsing {
        use super::*;

        #[test]
        fn minimal_document_uses_defaults() {
            let settings = Settings::from_json_str(MINIMAL).unwrap();
            assert_eq!(settings.name, "Stars");
            assert_eq!(settings.fps, 30.0);
            assert_eq!(settings.min_z, -5.0);
            assert_eq!(settings.max_z, 1.0);
            assert_eq!(settings.star_count(), DEFAULT_STAR_COUNT);
            assert_eq!(settings.star_shape, StarShape::Circle);
            assert!(settings.wrap_depth);
            assert_eq!(settings.pause_key(), Key::Char('p'));
        }

        #[test]
        fn stars_alias_sets_count() {
            let json = r#"{"name":"s","fps":60,"min_z":-2,"max_z":1,"stars":25}"#;
            let settings = Settings::from_json_str(json).unwrap();
            assert_eq!(settings.star_count(), 25);
        }

        #[test]
        fn stars_count_and_shape() {
            let json = r#"{"name":"s","fps":60,"min_z":-2,"max_z":1,"starsCount":4,"starShape":"rect"}"#;
            let settings = Settings::from_json_str(json).unwrap();
            assert_eq!(settings.star_count(), 4);
            assert_eq!(settings.star_shape, StarShape::Rect);
        }

        #[test]
        fn missing_required_field_is_parse_error() {
            let err = Settings::from_json_str(r#"{"name":"s","fps":60}"#).unwrap_err();
            assert!(matches!(err, SettingsError::Parse(_)));
        }

        #[test]
        fn missing_file_is_io_error() {
            let err = Settings::load("/definitely/not/here/game.json").unwrap_err();
            assert!(matches!(err, SettingsError::Io { .. }));
            assert!(err.to_string().contains("game.json"));
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn default_settings_are_valid() {
            assert!(Settings::default().validate().is_ok());
        }

        #[test]
        fn inverted_depth_range_invalid() {
            let settings = Settings {
                min_z: 1.0,
                max_z: 1.0,
                ..Settings::default()
            };
            let err = settings.validate().unwrap_err();
            assert!(err.to_string().contains("min_z"));
        }

        #[test]
        fn non_positive_fps_invalid() {
            for fps in [0.0, -30.0, f64::NAN, f64::INFINITY] {
                let settings = Settings {
                    fps,
                    ..Settings::default()
                };
                assert!(settings.validate().is_err(), "fps {fps} accepted");
            }
        }

        #[test]
        fn untimeable_fps_invalid() {
            let json = r#"{"name":"s","fps":1e-20,"min_z":-5,"max_z":1}"#;
            let err = Settings::from_json_str(json).unwrap_err();
            assert!(matches!(err, SettingsError::Invalid(_)));
            assert!(err.to_string().contains("fps"));

            let settings = Settings {
                fps: 1e300,
                ..Settings::default()
            };
            assert!(settings.validate().is_err());
        }

        #[test]
        fn very_low_fps_still_valid() {
            let settings = Settings {
                fps: 0.5,
                ..Settings::default()
            };
            assert!(settings.validate().is_ok());
            assert_eq!(settings.frame_duration(), Duration::from_secs(2));
        }

        #[test]
        fn oversized_star_grid_invalid() {
            let json = r#"{"name":"s","fps":60,"min_z":-5,"max_z":1,"starsCount":100000}"#;
            let err = Settings::from_json_str(json).unwrap_err();
            assert!(err.to_string().contains("starsCount"));

            let at_limit = Settings {
                stars_count: Some(MAX_STAR_COUNT),
                ..Settings::default()
            };
            assert!(at_limit.validate().is_ok());
        }

        #[test]
        fn zero_star_count_invalid() {
            let settings = Settings {
                stars_count: Some(0),
                ..Settings::default()
            };
            assert!(settings.validate().is_err());
        }

        #[test]
        fn unknown_pause_key_invalid() {
            let settings = Settings {
                pause_key: "NotAKey".to_string(),
                ..Settings::default()
            };
            assert!(settings.validate().is_err());
        }

        #[test]
        fn invalid_values_rejected_at_load() {
            let json = r#"{"name":"s","fps":0,"min_z":-2,"max_z":1}"#;
            let err = Settings::from_json_str(json).unwrap_err();
            assert!(matches!(err, SettingsError::Invalid(_)));
        }
    }

    #[test]
    fn frame_duration_matches_fps() {
        let settings = Settings {
            fps: 50.0,
            ..Settings::default()
        };
        let diff = settings.frame_duration().as_secs_f64() - 0.02;
        assert!(diff.abs() < 1e-9);
    }
}
