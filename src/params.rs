/*
 * Starfield Parameters Module
 *
 * This module defines the StarfieldParams struct that contains every
 * tunable value of the starfield: population sizes, depth spans, speeds,
 * rotation rates and the proximity shell. Parameters are supplied once at
 * startup, either from the defaults below or from a YAML file, and are not
 * changed while the simulation runs.
 */

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// Parameters for the starfield, fixed for the lifetime of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldParams {
    pub star_count: usize,
    pub dust_count: usize,
    pub star_distribution: f64, // Depth span of the star field
    pub dust_distribution: f64,
    pub base_star_speed: f64, // Depth units per second
    pub base_dust_speed: f64,
    pub angular_speed_x: f64, // Degrees per second
    pub angular_speed_y: f64,
    pub angular_speed_z: f64,
    pub proximity_threshold: f64,
    pub lateral_margin: f64, // Extra lateral span so field edges stay off screen
    pub seed: Option<u64>,
    pub audio: AudioParams,
    pub view: ViewParams,
}

// Ambient audio settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioParams {
    pub enabled: bool,
    pub file: PathBuf,
    // Program and arguments; the file path is appended as the last argument
    pub player: Vec<String>,
}

// Settings for the window and the projection used by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewParams {
    pub focal_length: f64,
    pub camera_offset: f64, // Distance from the camera to the nearest depth
    pub window_scale: f32,  // Fraction of the primary monitor
    pub skybox_points: usize,
    pub show_debug: bool,
    pub start_basic: bool,
}

impl Default for StarfieldParams {
    fn default() -> Self {
        Self {
            star_count: 800,
            dust_count: 100,
            star_distribution: 1500.0,
            dust_distribution: 1500.0,
            base_star_speed: 0.2,
            base_dust_speed: 0.5,
            angular_speed_x: 1.2,
            angular_speed_y: 3.2,
            angular_speed_z: 2.0,
            proximity_threshold: 150.0,
            lateral_margin: 500.0,
            seed: None,
            audio: AudioParams::default(),
            view: ViewParams::default(),
        }
    }
}

impl Default for AudioParams {
    fn default() -> Self {
        Self {
            enabled: true,
            file: PathBuf::from("ambient-space.mp3"),
            // Looped at 30% volume
            player: ["ffplay", "-nodisp", "-autoexit", "-loglevel", "quiet", "-loop", "0", "-volume", "30"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            focal_length: 600.0,
            camera_offset: 300.0,
            window_scale: 0.8,
            skybox_points: 1200,
            show_debug: false,
            start_basic: false,
        }
    }
}

impl StarfieldParams {
    // Load parameters from a YAML file; missing keys keep their defaults
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let params: StarfieldParams = serde_yaml::from_reader(file)?;
        info!("Loaded starfield parameters from {}", path.display());
        Ok(params)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    // Effective parameters in the same format the config file uses
    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    // Lateral span of both populations, wider than the depth span
    pub fn spread_x(&self) -> f64 {
        self.star_distribution + self.lateral_margin
    }

    pub fn spread_y(&self) -> f64 {
        self.star_distribution + self.lateral_margin
    }

    // Check that every numeric parameter is usable by the update loop
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("star_distribution", self.star_distribution)?;
        positive("dust_distribution", self.dust_distribution)?;
        non_negative("base_star_speed", self.base_star_speed)?;
        non_negative("base_dust_speed", self.base_dust_speed)?;
        finite("angular_speed_x", self.angular_speed_x)?;
        finite("angular_speed_y", self.angular_speed_y)?;
        finite("angular_speed_z", self.angular_speed_z)?;
        non_negative("proximity_threshold", self.proximity_threshold)?;
        non_negative("lateral_margin", self.lateral_margin)?;
        positive("view.focal_length", self.view.focal_length)?;
        non_negative("view.camera_offset", self.view.camera_offset)?;

        if !(self.view.window_scale > 0.0 && self.view.window_scale <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "view.window_scale",
                reason: format!("must be in (0, 1], got {}", self.view.window_scale),
            });
        }

        // Accepted as-is: stars are flagged near across most of the field
        if self.proximity_threshold > self.star_distribution {
            warn!(
                "proximity_threshold {} exceeds star_distribution {}; almost every star will be flagged near",
                self.proximity_threshold, self.star_distribution
            );
        }

        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: format!("must be finite, got {}", value) })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: format!("must be positive, got {}", value) })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: format!("must not be negative, got {}", value) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = StarfieldParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.star_count, 800);
        assert_eq!(params.dust_count, 100);
    }

    #[test]
    fn test_spread_is_wider_than_depth() {
        let params = StarfieldParams::default();
        assert_eq!(params.spread_x(), 2000.0);
        assert_eq!(params.spread_y(), 2000.0);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let params = StarfieldParams::from_yaml_str("star_count: 42\nview:\n  show_debug: true\n").unwrap();
        assert_eq!(params.star_count, 42);
        assert_eq!(params.dust_count, 100);
        assert!(params.view.show_debug);
        assert_eq!(params.view.focal_length, 600.0);
        assert!(params.audio.enabled);
    }

    #[test]
    fn test_effective_yaml_reloads_overrides() {
        let mut params = StarfieldParams { star_count: 12, seed: Some(9), ..Default::default() };
        params.audio.enabled = false;
        params.view.start_basic = true;

        let text = params.to_yaml_string().unwrap();
        assert!(text.contains("star_count: 12"));
        assert_eq!(StarfieldParams::from_yaml_str(&text).unwrap(), params);
    }

    #[test]
    fn test_yaml_type_error_is_parse_error() {
        let result = StarfieldParams::from_yaml_str("star_count: lots\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = StarfieldParams::from_yaml_file(Path::new("/nonexistent/starfield.yaml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_rejects_zero_distribution() {
        let params = StarfieldParams { dust_distribution: 0.0, ..Default::default() };
        match params.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "dust_distribution"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_negative_speed_and_nan_rotation() {
        let params = StarfieldParams { base_star_speed: -1.0, ..Default::default() };
        assert!(params.validate().is_err());

        let params = StarfieldParams { angular_speed_z: f64::NAN, ..Default::default() };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_wide_proximity_shell_is_accepted() {
        let params = StarfieldParams { proximity_threshold: 5000.0, ..Default::default() };
        assert!(params.validate().is_ok());
    }
}
