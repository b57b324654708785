//! Configuration management for the hand and face pose calculators

use crate::{
    constants::{
        DEFAULT_DEGENERATE_EPSILON, DEFAULT_OPEN_ANGLE_BEND_THRESHOLD, DEFAULT_OPEN_ANGLE_LIMIT,
        DEFAULT_PITCH_DISTANCE_RATIO, DEFAULT_THUMB_DISTAL_INPUT_LIMIT, DEFAULT_THUMB_INTERMEDIATE_DISTAL_WEIGHT,
        DEFAULT_THUMB_INTERMEDIATE_LIMIT, DEFAULT_THUMB_INTERMEDIATE_RAW_WEIGHT, DEFAULT_THUMB_OPEN_FACTOR,
        DEFAULT_THUMB_OPEN_LIMIT, DEFAULT_THUMB_PROXIMAL_FACTOR, DEFAULT_YAW_DISTANCE_RATIO, MAX_BEND_ANGLE,
    },
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Library configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hand pose configuration
    pub hand: HandConfig,

    /// Face orientation configuration
    pub face: FaceConfig,
}

/// Finger angle extraction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandConfig {
    /// Raw bend sum (degrees) at or above which the open angle reads 0
    pub open_angle_bend_threshold: f32,

    /// Open angle clamp (degrees, symmetric)
    pub open_angle_limit: f32,

    /// Minimum length for the palm normal and wrist-to-middle vectors
    pub degenerate_epsilon: f32,

    /// Thumb redistribution weights
    pub thumb: ThumbConfig,
}

/// Thumb angle redistribution weights.
///
/// Tuned against one reference rig; other skeletons may need their own values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbConfig {
    /// Raw distal bend that reads as a full bend
    pub distal_input_limit: f32,

    /// Share of the distal bend turned into open angle
    pub open_factor: f32,

    /// Open angle ceiling (degrees)
    pub open_limit: f32,

    /// Share of the distal bend used as proximal bend
    pub proximal_factor: f32,

    /// Distal share of the intermediate bend
    pub intermediate_distal_weight: f32,

    /// Raw intermediate share of the intermediate bend
    pub intermediate_raw_weight: f32,

    /// Intermediate bend ceiling (degrees)
    pub intermediate_limit: f32,
}

/// Face orientation heuristics parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceConfig {
    /// Nose distance ratio that reads as full yaw
    pub yaw_distance_ratio: f32,

    /// Calibrated pitch ratio delta that reads as full pitch
    pub pitch_distance_ratio: f32,

    /// Decay factor applied per frame while the face is not tracked
    pub lost_tracking_lerp_factor: f32,
}

impl Default for HandConfig {
    fn default() -> Self {
        Self {
            open_angle_bend_threshold: DEFAULT_OPEN_ANGLE_BEND_THRESHOLD,
            open_angle_limit: DEFAULT_OPEN_ANGLE_LIMIT,
            degenerate_epsilon: DEFAULT_DEGENERATE_EPSILON,
            thumb: ThumbConfig::default(),
        }
    }
}

impl Default for ThumbConfig {
    fn default() -> Self {
        Self {
            distal_input_limit: DEFAULT_THUMB_DISTAL_INPUT_LIMIT,
            open_factor: DEFAULT_THUMB_OPEN_FACTOR,
            open_limit: DEFAULT_THUMB_OPEN_LIMIT,
            proximal_factor: DEFAULT_THUMB_PROXIMAL_FACTOR,
            intermediate_distal_weight: DEFAULT_THUMB_INTERMEDIATE_DISTAL_WEIGHT,
            intermediate_raw_weight: DEFAULT_THUMB_INTERMEDIATE_RAW_WEIGHT,
            intermediate_limit: DEFAULT_THUMB_INTERMEDIATE_LIMIT,
        }
    }
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            yaw_distance_ratio: DEFAULT_YAW_DISTANCE_RATIO,
            pitch_distance_ratio: DEFAULT_PITCH_DISTANCE_RATIO,
            lost_tracking_lerp_factor: 0.2,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` naming the first out-of-range value
    pub fn validate(&self) -> Result<()> {
        let hand = &self.hand;
        if !(hand.open_angle_bend_threshold > 0.0) {
            return Err(Error::ConfigError(
                "Open angle bend threshold must be positive".to_string(),
            ));
        }
        if !(0.0..=MAX_BEND_ANGLE).contains(&hand.open_angle_limit) {
            return Err(Error::ConfigError(
                "Open angle limit must be between 0 and 90 degrees".to_string(),
            ));
        }
        if !(hand.degenerate_epsilon >= 0.0) {
            return Err(Error::ConfigError(
                "Degenerate epsilon must not be negative".to_string(),
            ));
        }

        let thumb = &hand.thumb;
        if !(thumb.distal_input_limit > 0.0) {
            return Err(Error::ConfigError(
                "Thumb distal input limit must be positive".to_string(),
            ));
        }
        if !(0.0..=MAX_BEND_ANGLE).contains(&thumb.open_limit) {
            return Err(Error::ConfigError(
                "Thumb open limit must be between 0 and 90 degrees".to_string(),
            ));
        }
        if !(0.0..=MAX_BEND_ANGLE).contains(&thumb.intermediate_limit) {
            return Err(Error::ConfigError(
                "Thumb intermediate limit must be between 0 and 90 degrees".to_string(),
            ));
        }
        for (name, weight) in [
            ("open factor", thumb.open_factor),
            ("proximal factor", thumb.proximal_factor),
            ("intermediate distal weight", thumb.intermediate_distal_weight),
            ("intermediate raw weight", thumb.intermediate_raw_weight),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(Error::ConfigError(format!(
                    "Thumb {name} must be between 0.0 and 1.0"
                )));
            }
        }

        let face = &self.face;
        if !(face.yaw_distance_ratio > 0.0) {
            return Err(Error::ConfigError("Yaw distance ratio must be positive".to_string()));
        }
        if !(face.pitch_distance_ratio > 0.0) {
            return Err(Error::ConfigError("Pitch distance ratio must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&face.lost_tracking_lerp_factor) {
            return Err(Error::ConfigError(
                "Lost tracking lerp factor must be between 0.0 and 1.0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Landmark Pose Estimation Configuration

# Finger angle extraction
hand:
  open_angle_bend_threshold: 120.0
  open_angle_limit: 30.0
  degenerate_epsilon: 0.000001
  thumb:
    distal_input_limit: 60.0
    open_factor: 0.3
    open_limit: 30.0
    proximal_factor: 0.05
    intermediate_distal_weight: 0.4
    intermediate_raw_weight: 0.6
    intermediate_limit: 70.0

# Face orientation heuristics
face:
  yaw_distance_ratio: 0.6
  pitch_distance_ratio: 0.5
  lost_tracking_lerp_factor: 0.2
"#;
