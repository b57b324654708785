//! Recorded landmark streams.
//!
//! A recording is a YAML document with one entry per tracker frame. Missing
//! hands or faces mean the tracker lost them on that frame.

use crate::{
    constants::{NUM_FACE_LANDMARKS, NUM_FACIAL_LANDMARKS, NUM_HAND_LANDMARKS},
    face_orientation::FaceRect,
    Error, Result,
};
use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    #[serde(default)]
    pub frames: Vec<Frame>,
}

/// One tracker frame; hand landmarks are camera-space `[x, y, z]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_hand: Option<Vec<Vector3<f32>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_hand: Option<Vec<Vector3<f32>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face: Option<FaceFrame>,
}

/// Face detection result: bounding rect plus 5 or 68 points (y up)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceFrame {
    pub rect: FaceRect,
    pub points: Vec<Vector2<f32>>,
}

impl Recording {
    /// Load a recording from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse a recording from YAML text
    ///
    /// # Errors
    ///
    /// Returns `Error::RecordingError` if the text does not describe a recording
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::RecordingError(format!("Failed to parse recording: {e}")))
    }

    /// Save the recording as YAML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Checks every frame for landmark counts the calculators would skip.
    ///
    /// # Errors
    ///
    /// Returns `Error::RecordingError` naming the first malformed frame
    pub fn validate(&self) -> Result<()> {
        for (index, frame) in self.frames.iter().enumerate() {
            for (name, hand) in [("left_hand", &frame.left_hand), ("right_hand", &frame.right_hand)] {
                if let Some(points) = hand {
                    if points.len() != NUM_HAND_LANDMARKS {
                        return Err(Error::RecordingError(format!(
                            "Frame {index}: {name} has {} landmarks, expected {NUM_HAND_LANDMARKS}",
                            points.len()
                        )));
                    }
                }
            }
            if let Some(face) = &frame.face {
                if face.points.len() != NUM_FACE_LANDMARKS && face.points.len() != NUM_FACIAL_LANDMARKS {
                    return Err(Error::RecordingError(format!(
                        "Frame {index}: face has {} landmarks, expected {NUM_FACE_LANDMARKS} or {NUM_FACIAL_LANDMARKS}",
                        face.points.len()
                    )));
                }
            }
        }
        Ok(())
    }
}
