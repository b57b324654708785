//! Head orientation from five face landmarks.
//!
//! Instead of a perspective-n-point solve, yaw and pitch come from where the
//! nose tip sits relative to the lines joining eyes and mouth corners. Roll is
//! the tilt of the eye-to-mouth axis. All coordinates are 2D with y up.

use crate::{
    config::FaceConfig,
    geometry::signed_distance_to_line,
    landmarks::FaceLandmarks,
};
use log::info;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Axis-aligned face bounding box; `(x, y)` is the minimum corner
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FaceRect {
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn center(&self) -> Vector2<f32> {
        Vector2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    #[must_use]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Per-user neutral face baseline.
///
/// Only written by a calibrating [`FaceOrientationCalculator::calculate`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationData {
    pub face_center: Vector2<f32>,
    /// Face rect area at calibration time
    pub face_size: f32,
    /// Raw pitch ratio that reads as level
    pub pitch_offset: f32,
}

/// Snapshot of the calculator outputs
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FaceOrientationResult {
    /// Face center offset from the calibrated center, in face-size units
    pub face_position: Vector2<f32>,
    pub pitch_rate: f32,
    pub yaw_rate: f32,
    pub roll_rad: f32,
    /// Relative face size change since calibration, positive when closer
    pub z_offset: f32,
}

#[derive(Debug, Clone, Default)]
pub struct FaceOrientationCalculator {
    config: FaceConfig,
    face_rect: FaceRect,
    landmarks: Option<FaceLandmarks>,
    result: FaceOrientationResult,
}

impl FaceOrientationCalculator {
    #[must_use]
    pub fn new(config: FaceConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    /// Sets the face rect and landmarks used by the next [`Self::calculate`].
    pub fn set_landmarks(&mut self, face_rect: FaceRect, landmarks: FaceLandmarks) {
        self.face_rect = face_rect;
        self.landmarks = Some(landmarks);
    }

    /// Like [`Self::set_landmarks`], from a 5-point or 68-point slice.
    ///
    /// Any other count leaves the current landmarks in place and returns false.
    pub fn set_landmarks_from_slice(&mut self, face_rect: FaceRect, points: &[Vector2<f32>]) -> bool {
        match FaceLandmarks::from_slice(points) {
            Some(landmarks) => {
                self.set_landmarks(face_rect, landmarks);
                true
            }
            None => false,
        }
    }

    /// Recomputes every output from the current landmarks.
    ///
    /// With `should_calibrate` the current face rect and pitch become the new
    /// neutral baseline, so position and pitch read zero for this call.
    pub fn calculate(&mut self, calibration: &mut CalibrationData, should_calibrate: bool) {
        let Some(face) = self.landmarks else {
            return;
        };

        let raw_pitch = Self::raw_pitch(&face);
        if should_calibrate {
            calibration.face_center = self.face_rect.center();
            calibration.face_size = self.face_rect.area();
            calibration.pitch_offset = raw_pitch;
            info!(
                "Face calibrated: center ({:.3}, {:.3}), size {:.3}, pitch offset {:.3}",
                calibration.face_center.x, calibration.face_center.y, calibration.face_size, raw_pitch
            );
        }

        let (face_position, z_offset) = if calibration.face_size > 0.0 {
            let scale = calibration.face_size.sqrt();
            (
                (self.face_rect.center() - calibration.face_center) / scale,
                (self.face_rect.area().max(0.0) / calibration.face_size).sqrt() - 1.0,
            )
        } else {
            (Vector2::zeros(), 0.0)
        };

        self.result = FaceOrientationResult {
            face_position,
            pitch_rate: ((raw_pitch - calibration.pitch_offset) / self.config.pitch_distance_ratio).clamp(-1.0, 1.0),
            yaw_rate: self.yaw(&face),
            roll_rad: Self::roll(&face),
            z_offset,
        };
    }

    /// Shrinks every output toward neutral by `1 - factor`.
    pub fn lerp_to_default(&mut self, factor: f32) {
        let keep = 1.0 - factor.clamp(0.0, 1.0);
        let result = &mut self.result;
        result.face_position *= keep;
        result.pitch_rate *= keep;
        result.yaw_rate *= keep;
        result.roll_rad *= keep;
        result.z_offset *= keep;
    }

    #[must_use]
    pub fn result(&self) -> FaceOrientationResult {
        self.result
    }

    #[must_use]
    pub fn face_position(&self) -> Vector2<f32> {
        self.result.face_position
    }

    #[must_use]
    pub fn pitch_rate(&self) -> f32 {
        self.result.pitch_rate
    }

    #[must_use]
    pub fn yaw_rate(&self) -> f32 {
        self.result.yaw_rate
    }

    #[must_use]
    pub fn roll_rad(&self) -> f32 {
        self.result.roll_rad
    }

    #[must_use]
    pub fn z_offset(&self) -> f32 {
        self.result.z_offset
    }

    #[must_use]
    pub fn face_rect(&self) -> FaceRect {
        self.face_rect
    }

    /// Counter-clockwise tilt of the mouth-to-eyes axis; 0 when upright.
    fn roll(face: &FaceLandmarks) -> f32 {
        let up = face.eye_center() - face.mouth_center();
        (-up.x).atan2(up.y)
    }

    /// Nose distances to the left and right eye-mouth lines, positive inside the face.
    ///
    /// A nose outside either line saturates to that side.
    fn yaw(&self, face: &FaceLandmarks) -> f32 {
        let left = signed_distance_to_line(&face.nose_top, &face.left_eye, &face.mouth_left);
        let right = signed_distance_to_line(&face.nose_top, &face.mouth_right, &face.right_eye);
        if left < 0.0 {
            return -1.0;
        }
        if right < 0.0 {
            return 1.0;
        }
        let total = left + right;
        if total <= f32::EPSILON {
            return 0.0;
        }
        ((left - right) / total / self.config.yaw_distance_ratio).clamp(-1.0, 1.0)
    }

    /// Same construction with the eye line and the mouth line; positive when
    /// the nose moves toward the eyes.
    fn raw_pitch(face: &FaceLandmarks) -> f32 {
        let to_eyes = signed_distance_to_line(&face.nose_top, &face.right_eye, &face.left_eye);
        let to_mouth = signed_distance_to_line(&face.nose_top, &face.mouth_left, &face.mouth_right);
        if to_eyes < 0.0 {
            return 1.0;
        }
        if to_mouth < 0.0 {
            return -1.0;
        }
        let total = to_eyes + to_mouth;
        if total <= f32::EPSILON {
            return 0.0;
        }
        (to_mouth - to_eyes) / total
    }
}
