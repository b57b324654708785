//! Palm reference frame built from four hand landmarks.

use crate::landmarks::{Hand, HandLandmarks, INDEX_MCP, LITTLE_MCP, MIDDLE_MCP, WRIST};
use nalgebra::{UnitQuaternion, Vector3};

/// Orthonormal frame anchored at the wrist.
///
/// `y_axis` runs from the wrist toward the middle finger base, `z_axis` is the
/// palm normal, and `x_axis` completes the frame inside the palm plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WristPose {
    pub position: Vector3<f32>,
    pub x_axis: Vector3<f32>,
    pub y_axis: Vector3<f32>,
    pub z_axis: Vector3<f32>,
}

impl WristPose {
    /// Hand orientation: looks along the palm normal with the finger direction as up.
    #[must_use]
    pub fn rotation(&self) -> UnitQuaternion<f32> {
        UnitQuaternion::face_towards(&self.z_axis, &self.y_axis)
    }
}

/// Builds the wrist frame from a local-space hand.
///
/// The palm normal is `cross(index_base - wrist, little_base - wrist)`, negated
/// for the right hand since mirroring flips cross-product handedness. Returns
/// `None` when the palm triangle or the wrist-to-middle vector is shorter than
/// `epsilon`, so the caller can skip the frame.
#[must_use]
pub fn build_wrist_pose(landmarks: &HandLandmarks, hand: Hand, epsilon: f32) -> Option<WristPose> {
    let wrist = landmarks[WRIST];
    let palm_normal = (landmarks[INDEX_MCP] - wrist).cross(&(landmarks[LITTLE_MCP] - wrist));
    let z_axis = palm_normal.try_normalize(epsilon)?;
    let z_axis = if hand.is_left() { z_axis } else { -z_axis };

    let forward = (landmarks[MIDDLE_MCP] - wrist).try_normalize(epsilon)?;
    // The middle finger base sits slightly off the palm plane; rebuild y so the frame stays orthonormal.
    let x_axis = forward.cross(&z_axis).try_normalize(epsilon)?;
    let y_axis = z_axis.cross(&x_axis);

    Some(WristPose {
        position: wrist,
        x_axis,
        y_axis,
        z_axis,
    })
}
