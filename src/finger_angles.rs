//! Bend and open angles for the four non-thumb fingers.

use crate::{
    config::HandConfig,
    constants::MAX_BEND_ANGLE,
    geometry::{bend_angle, ease_bend_angle, project_on_plane, signed_angle_about},
    wrist_pose::WristPose,
};
use nalgebra::Vector3;

/// Joint angles of one finger, in degrees.
///
/// Bend angles lie in [0, 90]. `open` is the signed spread inside the palm
/// plane, positive toward the wrist frame's x axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FingerAngles {
    pub proximal: f32,
    pub intermediate: f32,
    pub distal: f32,
    pub open: f32,
}

impl FingerAngles {
    /// Same bends with the spread direction reversed
    #[must_use]
    pub fn mirrored(self) -> Self {
        Self { open: -self.open, ..self }
    }

    #[must_use]
    pub fn bends(&self) -> [f32; 3] {
        [self.proximal, self.intermediate, self.distal]
    }
}

/// Un-eased bend angles `[proximal, intermediate, distal]` for one finger.
///
/// Proximal bend only keeps the part of the base bone leaving the palm plane,
/// so spreading the finger does not read as bending it.
#[must_use]
pub fn raw_bend_angles(
    wrist: &WristPose,
    j3: &Vector3<f32>,
    j2: &Vector3<f32>,
    j1: &Vector3<f32>,
    tip: &Vector3<f32>,
) -> [f32; 3] {
    let proximal = (j2 - j3)
        .try_normalize(f32::EPSILON)
        .map_or(0.0, |bone| bone.dot(&wrist.z_axis).clamp(-1.0, 1.0).asin().to_degrees().abs());

    [proximal, bend_angle(j3, j2, j1), bend_angle(j2, j1, tip)]
}

/// Eased `(proximal, intermediate, distal)` bend angles for one finger.
#[must_use]
pub fn finger_bend_angle(
    wrist: &WristPose,
    j3: &Vector3<f32>,
    j2: &Vector3<f32>,
    j1: &Vector3<f32>,
    tip: &Vector3<f32>,
) -> (f32, f32, f32) {
    let [proximal, intermediate, distal] = raw_bend_angles(wrist, j3, j2, j1, tip);
    (
        ease_bend_angle(proximal, MAX_BEND_ANGLE),
        ease_bend_angle(intermediate, MAX_BEND_ANGLE),
        ease_bend_angle(distal, MAX_BEND_ANGLE),
    )
}

/// Signed spread of the base bone `j3 -> j2` away from the wrist y axis.
#[must_use]
pub fn finger_open_angle(wrist: &WristPose, j3: &Vector3<f32>, j2: &Vector3<f32>, limit: f32) -> f32 {
    let in_palm = project_on_plane(&(j2 - j3), &wrist.z_axis);
    signed_angle_about(&in_palm, &wrist.y_axis, &wrist.z_axis).clamp(-limit, limit)
}

/// Full angle set for a non-thumb finger given as `[j3, j2, j1, tip]`.
///
/// The open angle is only read while the finger is mostly straight; on a bent
/// finger it is 0.
#[must_use]
pub fn extract_finger_angles(wrist: &WristPose, joints: &[Vector3<f32>; 4], config: &HandConfig) -> FingerAngles {
    let [j3, j2, j1, tip] = joints;
    let raw = raw_bend_angles(wrist, j3, j2, j1, tip);

    let open = if raw.iter().sum::<f32>() < config.open_angle_bend_threshold {
        finger_open_angle(wrist, j3, j2, config.open_angle_limit)
    } else {
        0.0
    };

    FingerAngles {
        proximal: ease_bend_angle(raw[0], MAX_BEND_ANGLE),
        intermediate: ease_bend_angle(raw[1], MAX_BEND_ANGLE),
        distal: ease_bend_angle(raw[2], MAX_BEND_ANGLE),
        open,
    }
}
