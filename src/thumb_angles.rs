//! Thumb angles.
//!
//! Hand trackers under-report thumb flexion at the two base joints but read the
//! tip bend reliably, so the tip bend drives every thumb joint. The proximal
//! joint only gets a small share because a large proximal bend looks wrong on
//! most avatar rigs.

use crate::{
    config::ThumbConfig,
    finger_angles::FingerAngles,
    geometry::{bend_angle, ease_bend_angle},
    landmarks::Hand,
};
use nalgebra::Vector3;

/// Angle set for a thumb given as `[j3, j2, j1, tip]` (CMC, MCP, IP, tip).
#[must_use]
pub fn extract_thumb_angles(joints: &[Vector3<f32>; 4], hand: Hand, config: &ThumbConfig) -> FingerAngles {
    let [j3, j2, j1, tip] = joints;
    let distal = ease_bend_angle(bend_angle(j2, j1, tip), config.distal_input_limit);
    let raw_intermediate = bend_angle(j3, j2, j1);

    let side = if hand.is_left() { -1.0 } else { 1.0 };
    let open = (distal * config.open_factor).clamp(0.0, config.open_limit) * side;
    let intermediate = (distal * config.intermediate_distal_weight
        + raw_intermediate * config.intermediate_raw_weight)
        .clamp(0.0, config.intermediate_limit);

    FingerAngles {
        proximal: distal * config.proximal_factor,
        intermediate,
        distal,
        open,
    }
}
