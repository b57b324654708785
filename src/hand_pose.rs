//! Per-hand finger pose reconstruction from 21 tracked landmarks.
//!
//! [`HandPoseCalculator`] keeps every output in fixed-size arrays it owns, so
//! a frame update never allocates. Each hand is either valid (last set call
//! succeeded) or reset; nothing in between.

use crate::{
    config::HandConfig,
    constants::{FINGER_COUNT, FINGERS_PER_HAND, JOINTS_PER_FINGER, JOINTS_PER_HAND},
    finger_angles::{extract_finger_angles, FingerAngles},
    landmarks::{to_local_landmarks, Finger, Hand},
    thumb_angles::extract_thumb_angles,
    wrist_pose::{build_wrist_pose, WristPose},
};
use log::debug;
use nalgebra::{UnitQuaternion, Vector3};

/// Finger angle and hand orientation cache for both hands.
///
/// Finger indices run 0-4 for the left thumb..little finger and 5-9 for the
/// right hand.
#[derive(Debug, Clone)]
pub struct HandPoseCalculator {
    config: HandConfig,
    bend_angles: [f32; FINGER_COUNT * JOINTS_PER_FINGER],
    open_angles: [f32; FINGER_COUNT],
    rotation_cache: [[UnitQuaternion<f32>; JOINTS_PER_HAND]; 2],
    hand_rotations: [UnitQuaternion<f32>; 2],
    wrist_poses: [Option<WristPose>; 2],
    has_valid_value: [bool; 2],
}

impl Default for HandPoseCalculator {
    fn default() -> Self {
        Self::new(HandConfig::default())
    }
}

impl HandPoseCalculator {
    #[must_use]
    pub fn new(config: HandConfig) -> Self {
        Self {
            config,
            bend_angles: [0.0; FINGER_COUNT * JOINTS_PER_FINGER],
            open_angles: [0.0; FINGER_COUNT],
            rotation_cache: [[UnitQuaternion::identity(); JOINTS_PER_HAND]; 2],
            hand_rotations: [UnitQuaternion::identity(); 2],
            wrist_poses: [None; 2],
            has_valid_value: [false; 2],
        }
    }

    #[must_use]
    pub fn config(&self) -> &HandConfig {
        &self.config
    }

    /// Updates the left hand from camera-space landmarks.
    ///
    /// Anything other than 21 landmarks, or a degenerate palm, leaves the
    /// previous state untouched.
    pub fn set_left_hand_pose(&mut self, landmarks: &[Vector3<f32>]) {
        self.set_hand_pose(landmarks, Hand::Left);
    }

    /// Updates the right hand from camera-space landmarks.
    pub fn set_right_hand_pose(&mut self, landmarks: &[Vector3<f32>]) {
        self.set_hand_pose(landmarks, Hand::Right);
    }

    pub fn reset_left_hand_pose(&mut self) {
        self.reset_hand_pose(Hand::Left);
    }

    pub fn reset_right_hand_pose(&mut self) {
        self.reset_hand_pose(Hand::Right);
    }

    /// Updates one hand; see [`Self::set_left_hand_pose`].
    pub fn set_hand_pose(&mut self, landmarks: &[Vector3<f32>], hand: Hand) {
        let Some(local) = to_local_landmarks(landmarks) else {
            debug!("Skipping {hand:?} hand frame: expected 21 landmarks, got {}", landmarks.len());
            return;
        };
        let Some(wrist) = build_wrist_pose(&local, hand, self.config.degenerate_epsilon) else {
            debug!("Skipping {hand:?} hand frame: degenerate palm geometry");
            return;
        };

        let offset = hand.finger_offset();
        for finger in Finger::ALL {
            let joints = finger.joints(&local);
            let angles = match finger {
                Finger::Thumb => extract_thumb_angles(&joints, hand, &self.config.thumb),
                _ => extract_finger_angles(&wrist, &joints, &self.config),
            };
            self.store_angles(offset + finger.index(), angles);
        }

        let h = hand.index();
        self.hand_rotations[h] = wrist.rotation();
        self.wrist_poses[h] = Some(wrist);
        self.has_valid_value[h] = true;
        self.refresh_joint_rotations(hand);
    }

    /// Returns a hand to identity rotation and zero angles.
    pub fn reset_hand_pose(&mut self, hand: Hand) {
        let offset = hand.finger_offset();
        for finger in offset..offset + FINGERS_PER_HAND {
            self.store_angles(finger, FingerAngles::default());
        }

        let h = hand.index();
        self.hand_rotations[h] = UnitQuaternion::identity();
        self.wrist_poses[h] = None;
        self.has_valid_value[h] = false;
        self.rotation_cache[h] = [UnitQuaternion::identity(); JOINTS_PER_HAND];
    }

    /// Angles of finger `index` (reduced modulo 10).
    ///
    /// With `mirror` the opposite hand's finger is returned and its open angle
    /// negated, for skeletons mirrored relative to the camera view.
    #[must_use]
    pub fn finger_angles(&self, index: usize, mirror: bool) -> FingerAngles {
        let index = index % FINGER_COUNT;
        if mirror {
            self.cached_angles((index + FINGERS_PER_HAND) % FINGER_COUNT).mirrored()
        } else {
            self.cached_angles(index)
        }
    }

    /// Angles of one finger of one hand
    #[must_use]
    pub fn hand_finger_angles(&self, hand: Hand, finger: Finger, mirror: bool) -> FingerAngles {
        self.finger_angles(hand.finger_offset() + finger.index(), mirror)
    }

    #[must_use]
    pub fn left_hand_pose_has_valid_value(&self) -> bool {
        self.has_valid_value[Hand::Left.index()]
    }

    #[must_use]
    pub fn right_hand_pose_has_valid_value(&self) -> bool {
        self.has_valid_value[Hand::Right.index()]
    }

    /// Left hand orientation; identity unless the left hand is valid
    #[must_use]
    pub fn left_hand_rotation(&self) -> UnitQuaternion<f32> {
        self.hand_rotations[Hand::Left.index()]
    }

    /// Right hand orientation; identity unless the right hand is valid
    #[must_use]
    pub fn right_hand_rotation(&self) -> UnitQuaternion<f32> {
        self.hand_rotations[Hand::Right.index()]
    }

    /// Wrist frame of the last accepted frame for `hand`
    #[must_use]
    pub fn wrist_pose(&self, hand: Hand) -> Option<&WristPose> {
        self.wrist_poses[hand.index()].as_ref()
    }

    /// Local joint rotations of one hand.
    ///
    /// Laid out finger by finger (thumb..little), each as proximal,
    /// intermediate, distal. Bends turn about x; the proximal joint also
    /// spreads about z by the open angle.
    #[must_use]
    pub fn joint_rotations(&self, hand: Hand) -> &[UnitQuaternion<f32>; JOINTS_PER_HAND] {
        &self.rotation_cache[hand.index()]
    }

    fn cached_angles(&self, index: usize) -> FingerAngles {
        let base = index * JOINTS_PER_FINGER;
        FingerAngles {
            proximal: self.bend_angles[base],
            intermediate: self.bend_angles[base + 1],
            distal: self.bend_angles[base + 2],
            open: self.open_angles[index],
        }
    }

    fn store_angles(&mut self, index: usize, angles: FingerAngles) {
        let base = index * JOINTS_PER_FINGER;
        self.bend_angles[base..base + JOINTS_PER_FINGER].copy_from_slice(&angles.bends());
        self.open_angles[index] = angles.open;
    }

    fn refresh_joint_rotations(&mut self, hand: Hand) {
        let offset = hand.finger_offset();
        for finger in 0..FINGERS_PER_HAND {
            let angles = self.cached_angles(offset + finger);
            let joints = &mut self.rotation_cache[hand.index()][finger * JOINTS_PER_FINGER..][..JOINTS_PER_FINGER];
            for (joint, bend) in joints.iter_mut().zip(angles.bends()) {
                *joint = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), bend.to_radians());
            }
            joints[0] = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angles.open.to_radians()) * joints[0];
        }
    }
}
