//! Landmark layouts and the camera-to-avatar coordinate transform.
//!
//! Hand landmarks follow the MediaPipe 21-point layout. Face landmarks use a
//! compact 5-point layout; 68-point dlib sets are reduced to it.

use crate::constants::{FINGERS_PER_HAND, NUM_FACE_LANDMARKS, NUM_FACIAL_LANDMARKS, NUM_HAND_LANDMARKS};
use nalgebra::{Vector2, Vector3};

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const INDEX_MCP: usize = 5;
pub const MIDDLE_MCP: usize = 9;
pub const RING_MCP: usize = 13;
pub const LITTLE_MCP: usize = 17;

/// One hand's landmarks in avatar-local space
pub type HandLandmarks = [Vector3<f32>; NUM_HAND_LANDMARKS];

/// Which tracked hand a landmark set belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    #[must_use]
    pub fn is_left(self) -> bool {
        self == Self::Left
    }

    /// First finger slot of this hand in the 10-finger index space
    #[must_use]
    pub fn finger_offset(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => FINGERS_PER_HAND,
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// Fingers in landmark order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Little,
}

impl Finger {
    pub const ALL: [Finger; FINGERS_PER_HAND] = [Self::Thumb, Self::Index, Self::Middle, Self::Ring, Self::Little];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Landmark indices of this finger, base to tip
    #[must_use]
    pub fn landmark_indices(self) -> [usize; 4] {
        let base = THUMB_CMC + 4 * self.index();
        [base, base + 1, base + 2, base + 3]
    }

    /// The four joints of this finger picked out of a full hand
    #[must_use]
    pub fn joints(self, landmarks: &HandLandmarks) -> [Vector3<f32>; 4] {
        self.landmark_indices().map(|i| landmarks[i])
    }
}

/// Converts a camera-space landmark to avatar-local space.
///
/// Camera x is mirrored (the avatar faces the camera), image-down y becomes
/// up, and camera depth becomes avatar-forward. The mapping is its own inverse.
#[must_use]
pub fn to_local_position(p: &Vector3<f32>) -> Vector3<f32> {
    Vector3::new(-p.x, -p.y, -p.z)
}

/// Converts a full camera-space hand to local space.
///
/// Returns `None` unless exactly 21 landmarks are supplied.
#[must_use]
pub fn to_local_landmarks(landmarks: &[Vector3<f32>]) -> Option<HandLandmarks> {
    if landmarks.len() != NUM_HAND_LANDMARKS {
        return None;
    }
    let mut local = [Vector3::zeros(); NUM_HAND_LANDMARKS];
    for (dst, src) in local.iter_mut().zip(landmarks) {
        *dst = to_local_position(src);
    }
    Some(local)
}

/// The five face points the orientation heuristics run on.
///
/// Coordinates are 2D with y up. Left and right are the sides of the image.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FaceLandmarks {
    pub right_eye: Vector2<f32>,
    pub left_eye: Vector2<f32>,
    pub nose_top: Vector2<f32>,
    pub mouth_right: Vector2<f32>,
    pub mouth_left: Vector2<f32>,
}

impl FaceLandmarks {
    /// Builds from `[right_eye, left_eye, nose_top, mouth_right, mouth_left]`
    #[must_use]
    pub fn from_five(points: &[Vector2<f32>; NUM_FACE_LANDMARKS]) -> Self {
        Self {
            right_eye: points[0],
            left_eye: points[1],
            nose_top: points[2],
            mouth_right: points[3],
            mouth_left: points[4],
        }
    }

    /// Reduces a 68-point dlib layout: eye centers are the mean of each eye
    /// contour, nose tip is point 30, mouth corners are points 48 and 54.
    #[must_use]
    pub fn from_dlib_68(points: &[Vector2<f32>; NUM_FACIAL_LANDMARKS]) -> Self {
        Self {
            right_eye: mean(&points[42..48]),
            left_eye: mean(&points[36..42]),
            nose_top: points[30],
            mouth_right: points[54],
            mouth_left: points[48],
        }
    }

    /// Accepts either layout; any other count yields `None`.
    #[must_use]
    pub fn from_slice(points: &[Vector2<f32>]) -> Option<Self> {
        if let Ok(five) = <&[Vector2<f32>; NUM_FACE_LANDMARKS]>::try_from(points) {
            Some(Self::from_five(five))
        } else if let Ok(full) = <&[Vector2<f32>; NUM_FACIAL_LANDMARKS]>::try_from(points) {
            Some(Self::from_dlib_68(full))
        } else {
            None
        }
    }

    #[must_use]
    pub fn eye_center(&self) -> Vector2<f32> {
        (self.left_eye + self.right_eye) * 0.5
    }

    #[must_use]
    pub fn mouth_center(&self) -> Vector2<f32> {
        (self.mouth_left + self.mouth_right) * 0.5
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(points: &[Vector2<f32>]) -> Vector2<f32> {
    points.iter().fold(Vector2::zeros(), |acc, p| acc + p) / points.len() as f32
}
