//! Constants used throughout the library

/// Number of landmarks per tracked hand
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Number of landmarks in the compact face layout
pub const NUM_FACE_LANDMARKS: usize = 5;

/// Number of landmarks in the dlib face layout
pub const NUM_FACIAL_LANDMARKS: usize = 68;

/// Fingers per hand, thumb included
pub const FINGERS_PER_HAND: usize = 5;

/// Finger slots over both hands
pub const FINGER_COUNT: usize = 10;

/// Bend joints per finger (proximal, intermediate, distal)
pub const JOINTS_PER_FINGER: usize = 3;

/// Joint rotations cached per hand
pub const JOINTS_PER_HAND: usize = FINGERS_PER_HAND * JOINTS_PER_FINGER;

/// Upper bound of every eased bend angle, in degrees
pub const MAX_BEND_ANGLE: f32 = 90.0;

/// Default open angle limit, in degrees
pub const DEFAULT_OPEN_ANGLE_LIMIT: f32 = 30.0;

/// Default raw bend sum above which the open angle is not trusted
pub const DEFAULT_OPEN_ANGLE_BEND_THRESHOLD: f32 = 120.0;

/// Default length under which a derived vector counts as degenerate
pub const DEFAULT_DEGENERATE_EPSILON: f32 = 1e-6;

/// Thumb redistribution defaults
pub const DEFAULT_THUMB_DISTAL_INPUT_LIMIT: f32 = 60.0;
pub const DEFAULT_THUMB_OPEN_FACTOR: f32 = 0.3;
pub const DEFAULT_THUMB_OPEN_LIMIT: f32 = 30.0;
pub const DEFAULT_THUMB_PROXIMAL_FACTOR: f32 = 0.05;
pub const DEFAULT_THUMB_INTERMEDIATE_DISTAL_WEIGHT: f32 = 0.4;
pub const DEFAULT_THUMB_INTERMEDIATE_RAW_WEIGHT: f32 = 0.6;
pub const DEFAULT_THUMB_INTERMEDIATE_LIMIT: f32 = 70.0;

/// Nose-to-line distance ratio at which yaw saturates
pub const DEFAULT_YAW_DISTANCE_RATIO: f32 = 0.6;

/// Calibrated pitch ratio delta at which pitch saturates
pub const DEFAULT_PITCH_DISTANCE_RATIO: f32 = 0.5;
