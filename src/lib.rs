//! Landmark-based pose reconstruction for avatar puppeteering.
//!
//! This library turns sparse tracker output into joint-level pose data:
//! - 21 hand landmarks per hand become per-finger bend and open angles plus a
//!   wrist orientation
//! - 5 face landmarks (or a 68-point set) become yaw/pitch rates, roll and a
//!   calibrated face position
//!
//! Both pipelines are plain vector geometry on `nalgebra` types: cross
//! products, plane projections and signed angles. They run synchronously, own
//! fixed-size caches and never allocate per frame.
//!
//! # Examples
//!
//! ## Hand pose
//!
//! ```
//! use landmark_pose_estimation::{hand_pose::HandPoseCalculator, landmarks::{Finger, Hand}};
//! use nalgebra::Vector3;
//!
//! let mut calculator = HandPoseCalculator::default();
//!
//! // Camera-space landmarks from a hand tracker, wrist first
//! let landmarks: Vec<Vector3<f32>> = vec![Vector3::zeros(); 21];
//! calculator.set_left_hand_pose(&landmarks);
//!
//! // A collapsed hand has no palm, so the frame is skipped
//! assert!(!calculator.left_hand_pose_has_valid_value());
//!
//! let index = calculator.hand_finger_angles(Hand::Left, Finger::Index, false);
//! println!("index bend: {:.1} / {:.1} / {:.1}", index.proximal, index.intermediate, index.distal);
//! ```
//!
//! ## Face orientation
//!
//! ```
//! use landmark_pose_estimation::face_orientation::{CalibrationData, FaceOrientationCalculator, FaceRect};
//! use nalgebra::Vector2;
//!
//! let mut calculator = FaceOrientationCalculator::default();
//! let mut calibration = CalibrationData::default();
//!
//! let points = [
//!     Vector2::new(0.55, 0.50), // right eye
//!     Vector2::new(0.45, 0.50), // left eye
//!     Vector2::new(0.50, 0.43), // nose tip
//!     Vector2::new(0.54, 0.36), // mouth right
//!     Vector2::new(0.46, 0.36), // mouth left
//! ];
//! calculator.set_landmarks_from_slice(FaceRect::new(0.4, 0.3, 0.2, 0.25), &points);
//! calculator.calculate(&mut calibration, true);
//!
//! assert_eq!(calculator.pitch_rate(), 0.0);
//! assert!(calculator.yaw_rate().abs() < 1e-3);
//! ```

/// Error types and result handling
pub mod error;

/// Constants used throughout the library
pub mod constants;

/// Configuration management
pub mod config;

/// Shared vector geometry helpers
pub mod geometry;

/// Landmark layouts and coordinate conversion
pub mod landmarks;

/// Palm reference frame
pub mod wrist_pose;

/// Non-thumb finger angle extraction
pub mod finger_angles;

/// Thumb angle extraction
pub mod thumb_angles;

/// Per-hand pose calculator
pub mod hand_pose;

/// Face orientation calculator
pub mod face_orientation;

/// Recorded landmark streams
pub mod recording;

/// Frame-by-frame driver
pub mod app;

pub use error::{Error, Result};
