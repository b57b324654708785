//! Frame-by-frame driver feeding landmark frames to both calculators.

use crate::{
    config::Config,
    constants::FINGER_COUNT,
    face_orientation::{CalibrationData, FaceOrientationCalculator, FaceOrientationResult},
    finger_angles::FingerAngles,
    hand_pose::HandPoseCalculator,
    recording::{Frame, Recording},
};
use log::{debug, info};
use nalgebra::UnitQuaternion;
use std::fmt;

/// Driver options
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Calculator configuration
    pub config: Config,
    /// Read finger angles for a skeleton mirrored relative to the camera
    pub mirror: bool,
    /// Calibrate the face on the first frame that has one
    pub calibrate_first: bool,
}

/// Outputs of one processed frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSummary {
    pub index: usize,
    pub fingers: [FingerAngles; FINGER_COUNT],
    pub left_hand: Option<UnitQuaternion<f32>>,
    pub right_hand: Option<UnitQuaternion<f32>>,
    pub face: FaceOrientationResult,
    pub face_tracked: bool,
}

/// Owns both calculators and the face calibration for a stream of frames
pub struct PoseApp {
    config: AppConfig,
    hands: HandPoseCalculator,
    face: FaceOrientationCalculator,
    calibration: CalibrationData,
    needs_calibration: bool,
    frame_count: usize,
}

impl PoseApp {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        info!("Initializing pose calculators (mirror: {})", config.mirror);
        Self {
            hands: HandPoseCalculator::new(config.config.hand.clone()),
            face: FaceOrientationCalculator::new(config.config.face.clone()),
            calibration: CalibrationData::default(),
            needs_calibration: config.calibrate_first,
            frame_count: 0,
            config,
        }
    }

    /// Starts from a previously saved calibration instead of calibrating
    #[must_use]
    pub fn with_calibration(mut self, calibration: CalibrationData) -> Self {
        self.calibration = calibration;
        self.needs_calibration = false;
        self
    }

    /// Processes one frame. Absent hands are reset, an absent face decays
    /// toward neutral.
    pub fn process_frame(&mut self, frame: &Frame) -> FrameSummary {
        match &frame.left_hand {
            Some(landmarks) => self.hands.set_left_hand_pose(landmarks),
            None => self.hands.reset_left_hand_pose(),
        }
        match &frame.right_hand {
            Some(landmarks) => self.hands.set_right_hand_pose(landmarks),
            None => self.hands.reset_right_hand_pose(),
        }

        let face_tracked = frame
            .face
            .as_ref()
            .is_some_and(|face| self.face.set_landmarks_from_slice(face.rect, &face.points));
        if face_tracked {
            let calibrate = std::mem::take(&mut self.needs_calibration);
            self.face.calculate(&mut self.calibration, calibrate);
        } else {
            debug!("Frame {}: face not tracked", self.frame_count);
            self.face.lerp_to_default(self.config.config.face.lost_tracking_lerp_factor);
        }

        let summary = self.summary(face_tracked);
        self.frame_count += 1;
        summary
    }

    /// Processes every frame of a recording in order
    pub fn run(&mut self, recording: &Recording) -> Vec<FrameSummary> {
        info!("Replaying {} frames", recording.frames.len());
        recording.frames.iter().map(|frame| self.process_frame(frame)).collect()
    }

    #[must_use]
    pub fn hands(&self) -> &HandPoseCalculator {
        &self.hands
    }

    #[must_use]
    pub fn face(&self) -> &FaceOrientationCalculator {
        &self.face
    }

    #[must_use]
    pub fn calibration(&self) -> &CalibrationData {
        &self.calibration
    }

    fn summary(&self, face_tracked: bool) -> FrameSummary {
        let mut fingers = [FingerAngles::default(); FINGER_COUNT];
        for (index, angles) in fingers.iter_mut().enumerate() {
            *angles = self.hands.finger_angles(index, self.config.mirror);
        }
        FrameSummary {
            index: self.frame_count,
            fingers,
            left_hand: self
                .hands
                .left_hand_pose_has_valid_value()
                .then(|| self.hands.left_hand_rotation()),
            right_hand: self
                .hands
                .right_hand_pose_has_valid_value()
                .then(|| self.hands.right_hand_rotation()),
            face: self.face.result(),
            face_tracked,
        }
    }
}

impl fmt::Display for FrameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame {:>5} |", self.index)?;
        for (name, hand) in [("L", &self.left_hand), ("R", &self.right_hand)] {
            match hand {
                Some(rotation) => {
                    let (roll, pitch, yaw) = rotation.euler_angles();
                    write!(
                        f,
                        " {name} rot ({:6.1} {:6.1} {:6.1})",
                        roll.to_degrees(),
                        pitch.to_degrees(),
                        yaw.to_degrees()
                    )?;
                }
                None => write!(f, " {name} lost")?,
            }
        }
        write!(f, " | bends")?;
        for angles in &self.fingers {
            write!(f, " {:.0}/{:.0}/{:.0}", angles.proximal, angles.intermediate, angles.distal)?;
        }
        write!(f, " | open")?;
        for angles in &self.fingers {
            write!(f, " {:.0}", angles.open)?;
        }
        write!(
            f,
            " | face{} pitch {:+.2} yaw {:+.2} roll {:+.3} pos ({:+.2}, {:+.2}) z {:+.2}",
            if self.face_tracked { "" } else { " (lost)" },
            self.face.pitch_rate,
            self.face.yaw_rate,
            self.face.roll_rad,
            self.face.face_position.x,
            self.face.face_position.y,
            self.face.z_offset
        )
    }
}
