//! End-to-end tests: recordings through the frame driver, file round-trips


use landmark_pose_estimation::{
    app::{AppConfig, PoseApp},
    config::Config,
    face_orientation::{CalibrationData, FaceRect},
    landmarks::{Finger, Hand},
    recording::{FaceFrame, Frame, Recording},
    Error,
};
use nalgebra::{Vector2, Vector3};
use tempfile::TempDir;
use test_helpers::*;

fn face_frame(rect: FaceRect, nose_y: f32) -> FaceFrame {
    let mut points = frontal_face_points().to_vec();
    points[2].y = nose_y;
    FaceFrame { rect, points }
}

fn sample_recording() -> Recording {
    let open = to_camera(&open_hand_local());
    let fist = to_camera(&fist_local());
    Recording {
        frames: vec![
            Frame {
                left_hand: Some(open.clone()),
                right_hand: Some(mirror_x(&open)),
                face: Some(face_frame(face_rect(), 0.0)),
            },
            Frame {
                left_hand: Some(fist),
                right_hand: None,
                face: Some(face_frame(face_rect(), 0.2)),
            },
            Frame::default(),
        ],
    }
}

#[test]
fn test_run_sample_recording() {
    let mut app = PoseApp::new(AppConfig {
        calibrate_first: true,
        ..AppConfig::default()
    });
    let summaries = app.run(&sample_recording());
    assert_eq!(summaries.len(), 3);
    assert_eq!(summaries.iter().map(|s| s.index).collect::<Vec<_>>(), [0, 1, 2]);

    let first = &summaries[0];
    assert!(first.face_tracked);
    assert!(first.left_hand.is_some() && first.right_hand.is_some());
    assert_eq!(first.face.pitch_rate, 0.0);
    assert_close(first.fingers[Finger::Index.index()].open, SPREAD_DEG, 1e-2, "left index open");

    let second = &summaries[1];
    assert!(second.right_hand.is_none());
    assert_close(second.fingers[Finger::Middle.index()].proximal, 90.0, 1e-2, "fist bend");
    assert_close(second.face.pitch_rate, 0.4, 1e-5, "pitch");

    // Everything lost: hands reset, face decays by the configured factor
    let third = &summaries[2];
    assert!(!third.face_tracked);
    assert!(third.left_hand.is_none() && third.right_hand.is_none());
    assert!(third.fingers.iter().all(|angles| *angles == Default::default()));
    assert_close(third.face.pitch_rate, 0.4 * 0.8, 1e-5, "decayed pitch");

    assert_eq!(app.calibration().face_size, 9.0);
    assert!(!app.hands().left_hand_pose_has_valid_value());
}

#[test]
fn test_calibrates_on_first_tracked_face_only() {
    let shifted = FaceRect::new(-1.2, -1.5, 3.0, 3.0);
    let recording = Recording {
        frames: vec![
            Frame::default(),
            Frame {
                face: Some(face_frame(face_rect(), 0.0)),
                ..Frame::default()
            },
            Frame {
                face: Some(face_frame(shifted, 0.0)),
                ..Frame::default()
            },
        ],
    };

    let mut app = PoseApp::new(AppConfig {
        calibrate_first: true,
        ..AppConfig::default()
    });
    let summaries = app.run(&recording);
    assert!(!summaries[0].face_tracked);
    assert_eq!(app.calibration().face_center, Vector2::zeros());
    assert_close(summaries[2].face.face_position.x, 0.1, 1e-6, "shifted x");
}

#[test]
fn test_without_calibration_position_stays_zero() {
    let mut app = PoseApp::new(AppConfig::default());
    let summaries = app.run(&sample_recording());
    assert_eq!(*app.calibration(), CalibrationData::default());
    assert!(summaries.iter().all(|s| s.face.face_position == Vector2::zeros()));
}

#[test]
fn test_saved_calibration() {
    let calibration = CalibrationData {
        face_center: Vector2::new(-0.3, 0.0),
        face_size: 9.0,
        pitch_offset: 0.0,
    };
    let mut app = PoseApp::new(AppConfig {
        calibrate_first: true,
        ..AppConfig::default()
    })
    .with_calibration(calibration);

    let summary = app.process_frame(&Frame {
        face: Some(face_frame(face_rect(), 0.0)),
        ..Frame::default()
    });
    assert_close(summary.face.face_position.x, 0.1, 1e-6, "offset x");
    assert_eq!(*app.calibration(), calibration);
}

#[test]
fn test_mirror_swaps_hands() {
    let mut app = PoseApp::new(AppConfig {
        mirror: true,
        ..AppConfig::default()
    });
    let summary = app.process_frame(&Frame {
        left_hand: Some(to_camera(&open_hand_local())),
        ..Frame::default()
    });

    let right_index = Hand::Right.finger_offset() + Finger::Index.index();
    assert_close(summary.fingers[right_index].open, -SPREAD_DEG, 1e-2, "mirrored open");
    assert_eq!(summary.fingers[Finger::Index.index()].open, 0.0);
}

#[test]
fn test_malformed_frames_are_skipped() {
    let mut recording = sample_recording();
    recording.frames[1].right_hand = Some(vec![Vector3::zeros(); 5]);
    recording.frames[1].face.as_mut().unwrap().points.truncate(3);
    assert!(matches!(recording.validate(), Err(Error::RecordingError(_))));

    let mut app = PoseApp::new(AppConfig::default());
    let summaries = app.run(&recording);
    // The right hand keeps its first-frame pose; the face counts as lost
    assert!(summaries[1].right_hand.is_some());
    assert_eq!(summaries[1].right_hand, summaries[0].right_hand);
    assert!(!summaries[1].face_tracked);
}

#[test]
fn test_summary_display() {
    let mut app = PoseApp::new(AppConfig::default());
    let summaries = app.run(&sample_recording());

    let tracked = summaries[0].to_string();
    assert!(tracked.starts_with("frame     0 |"));
    assert!(tracked.contains("L rot"));
    assert!(!tracked.contains("(lost)"));

    let lost = summaries[2].to_string();
    assert!(lost.contains("L lost"));
    assert!(lost.contains("R lost"));
    assert!(lost.contains("face (lost)"));
}

#[test]
fn test_recording_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("recording.yaml");

    let recording = sample_recording();
    recording.to_file(&path).unwrap();
    let loaded = Recording::from_file(&path).unwrap();
    assert_eq!(loaded, recording);
    assert!(loaded.validate().is_ok());
}

#[test]
fn test_config_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");

    let mut config = Config::default();
    config.hand.open_angle_limit = 25.0;
    config.hand.thumb.intermediate_limit = 60.0;
    config.face.lost_tracking_lerp_factor = 0.5;
    config.to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded, config);
    assert!(loaded.validate().is_ok());
}

#[test]
fn test_missing_files() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.yaml");
    assert!(matches!(Config::from_file(&missing), Err(Error::Io(_))));
    assert!(matches!(Recording::from_file(&missing), Err(Error::Io(_))));
}

#[test]
fn test_custom_lost_tracking_factor() {
    let mut config = Config::default();
    config.face.lost_tracking_lerp_factor = 1.0;
    let mut app = PoseApp::new(AppConfig {
        config,
        ..AppConfig::default()
    });
    let summaries = app.run(&sample_recording());
    assert_close(summaries[1].face.pitch_rate, 0.4, 1e-5, "pitch");
    assert_eq!(summaries[2].face.pitch_rate, 0.0);
}
