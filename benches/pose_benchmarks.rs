//! Benchmarks for per-frame hand and face updates

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use landmark_pose_estimation::{
    app::{AppConfig, PoseApp},
    face_orientation::{CalibrationData, FaceOrientationCalculator},
    hand_pose::HandPoseCalculator,
    landmarks::Hand,
    recording::{FaceFrame, Frame, Recording},
};
use nalgebra::{Vector2, Vector3};

#[path = "../tests/test_helpers.rs"]
mod test_helpers;

use test_helpers::{face_rect, fist_local, frontal_face_points, open_hand_local, to_camera, to_dlib_68};

/// Tracker noise on top of a clean hand
fn jittered(hand: &[Vector3<f32>]) -> Vec<Vector3<f32>> {
    hand.iter()
        .map(|p| p + Vector3::new(rand::random::<f32>(), rand::random::<f32>(), rand::random::<f32>()) * 0.05)
        .collect()
}

fn benchmark_hand_pose(c: &mut Criterion) {
    let mut group = c.benchmark_group("hand_pose");

    let hands = [
        ("open", jittered(&to_camera(&open_hand_local()))),
        ("fist", jittered(&to_camera(&fist_local()))),
    ];

    for (name, landmarks) in &hands {
        let mut calculator = HandPoseCalculator::default();
        group.bench_with_input(BenchmarkId::new("set_hand_pose", name), landmarks, |b, landmarks| {
            b.iter(|| calculator.set_hand_pose(black_box(landmarks), Hand::Left));
        });
    }

    let mut calculator = HandPoseCalculator::default();
    calculator.set_left_hand_pose(&hands[0].1);
    group.bench_function("finger_angles_all", |b| {
        b.iter(|| {
            for index in 0..10 {
                black_box(calculator.finger_angles(black_box(index), false));
            }
        });
    });

    // Wrong landmark count bails before any geometry
    let short = vec![Vector3::zeros(); 20];
    let mut calculator = HandPoseCalculator::default();
    group.bench_function("rejected_frame", |b| {
        b.iter(|| calculator.set_left_hand_pose(black_box(&short)));
    });

    group.finish();
}

fn benchmark_face_orientation(c: &mut Criterion) {
    let mut group = c.benchmark_group("face_orientation");

    let five = frontal_face_points()
        .map(|p| p + Vector2::new(rand::random::<f32>(), rand::random::<f32>()) * 0.05)
        .to_vec();
    let full = to_dlib_68(&frontal_face_points());

    for (name, points) in [("5_points", &five), ("68_points", &full)] {
        let mut calculator = FaceOrientationCalculator::default();
        let mut calibration = CalibrationData::default();
        calculator.set_landmarks_from_slice(face_rect(), points);
        calculator.calculate(&mut calibration, true);

        group.bench_with_input(BenchmarkId::new("set_and_calculate", name), points, |b, points| {
            b.iter(|| {
                calculator.set_landmarks_from_slice(face_rect(), black_box(points));
                calculator.calculate(&mut calibration, false);
                black_box(calculator.result())
            });
        });
    }

    let mut calculator = FaceOrientationCalculator::default();
    group.bench_function("lerp_to_default", |b| {
        b.iter(|| calculator.lerp_to_default(black_box(0.2)));
    });

    group.finish();
}

fn benchmark_replay(c: &mut Criterion) {
    let open = to_camera(&open_hand_local());
    let fist = to_camera(&fist_local());
    let frames = (0..100)
        .map(|i| Frame {
            left_hand: Some(jittered(if i % 2 == 0 { &open } else { &fist })),
            right_hand: (i % 10 != 0).then(|| jittered(&open)),
            face: (i % 7 != 0).then(|| FaceFrame {
                rect: face_rect(),
                points: frontal_face_points().to_vec(),
            }),
        })
        .collect();
    let recording = Recording { frames };

    c.bench_function("replay_100_frames", |b| {
        b.iter(|| {
            let mut app = PoseApp::new(AppConfig {
                calibrate_first: true,
                ..AppConfig::default()
            });
            black_box(app.run(black_box(&recording)))
        });
    });
}

criterion_group!(benches, benchmark_hand_pose, benchmark_face_orientation, benchmark_replay);
criterion_main!(benches);
