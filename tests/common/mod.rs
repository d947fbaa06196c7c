#![allow(dead_code)]

use movement_analysis::models::{FrameRecord, History, Landmark, LandmarkSet, PoseLandmark};
use std::sync::Once;

static INIT: Once = Once::new();

pub const FPS: f64 = 30.0;

/// Initialize test logging
pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .init();
    });
}

pub fn landmark(x: f64, y: f64) -> Landmark {
    Landmark::new(x, y, 0.0, 0.9)
}

pub fn history_from(sets: Vec<Option<LandmarkSet>>) -> History {
    sets.into_iter()
        .enumerate()
        .map(|(i, landmarks)| FrameRecord::new(i, i as f64 / FPS, landmarks))
        .collect::<Vec<_>>()
        .into()
}

/// One squat repetition pattern: hips oscillate vertically, shoulders and
/// ankles stay put, the right knee sits 0.01 lower than the left
pub fn squat_frame(i: usize) -> LandmarkSet {
    let hip_y = 0.5 + 0.2 * (i as f64 / 10.0).sin();

    LandmarkSet::empty()
        .with(PoseLandmark::LeftShoulder, landmark(0.45, 0.2))
        .with(PoseLandmark::RightShoulder, landmark(0.55, 0.2))
        .with(PoseLandmark::LeftHip, landmark(0.46, hip_y))
        .with(PoseLandmark::RightHip, landmark(0.54, hip_y))
        .with(PoseLandmark::LeftKnee, landmark(0.46, hip_y + 0.2))
        .with(PoseLandmark::RightKnee, landmark(0.54, hip_y + 0.21))
        .with(PoseLandmark::LeftAnkle, landmark(0.46, 0.9))
        .with(PoseLandmark::RightAnkle, landmark(0.54, 0.9))
}

pub fn squat_history(frames: usize) -> History {
    history_from((0..frames).map(|i| Some(squat_frame(i))).collect())
}

/// Only the left hip is reported, at the given heights
pub fn hip_only_history(hip_y: &[Option<f64>]) -> History {
    history_from(
        hip_y
            .iter()
            .map(|y| y.map(|y| LandmarkSet::empty().with(PoseLandmark::LeftHip, landmark(0.5, y))))
            .collect(),
    )
}

/// Swaying shoulders with a hip that is missing its right side
pub fn swaying_history(frames: usize) -> History {
    history_from(
        (0..frames)
            .map(|i| {
                let t = i as f64 / 10.0;
                let set = LandmarkSet::empty()
                    .with(PoseLandmark::LeftShoulder, landmark(0.5 + 0.1 * t.sin(), 0.5))
                    .with(PoseLandmark::RightShoulder, landmark(0.6 + 0.1 * t.sin(), 0.5))
                    .with(PoseLandmark::LeftHip, landmark(0.5, 0.6 + 0.2 * t.sin()))
                    .with(PoseLandmark::LeftKnee, landmark(0.5, 0.8 + 0.1 * t.cos()))
                    .with(PoseLandmark::RightKnee, landmark(0.6, 0.8 + 0.1 * t.cos()))
                    .with(PoseLandmark::LeftAnkle, landmark(0.5, 0.9))
                    .with(PoseLandmark::RightAnkle, landmark(0.6, 0.9));
                Some(set)
            })
            .collect(),
    )
}
