/// Pose landmark provider interface and history building
///
/// The pose model itself lives behind `PoseLandmarkProvider`; this module only
/// drives a provider over decoded frames and records its output in order.

use anyhow::{Context, Result};
use image::DynamicImage;

use crate::models::{FrameRecord, History, LandmarkSet};

/// Source of per-frame body landmarks
pub trait PoseLandmarkProvider {
    /// Detect landmarks in one decoded RGB frame; `Ok(None)` when no person is found
    fn process(&mut self, frame: &DynamicImage) -> Result<Option<LandmarkSet>>;
}

/// Run `provider` over `frames` and record one frame record per frame
///
/// Frames without a detection are kept with `landmarks: None` so the history
/// stays aligned with the video timeline. Timestamps are `index / fps`, or 0
/// when the rate is unknown.
pub fn build_history<P, I>(provider: &mut P, frames: I, fps: f64) -> Result<History>
where
    P: PoseLandmarkProvider + ?Sized,
    I: IntoIterator<Item = DynamicImage>,
{
    let mut history = History::default();

    for (frame_index, frame) in frames.into_iter().enumerate() {
        let landmarks = provider
            .process(&frame)
            .with_context(|| format!("Pose estimation failed on frame {}", frame_index))?;

        let timestamp = if fps > 0.0 {
            frame_index as f64 / fps
        } else {
            0.0
        };

        history.push(FrameRecord::new(frame_index, timestamp, landmarks));
    }

    tracing::info!(
        frames = history.len(),
        detected = history.detected_frame_count(),
        "Built landmark history"
    );

    Ok(history)
}
