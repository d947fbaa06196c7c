/// Balance-loss event detection
///
/// A frame counts as a balance loss when the hip centre leaves the support
/// base spanned by the two ankles, widened by a small tolerance. Every such
/// frame is counted; isolated single-frame detections are not filtered.

use crate::models::{Axis, History, PoseLandmark};

use super::time_series::{extract_series, midpoint_series};

/// Tolerance added on each side of the support base, as a fraction of its width
pub const SUPPORT_MARGIN_RATIO: f64 = 0.1;

#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceLossDetector;

impl BalanceLossDetector {
    pub fn new() -> Self {
        Self
    }

    /// Per-frame balance-loss flags; `None` where the frame lacks ankles or hips
    pub fn detect(&self, history: &History) -> Vec<Option<bool>> {
        let left_ankle_x = extract_series(history, PoseLandmark::LeftAnkle, Axis::X);
        let right_ankle_x = extract_series(history, PoseLandmark::RightAnkle, Axis::X);
        let hip_center_x = midpoint_series(
            &extract_series(history, PoseLandmark::LeftHip, Axis::X),
            &extract_series(history, PoseLandmark::RightHip, Axis::X),
        );

        left_ankle_x
            .iter()
            .zip(&right_ankle_x)
            .zip(&hip_center_x)
            .map(|((left, right), hip)| Some(outside_support((*left)?, (*right)?, (*hip)?)))
            .collect()
    }

    /// Number of frames flagged as balance loss
    pub fn count(&self, history: &History) -> u32 {
        let count = self
            .detect(history)
            .into_iter()
            .filter(|flag| *flag == Some(true))
            .count() as u32;
        tracing::debug!(count, "Balance loss frames");
        count
    }
}

fn outside_support(left_ankle_x: f64, right_ankle_x: f64, hip_center_x: f64) -> bool {
    let min_x = left_ankle_x.min(right_ankle_x);
    let max_x = left_ankle_x.max(right_ankle_x);
    let margin = (max_x - min_x) * SUPPORT_MARGIN_RATIO;

    hip_center_x < min_x - margin || hip_center_x > max_x + margin
}
