/// Metric scorers
///
/// Each scorer turns one geometric signal of the history into a 0-1 score
/// with a classification and feedback text, and nominates the frames where
/// the signal peaks as key-frame candidates.
///
/// Scores use fixed linear decay heuristics over normalized coordinates:
/// - Trunk stability: `1 - sway * 5`, sway = std dev of shoulder midpoint x
/// - Lower limb symmetry: `1 - diff * 5`, diff = mean |left knee y - right knee y|
/// - Rhythm consistency: `1 - jitter * 50`, jitter = std dev of |hip y acceleration|
/// - Range of motion: `rom * 2` capped at 1, rom = vertical hip excursion

use crate::models::{Axis, History, MetricDetail, MetricName, PoseLandmark};

use super::geometry::landmark_angle;
use super::time_series::{
    arg_max, arg_min, diff, extract_series, mean, midpoint_series, population_std_dev, zip_with,
};

/// Decay applied to trunk sway
pub const SWAY_PENALTY: f64 = 5.0;
/// Decay applied to mean knee height difference
pub const ASYMMETRY_PENALTY: f64 = 5.0;
/// Decay applied to hip acceleration jitter
pub const JITTER_PENALTY: f64 = 50.0;
/// Gain applied to hip excursion
pub const RANGE_OF_MOTION_GAIN: f64 = 2.0;

/// Score above which trunk, symmetry and rhythm feedback is positive
pub const POSITIVE_FEEDBACK_THRESHOLD: f64 = 0.8;
/// Score above which range-of-motion feedback is positive
pub const RANGE_OF_MOTION_FEEDBACK_THRESHOLD: f64 = 0.7;

/// Result of one scorer
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMetric {
    pub name: MetricName,
    pub detail: MetricDetail,
    /// Frame indices where the scored signal reaches its extremum
    pub key_frames: Vec<usize>,
}

/// Maps a history to a scored metric
pub trait MetricScorer: Send + Sync {
    fn name(&self) -> MetricName;

    fn score(&self, history: &History) -> ScoredMetric;
}

/// `max(0, 1 - statistic * penalty)`, zero when there is no statistic
fn decay_score(statistic: Option<f64>, penalty: f64) -> f64 {
    statistic
        .map(|value| (1.0 - value * penalty).clamp(0.0, 1.0))
        .unwrap_or(0.0)
}

/// Feedback text, chosen from the unrounded score
fn feedback(value: f64, threshold: f64, positive: &str, negative: &str) -> String {
    if value > threshold {
        positive.to_string()
    } else {
        negative.to_string()
    }
}

/// Lateral sway of the shoulder midpoint
#[derive(Debug, Clone, Copy, Default)]
pub struct TrunkStabilityScorer;

impl MetricScorer for TrunkStabilityScorer {
    fn name(&self) -> MetricName {
        MetricName::TrunkStability
    }

    fn score(&self, history: &History) -> ScoredMetric {
        let left = extract_series(history, PoseLandmark::LeftShoulder, Axis::X);
        let right = extract_series(history, PoseLandmark::RightShoulder, Axis::X);
        let trunk_x = midpoint_series(&left, &right);

        let sway = population_std_dev(&trunk_x);
        let score = decay_score(sway, SWAY_PENALTY);
        tracing::debug!(?sway, score, "Trunk stability");

        let mut key_frames = Vec::new();
        if let Some(mean_x) = mean(&trunk_x) {
            let deviation: Vec<Option<f64>> = trunk_x
                .iter()
                .map(|value| value.map(|x| (x - mean_x).abs()))
                .collect();
            key_frames.extend(arg_max(&deviation));
        }

        let description = feedback(
            score,
            POSITIVE_FEEDBACK_THRESHOLD,
            "Low lateral trunk sway detected.",
            "Considerable lateral trunk sway.",
        );
        let detail = MetricDetail::from_score(score, description);

        ScoredMetric {
            name: self.name(),
            detail,
            key_frames,
        }
    }
}

/// Height difference between left and right knee
#[derive(Debug, Clone, Copy, Default)]
pub struct LimbSymmetryScorer;

impl MetricScorer for LimbSymmetryScorer {
    fn name(&self) -> MetricName {
        MetricName::LowerLimbSymmetry
    }

    fn score(&self, history: &History) -> ScoredMetric {
        let left = extract_series(history, PoseLandmark::LeftKnee, Axis::Y);
        let right = extract_series(history, PoseLandmark::RightKnee, Axis::Y);
        let diffs = zip_with(&left, &right, |l, r| (l - r).abs());

        let mean_diff = mean(&diffs);
        let score = decay_score(mean_diff, ASYMMETRY_PENALTY);
        tracing::debug!(?mean_diff, score, "Lower limb symmetry");

        let description = feedback(
            score,
            POSITIVE_FEEDBACK_THRESHOLD,
            "Symmetric movement between left and right legs.",
            "Asymmetry detected in the lower limbs.",
        );
        let detail = MetricDetail::from_score(score, description);

        ScoredMetric {
            name: self.name(),
            detail,
            key_frames: arg_max(&diffs).into_iter().collect(),
        }
    }
}

/// Smoothness of the vertical hip trajectory
#[derive(Debug, Clone, Copy, Default)]
pub struct RhythmScorer;

impl MetricScorer for RhythmScorer {
    fn name(&self) -> MetricName {
        MetricName::RhythmConsistency
    }

    fn score(&self, history: &History) -> ScoredMetric {
        let hip_y = extract_series(history, PoseLandmark::LeftHip, Axis::Y);
        let velocity = diff(&hip_y);
        let accels: Vec<Option<f64>> = diff(&velocity)
            .into_iter()
            .map(|value| value.map(f64::abs))
            .collect();

        let jitter = population_std_dev(&accels);
        let score = decay_score(jitter, JITTER_PENALTY);
        tracing::debug!(?jitter, score, "Rhythm consistency");

        let description = feedback(
            score,
            POSITIVE_FEEDBACK_THRESHOLD,
            "Fluid and steady rhythm.",
            "Abrupt changes in speed.",
        );
        let detail = MetricDetail::from_score(score, description);

        // accels[i] is centred on frame i + 1
        let key_frames = arg_max(&accels).map(|index| index + 1).into_iter().collect();

        ScoredMetric {
            name: self.name(),
            detail,
            key_frames,
        }
    }
}

/// Vertical excursion of the hip
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeOfMotionScorer;

impl MetricScorer for RangeOfMotionScorer {
    fn name(&self) -> MetricName {
        MetricName::RangeOfMotion
    }

    fn score(&self, history: &History) -> ScoredMetric {
        let hip_y = extract_series(history, PoseLandmark::LeftHip, Axis::Y);

        let mut key_frames = Vec::new();
        let mut deepest_knee_angle = None;
        let rom = match (arg_min(&hip_y), arg_max(&hip_y)) {
            (Some(min_idx), Some(max_idx)) => {
                key_frames.extend([min_idx, max_idx]);
                deepest_knee_angle = knee_angle_at(history, max_idx);
                match (hip_y[max_idx], hip_y[min_idx]) {
                    (Some(highest), Some(lowest)) => highest - lowest,
                    _ => 0.0,
                }
            }
            _ => 0.0,
        };

        let score = (rom * RANGE_OF_MOTION_GAIN).min(1.0);
        tracing::debug!(rom, score, ?deepest_knee_angle, "Range of motion");

        let description = feedback(
            score,
            RANGE_OF_MOTION_FEEDBACK_THRESHOLD,
            "Good range of motion.",
            "Reduced range of motion.",
        );
        let detail = MetricDetail::from_score(score, description);

        ScoredMetric {
            name: self.name(),
            detail,
            key_frames,
        }
    }
}

/// Left knee angle in degrees at frame `index`, when hip, knee and ankle are detected
fn knee_angle_at(history: &History, index: usize) -> Option<f64> {
    let set = history.get(index)?.landmarks.as_ref()?;
    Some(landmark_angle(
        set.get(PoseLandmark::LeftHip)?,
        set.get(PoseLandmark::LeftKnee)?,
        set.get(PoseLandmark::LeftAnkle)?,
    ))
}

/// The scorers every analysis runs, in report order
pub fn default_scorers() -> Vec<Box<dyn MetricScorer>> {
    vec![
        Box::new(TrunkStabilityScorer),
        Box::new(LimbSymmetryScorer),
        Box::new(RhythmScorer),
        Box::new(RangeOfMotionScorer),
    ]
}
