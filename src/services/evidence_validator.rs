/// Evidence gate deciding whether a history shows real exercise motion
///
/// The left hip is the reference landmark: a person doing an exercise moves
/// it vertically, while an empty scene or a still image does not.

use crate::models::{Axis, History, PoseLandmark};

use super::time_series::{extract_series, valid_values, value_range};

/// Minimum vertical hip displacement (normalized units) counted as movement
pub const MIN_HIP_RANGE: f64 = 0.05;

/// Landmark whose vertical motion is checked
pub const REFERENCE_LANDMARK: PoseLandmark = PoseLandmark::LeftHip;

/// Evidence validator
#[derive(Debug, Clone)]
pub struct EvidenceValidator {
    min_range: f64,
}

impl EvidenceValidator {
    pub fn new() -> Self {
        Self {
            min_range: MIN_HIP_RANGE,
        }
    }

    /// Check that the reference landmark moved enough to be worth scoring
    pub fn validate(&self, history: &History) -> bool {
        let hip_y = extract_series(history, REFERENCE_LANDMARK, Axis::Y);
        let samples = valid_values(&hip_y).len();

        if samples < 2 {
            tracing::debug!(samples, "Not enough reference samples for evidence check");
            return false;
        }

        let range = value_range(&hip_y).unwrap_or(0.0);
        tracing::debug!(
            landmark = REFERENCE_LANDMARK.name(),
            samples,
            range,
            min_range = self.min_range,
            "Evidence check"
        );

        range > self.min_range
    }
}

impl Default for EvidenceValidator {
    fn default() -> Self {
        Self::new()
    }
}
