/// Movement Metrics Engine
///
/// Turns a landmark history into the movement report:
/// - Evidence gate (is there real motion to score?)
/// - Trunk stability, lower limb symmetry, rhythm and range-of-motion scores
/// - Balance-loss event count
/// - Key frames at the extremum of each scored signal
///
/// The engine is a pure computation over an in-memory history. It keeps only
/// the sampling rate it was constructed with.

use crate::models::{EventCounts, EventName, History, MetricReport, MetricsOutcome};

use super::balance_detector::BalanceLossDetector;
use super::evidence_validator::EvidenceValidator;
use super::key_frames::KeyFrameSelector;
use super::scorers::{default_scorers, MetricScorer};

/// Result of gating and scoring a history
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    /// The history showed enough motion and was scored
    Completed(MetricsOutcome),
    /// Too little motion (or no detections) to score
    InsufficientEvidence,
}

/// Metrics engine
pub struct MetricsEngine {
    fps: f64,
    validator: EvidenceValidator,
    scorers: Vec<Box<dyn MetricScorer>>,
    balance_detector: BalanceLossDetector,
    key_frame_selector: KeyFrameSelector,
}

impl MetricsEngine {
    /// Create an engine for a video sampled at `fps` frames per second
    pub fn new(fps: f64) -> Self {
        Self {
            fps,
            validator: EvidenceValidator::new(),
            scorers: default_scorers(),
            balance_detector: BalanceLossDetector::new(),
            key_frame_selector: KeyFrameSelector::new(),
        }
    }

    /// Sampling rate in frames per second
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Check whether the history holds enough motion to be scored
    pub fn validate_evidence(&self, history: &History) -> bool {
        self.validator.validate(history)
    }

    /// Score every metric, count events and select key frames
    ///
    /// An empty history yields an empty outcome.
    pub fn calculate_metrics(&self, history: &History) -> MetricsOutcome {
        if history.is_empty() {
            return MetricsOutcome::default();
        }

        let mut metrics = MetricReport::new();
        let mut candidates = Vec::new();
        for scorer in &self.scorers {
            let scored = scorer.score(history);
            candidates.extend(scored.key_frames);
            metrics.insert(scored.name, scored.detail);
        }

        let mut events = EventCounts::new();
        events.insert(EventName::BalanceLoss, self.balance_detector.count(history));

        let key_frames = self.key_frame_selector.select(candidates, history);

        tracing::debug!(
            frames = history.len(),
            fps = self.fps,
            key_frames = key_frames.len(),
            "Calculated movement metrics"
        );

        MetricsOutcome {
            metrics,
            events,
            key_frames,
        }
    }

    /// Gate the history on evidence, then score it
    pub fn analyze(&self, history: &History) -> Analysis {
        if !self.validate_evidence(history) {
            tracing::info!(frames = history.len(), "Insufficient movement evidence");
            return Analysis::InsufficientEvidence;
        }

        Analysis::Completed(self.calculate_metrics(history))
    }
}
