use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;
use validator::Validate;

use super::history::History;

/// Score at or above which a metric is classified as good
pub const GOOD_THRESHOLD: f64 = 0.8;
/// Score at or above which a metric is classified as regular
pub const REGULAR_THRESHOLD: f64 = 0.5;

/// Three-tier quality classification of a metric score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Low,
    Regular,
    Good,
}

impl Classification {
    /// Classify a score in [0, 1]
    pub fn from_score(score: f64) -> Self {
        if score >= GOOD_THRESHOLD {
            Self::Good
        } else if score >= REGULAR_THRESHOLD {
            Self::Regular
        } else {
            Self::Low
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Low => write!(f, "low"),
            Classification::Regular => write!(f, "regular"),
            Classification::Good => write!(f, "good"),
        }
    }
}

/// Scored metric with its classification and feedback text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDetail {
    pub value: f64,
    pub classification: Classification,
    pub description: String,
}

impl MetricDetail {
    /// Build a detail from a raw score: rounds to 2 decimals and classifies
    /// the rounded value
    pub fn from_score(score: f64, description: impl Into<String>) -> Self {
        let value = round_score(score);
        Self {
            value,
            classification: Classification::from_score(value),
            description: description.into(),
        }
    }
}

/// Round a score to 2 decimals
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

/// Metrics reported for every scored history
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricName {
    TrunkStability,
    LowerLimbSymmetry,
    RhythmConsistency,
    RangeOfMotion,
}

impl MetricName {
    pub fn all() -> [Self; 4] {
        [
            Self::TrunkStability,
            Self::LowerLimbSymmetry,
            Self::RhythmConsistency,
            Self::RangeOfMotion,
        ]
    }
}

impl std::fmt::Display for MetricName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricName::TrunkStability => write!(f, "trunk_stability"),
            MetricName::LowerLimbSymmetry => write!(f, "lower_limb_symmetry"),
            MetricName::RhythmConsistency => write!(f, "rhythm_consistency"),
            MetricName::RangeOfMotion => write!(f, "range_of_motion"),
        }
    }
}

/// Discrete events counted over a history
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventName {
    BalanceLoss,
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventName::BalanceLoss => write!(f, "balance_loss"),
        }
    }
}

pub type MetricReport = BTreeMap<MetricName, MetricDetail>;
pub type EventCounts = BTreeMap<EventName, u32>;
pub type KeyFrameSet = BTreeSet<usize>;

/// Outcome of a scoring pass over one history
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsOutcome {
    pub metrics: MetricReport,
    pub events: EventCounts,
    pub key_frames: KeyFrameSet,
}

impl MetricsOutcome {
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty() && self.events.is_empty() && self.key_frames.is_empty()
    }
}

/// Status of an analysis request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    AnalysisCompleted,
    InsufficientEvidence,
}

impl std::fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisStatus::AnalysisCompleted => write!(f, "analysis_completed"),
            AnalysisStatus::InsufficientEvidence => write!(f, "insufficient_evidence"),
        }
    }
}

/// Request to analyze an extracted landmark history
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnalyzeRequest {
    #[validate(range(min = 0, max = 130, message = "Age must be between 0 and 130"))]
    pub age: u32,

    #[validate(length(min = 1, max = 100, message = "Exercise must be between 1 and 100 characters"))]
    pub exercise: String,

    #[validate(range(min = 0.0, max = 1000.0, message = "FPS must be between 0 and 1000"))]
    pub fps: f64,

    /// Decoded frame count reported by the video container, when known
    pub total_frames: Option<usize>,

    pub history: History,
}

/// Descriptive metadata echoed back with the analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub age: u32,
    pub exercise: String,
    pub video_duration: String,
}

impl AnalysisMetadata {
    /// Build metadata, deriving the duration from frame count and rate
    pub fn new(age: u32, exercise: String, total_frames: usize, fps: f64) -> Self {
        Self {
            age,
            exercise,
            video_duration: format_duration(total_frames, fps),
        }
    }
}

/// Video duration as `"<seconds>s"` with one decimal; zero when the rate is unknown
pub fn format_duration(total_frames: usize, fps: f64) -> String {
    let seconds = if fps > 0.0 {
        total_frames as f64 / fps
    } else {
        0.0
    };
    format!("{:.1}s", seconds)
}

/// Complete analysis result response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub id: Uuid,
    pub metadata: AnalysisMetadata,
    pub metrics: MetricReport,
    pub events: EventCounts,
    pub frames_analyzed: usize,
    pub status: AnalysisStatus,
    pub key_frames: Vec<usize>,
    /// Base64 JPEG key-frame screenshots, rendered with `ScreenshotService`
    /// from a `FrameSource`. Requests that only carry a landmark history have
    /// no frames to render, so the field is left out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshots: Option<Vec<String>>,
    pub analyzed_at: DateTime<Utc>,
}
