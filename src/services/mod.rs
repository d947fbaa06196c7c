// Movement analysis services

pub mod balance_detector;
pub mod evidence_validator;
pub mod geometry;
pub mod key_frames;
pub mod metrics_engine;
pub mod pose_provider;
pub mod scorers;
pub mod screenshot_service;
pub mod time_series;

pub use balance_detector::BalanceLossDetector;
pub use evidence_validator::EvidenceValidator;
pub use key_frames::KeyFrameSelector;
pub use metrics_engine::{Analysis, MetricsEngine};
pub use pose_provider::{build_history, PoseLandmarkProvider};
pub use scorers::{
    default_scorers, LimbSymmetryScorer, MetricScorer, RangeOfMotionScorer, RhythmScorer,
    ScoredMetric, TrunkStabilityScorer,
};
pub use screenshot_service::{screenshot_requests, FrameSource, ScreenshotService};
