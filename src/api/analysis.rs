use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::post,
    Router,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

use super::error::AnalysisApiError;
use crate::{
    models::{
        AnalysisMetadata, AnalysisResponse, AnalysisStatus, AnalyzeRequest, MetricsOutcome,
    },
    services::{Analysis, MetricsEngine},
};

/// Shared state for analysis handlers
#[derive(Debug, Clone)]
pub struct AnalysisState {
    pub max_history_frames: usize,
}

impl AnalysisState {
    pub fn new(max_history_frames: usize) -> Self {
        Self { max_history_frames }
    }
}

/// Analyze an extracted landmark history
pub async fn analyze(
    State(state): State<Arc<AnalysisState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, AnalysisApiError> {
    let Json(request) = payload.map_err(|e| {
        warn!("Rejected analysis payload: {}", e.body_text());
        AnalysisApiError::InvalidRequest(e.body_text())
    })?;

    request
        .validate()
        .map_err(|e| AnalysisApiError::InvalidRequest(format!("Validation error: {}", e)))?;

    if request.history.is_empty() {
        return Err(AnalysisApiError::NoFrames);
    }

    if request.history.len() > state.max_history_frames {
        return Err(AnalysisApiError::InvalidRequest(format!(
            "History has {} frames, the limit is {}",
            request.history.len(),
            state.max_history_frames
        )));
    }

    if !request.history.is_contiguous() {
        return Err(AnalysisApiError::InvalidRequest(
            "Frame indices must start at 0 and increase by one".to_string(),
        ));
    }

    let AnalyzeRequest {
        age,
        exercise,
        fps,
        total_frames,
        history,
    } = request;

    info!(
        exercise = %exercise,
        frames = history.len(),
        fps,
        "Starting movement analysis"
    );

    let frames_analyzed = history.len();
    let total_frames = total_frames.unwrap_or(frames_analyzed);

    let analysis = tokio::task::spawn_blocking(move || MetricsEngine::new(fps).analyze(&history))
        .await
        .map_err(|e| {
            error!("Metrics engine task failed: {}", e);
            AnalysisApiError::Internal(e.to_string())
        })?;

    let (status, outcome) = match analysis {
        Analysis::Completed(outcome) => (AnalysisStatus::AnalysisCompleted, outcome),
        Analysis::InsufficientEvidence => {
            (AnalysisStatus::InsufficientEvidence, MetricsOutcome::default())
        }
    };

    info!(status = %status, key_frames = outcome.key_frames.len(), "Movement analysis finished");

    Ok(Json(AnalysisResponse {
        id: Uuid::new_v4(),
        metadata: AnalysisMetadata::new(age, exercise, total_frames, fps),
        metrics: outcome.metrics,
        events: outcome.events,
        frames_analyzed,
        status,
        key_frames: outcome.key_frames.into_iter().collect(),
        // no decoded frames behind a JSON history
        screenshots: None,
        analyzed_at: Utc::now(),
    }))
}

/// Create analysis API routes
pub fn analysis_routes(state: AnalysisState) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .with_state(Arc::new(state))
}
