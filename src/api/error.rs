use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

/// Analysis API errors
#[derive(Debug, Error)]
pub enum AnalysisApiError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Could not extract frames from video")]
    NoFrames,

    #[error("Processing error: {0}")]
    Internal(String),
}

impl AnalysisApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalysisApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AnalysisApiError::NoFrames => StatusCode::UNPROCESSABLE_ENTITY,
            AnalysisApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AnalysisApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            AnalysisApiError::Internal(detail) => {
                tracing::error!("Analysis failed: {}", detail);
                "Processing error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
