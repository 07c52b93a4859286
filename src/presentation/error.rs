use crate::application::chart_service::ChartError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("Upstream error: {0:#}")]
    Upstream(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Chart(ChartError::Core(core_err)) => {
                tracing::error!(error = ?core_err, "Chart pipeline rejected input.");
                (StatusCode::UNPROCESSABLE_ENTITY, core_err.to_string())
            }
            ApiError::Chart(ChartError::Upstream(upstream_err)) | ApiError::Upstream(upstream_err) => {
                tracing::error!(error = ?upstream_err, "ROI API request failed.");
                (
                    StatusCode::BAD_GATEWAY,
                    "The ROI data service is unavailable".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
