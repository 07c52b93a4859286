// HTTP request handlers
use crate::application::chart_service::ChartQuery;
use crate::domain::series::{DisplayMode, YAxisScale};
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ChartParams {
    pub app_name: Option<String>,
    pub country: Option<String>,
    pub mode: Option<String>,
    pub scale: Option<String>,
}

impl ChartParams {
    fn into_query(self) -> Result<ChartQuery, ApiError> {
        let app_name = self
            .app_name
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .ok_or_else(|| ApiError::BadRequest("app_name is required".to_string()))?;

        let mode = self
            .mode
            .map(|m| m.parse::<DisplayMode>())
            .transpose()
            .map_err(ApiError::BadRequest)?;
        let scale = self
            .scale
            .map(|s| s.parse::<YAxisScale>())
            .transpose()
            .map_err(ApiError::BadRequest)?;

        Ok(ChartQuery {
            app_name,
            country: self.country.unwrap_or_default(),
            mode,
            scale,
        })
    }
}

async fn encode<T: Serialize>(headers: &HeaderMap, data: &T) -> Response {
    match json_response(StatusCode::OK, data, accepts_brotli(headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// All filter options with defaults selected
pub async fn list_filters(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let filters = state.filter_service.load_filters().await?;
    Ok(encode(&headers, &filters).await)
}

/// Bid types and countries for one app
pub async fn app_filters(
    Path(app_name): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let filters = state.filter_service.filters_for_app(&app_name).await?;
    Ok(encode(&headers, &filters).await)
}

/// Chart-ready series for an app/country selection
pub async fn chart(
    Query(params): Query<ChartParams>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let query = params.into_query()?;
    let view = state.chart_service.chart(&query).await?;
    Ok(encode(&headers, &view).await)
}

/// Configured series catalog in rendering order
pub async fn catalog(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let catalog = &state.chart_service.pipeline().config().catalog;
    encode(&headers, catalog).await
}
