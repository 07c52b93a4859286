// Presentation layer - HTTP routes over the application services
pub mod app_state;
pub mod error;
pub mod handlers;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{app_filters, catalog, chart, health_check, list_filters};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/filters", get(list_filters))
        .route("/filters/:app_name", get(app_filters))
        .route("/chart", get(chart))
        .route("/catalog", get(catalog))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_service::ChartService;
    use crate::application::filter_service::FilterService;
    use crate::application::pipeline::{ChartPipeline, PipelineConfig};
    use crate::application::roi_repository::testing::MemoryRepository;
    use crate::application::roi_repository::FilterOptions;
    use crate::domain::horizon::RoiRecord;
    use crate::domain::series::{DisplayMode, YAxisScale};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app(repo: MemoryRepository) -> Router {
        let repository = Arc::new(repo);
        let state = Arc::new(AppState {
            filter_service: FilterService::new(repository.clone()),
            chart_service: ChartService::new(
                repository,
                ChartPipeline::new(PipelineConfig::default()),
                DisplayMode::Smoothed,
                YAxisScale::Linear,
            ),
        });
        router(state)
    }

    fn seeded() -> MemoryRepository {
        let dates: Vec<String> = (1..=10).map(|d| format!("2024-06-{:02}", d)).collect();
        let records = (1..=10)
            .map(|d| RoiRecord {
                roi_3d: format!("{}.0", d),
                ..Default::default()
            })
            .collect();
        MemoryRepository {
            filters: FilterOptions {
                app_names: vec!["App-1".to_string()],
                bid_types: vec!["CPI".to_string()],
                countries: vec!["US".to_string()],
            },
            ..Default::default()
        }
        .with_selection("App-1", "US", dates, records)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app(seeded())
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_chart_smoothed() {
        let (status, json) = get(app(seeded()), "/chart?app_name=App-1&country=US").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["mode"], "smoothed");
        assert_eq!(json["date_axis"].as_array().unwrap().len(), 4);
        assert_eq!(json["date_axis"][0], "2024-06-07");
        assert_eq!(json["series"][2]["horizon"], "3d");
        assert_eq!(json["series"][2]["values"][0], 4.0);
        assert_eq!(json["series"][0]["values"][0], Value::Null);
    }

    #[tokio::test]
    async fn test_chart_raw_mode_from_display_label() {
        let uri = "/chart?app_name=App-1&country=US&mode=%E6%98%BE%E7%A4%BA%E5%8E%9F%E5%A7%8B%E6%95%B0%E6%8D%AE";
        let (status, json) = get(app(seeded()), uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["mode"], "raw");
        assert_eq!(json["date_axis"].as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_chart_bad_params() {
        let (status, json) = get(app(seeded()), "/chart?country=US").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "app_name is required");

        let (status, _) = get(app(seeded()), "/chart?app_name=App-1&scale=cubic").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chart_misaligned_upstream() {
        let repo = MemoryRepository::default().with_selection(
            "App-1",
            "US",
            vec!["2024-06-01".to_string()],
            Vec::new(),
        );
        let (status, json) = get(app(repo), "/chart?app_name=App-1&country=US").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["error"].as_str().unwrap().contains("date axis"));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_bad_gateway() {
        let repo = MemoryRepository {
            fail: true,
            ..Default::default()
        };
        let (status, _) = get(app(repo), "/filters").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_filters_and_catalog() {
        let (status, json) = get(app(seeded()), "/filters").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["current_app_name"], "App-1");
        assert_eq!(json["app_names"][0]["label"], "App-1");

        let (status, json) = get(app(seeded()), "/filters/App-1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["app_name"], "App-1");

        let (status, json) = get(app(seeded()), "/catalog").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 9);
        assert_eq!(json[8]["horizon"], "prediction");
        assert_eq!(json[8]["dashed"], true);
    }
}
