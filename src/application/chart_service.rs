// Chart service - Use case for building the ROI chart of one selection
use crate::application::pipeline::ChartPipeline;
use crate::application::roi_repository::RoiRepository;
use crate::domain::error::CoreError;
use crate::domain::series::{DisplayMode, SeriesSet, YAxisScale};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("upstream request failed: {0:#}")]
    Upstream(#[from] anyhow::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartQuery {
    pub app_name: String,
    pub country: String,
    pub mode: Option<DisplayMode>,
    pub scale: Option<YAxisScale>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub app_name: String,
    pub country: String,
    pub window_size: usize,
    pub scale: YAxisScale,
    pub y_ticks: Vec<f64>,
    pub has_non_positive: bool,
    #[serde(flatten)]
    pub series_set: SeriesSet,
}

#[derive(Clone)]
pub struct ChartService {
    repository: Arc<dyn RoiRepository>,
    pipeline: Arc<ChartPipeline>,
    default_mode: DisplayMode,
    default_scale: YAxisScale,
}

impl ChartService {
    pub fn new(
        repository: Arc<dyn RoiRepository>,
        pipeline: ChartPipeline,
        default_mode: DisplayMode,
        default_scale: YAxisScale,
    ) -> Self {
        Self {
            repository,
            pipeline: Arc::new(pipeline),
            default_mode,
            default_scale,
        }
    }

    pub fn pipeline(&self) -> &ChartPipeline {
        &self.pipeline
    }

    pub async fn chart(&self, query: &ChartQuery) -> Result<ChartView, ChartError> {
        let mode = query.mode.unwrap_or(self.default_mode);
        let scale = query.scale.unwrap_or(self.default_scale);

        // Axis and records are replaced together on every selection
        let (dates, records) = tokio::try_join!(
            self.repository.fetch_dates(&query.app_name, &query.country),
            self.repository.fetch_records(&query.app_name, &query.country),
        )?;

        tracing::debug!(
            "Fetched {} dates and {} records for {}/{}",
            dates.len(),
            records.len(),
            query.app_name,
            query.country
        );

        let series_set = self.pipeline.build_chart_series(&records, &dates, mode)?;
        let has_non_positive = scale == YAxisScale::Log && series_set.has_non_positive();

        Ok(ChartView {
            app_name: query.app_name.clone(),
            country: query.country.clone(),
            window_size: self.pipeline.config().window_size,
            scale,
            y_ticks: scale.ticks().to_vec(),
            has_non_positive,
            series_set,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::pipeline::PipelineConfig;
    use crate::application::roi_repository::testing::MemoryRepository;
    use crate::domain::horizon::{Horizon, RoiRecord};

    fn dates(n: usize) -> Vec<String> {
        (1..=n).map(|d| format!("2024-05-{:02}", d)).collect()
    }

    fn records(values: &[&str]) -> Vec<RoiRecord> {
        values
            .iter()
            .map(|v| RoiRecord {
                roi_1d: v.to_string(),
                ..Default::default()
            })
            .collect()
    }

    fn service(repo: MemoryRepository) -> ChartService {
        ChartService::new(
            Arc::new(repo),
            ChartPipeline::new(PipelineConfig::default()),
            DisplayMode::Smoothed,
            YAxisScale::Linear,
        )
    }

    fn query(mode: Option<DisplayMode>, scale: Option<YAxisScale>) -> ChartQuery {
        ChartQuery {
            app_name: "App-1".to_string(),
            country: "美国".to_string(),
            mode,
            scale,
        }
    }

    #[tokio::test]
    async fn test_chart_uses_default_mode() {
        let values = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"];
        let repo = MemoryRepository::default().with_selection("App-1", "美国", dates(10), records(&values));

        let view = service(repo).chart(&query(None, None)).await.unwrap();
        assert_eq!(view.series_set.mode, DisplayMode::Smoothed);
        assert_eq!(view.window_size, 7);
        assert_eq!(view.series_set.date_axis, dates(10)[6..].to_vec());
        assert_eq!(
            view.series_set.get(Horizon::OneDay).unwrap().values,
            vec![Some(4.0), Some(5.0), Some(6.0), Some(7.0)]
        );
        assert_eq!(view.y_ticks.len(), 10);
    }

    #[tokio::test]
    async fn test_chart_raw_log_flags_non_positive() {
        let repo = MemoryRepository::default().with_selection("App-1", "美国", dates(3), records(&["0", "1.5", ""]));

        let view = service(repo)
            .chart(&query(Some(DisplayMode::Raw), Some(YAxisScale::Log)))
            .await
            .unwrap();
        assert_eq!(view.series_set.date_axis.len(), 3);
        assert_eq!(
            view.series_set.get(Horizon::OneDay).unwrap().values,
            vec![Some(0.0), Some(1.5), None]
        );
        assert!(view.has_non_positive);
        assert_eq!(view.y_ticks, vec![1.0, 10.0, 100.0, 1000.0]);
    }

    #[tokio::test]
    async fn test_misaligned_upstream_is_core_error() {
        let repo = MemoryRepository::default().with_selection("App-1", "美国", dates(2), records(&["1"]));

        let err = service(repo).chart(&query(None, None)).await.unwrap_err();
        assert!(matches!(
            err,
            ChartError::Core(CoreError::AxisMismatch { dates: 2, records: 1 })
        ));
    }

    #[tokio::test]
    async fn test_upstream_failure() {
        let repo = MemoryRepository {
            fail: true,
            ..Default::default()
        };
        let err = service(repo).chart(&query(None, None)).await.unwrap_err();
        assert!(matches!(err, ChartError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_view_serializes_flat() {
        let repo = MemoryRepository::default().with_selection("App-1", "美国", dates(1), records(&["2"]));
        let view = service(repo)
            .chart(&query(Some(DisplayMode::Raw), None))
            .await
            .unwrap();

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["mode"], "raw");
        assert_eq!(json["scale"], "linear");
        assert_eq!(json["date_axis"], serde_json::json!(["2024-05-01"]));
        assert_eq!(json["series"][1]["values"], serde_json::json!([2.0]));
    }
}
