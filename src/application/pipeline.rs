// Pipeline orchestrator - conversion, optional smoothing and axis alignment
use crate::application::converter::convert;
use crate::application::smoother::{smooth, smoothed_len};
use crate::domain::catalog::SeriesCatalog;
use crate::domain::error::CoreError;
use crate::domain::horizon::{Horizon, RoiRecord};
use crate::domain::series::{DisplayMode, HorizonSeries, SeriesSet};

pub const DEFAULT_WINDOW_SIZE: usize = 7;

/// Immutable pipeline settings, fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub catalog: SeriesCatalog,
    pub window_size: usize,
}

impl PipelineConfig {
    pub fn new(catalog: SeriesCatalog, window_size: usize) -> Result<Self, CoreError> {
        if window_size == 0 {
            return Err(CoreError::InvalidWindow(window_size));
        }
        Ok(Self {
            catalog,
            window_size,
        })
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            catalog: SeriesCatalog::default(),
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChartPipeline {
    config: PipelineConfig,
}

impl ChartPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Build chart-ready series for one selection.
    ///
    /// `records[i]` is the observation for `date_axis[i]`. In smoothed mode every series and
    /// the axis are shortened by `window_size - 1`; each smoothed point is labelled with the
    /// last date of its window. When the axis is shorter than the window nothing is smoothed.
    pub fn build_chart_series(
        &self,
        records: &[RoiRecord],
        date_axis: &[String],
        mode: DisplayMode,
    ) -> Result<SeriesSet, CoreError> {
        if records.len() != date_axis.len() {
            return Err(CoreError::AxisMismatch {
                dates: date_axis.len(),
                records: records.len(),
            });
        }

        let window_size = self.config.window_size;
        if window_size == 0 {
            return Err(CoreError::InvalidWindow(window_size));
        }
        let horizons: Vec<Horizon> = self.config.catalog.horizons().collect();
        let converted = convert(records, &horizons);

        let smoothing = mode == DisplayMode::Smoothed && window_size <= date_axis.len();
        let out_len = if smoothing {
            smoothed_len(date_axis.len(), window_size)
        } else {
            date_axis.len()
        };
        // each smoothed point takes the date that closes its window
        let axis: Vec<String> = date_axis[date_axis.len() - out_len..].to_vec();

        let mut series = Vec::with_capacity(self.config.catalog.len());
        for entry in self.config.catalog.entries() {
            let values = match converted.get(entry.horizon) {
                Some(values) if smoothing => smooth(values, window_size)?,
                Some(values) => values.to_vec(),
                None => vec![None; out_len],
            };
            debug_assert_eq!(values.len(), axis.len());

            series.push(HorizonSeries {
                horizon: entry.horizon,
                label: entry.label.clone(),
                color: entry.color.clone(),
                dashed: entry.dashed,
                values,
            });
        }

        tracing::debug!(
            "Built {} series ({} mode) over {} of {} dates",
            series.len(),
            mode,
            axis.len(),
            date_axis.len()
        );

        Ok(SeriesSet {
            mode,
            date_axis: axis,
            series,
        })
    }
}
