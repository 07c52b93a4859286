// Raw-to-series conversion - string-encoded ROI fields into per-horizon numeric sequences
use crate::domain::error::CoreError;
use crate::domain::horizon::{Horizon, RoiRecord};

/// Per-horizon numeric sequences in request order, each as long as the record list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertedSeries {
    series: Vec<(Horizon, Vec<Option<f64>>)>,
}

impl ConvertedSeries {
    pub fn get(&self, horizon: Horizon) -> Option<&[Option<f64>]> {
        self.series
            .iter()
            .find(|(h, _)| *h == horizon)
            .map(|(_, values)| values.as_slice())
    }

    pub fn horizons(&self) -> impl Iterator<Item = Horizon> + '_ {
        self.series.iter().map(|(h, _)| *h)
    }
}

/// Parse one string-encoded value. Malformed, empty and non-finite input is absent.
pub fn parse_value(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Convert records into one sequence per requested horizon. The prediction pseudo-horizon
/// is skipped; repeated horizons are converted once.
pub fn convert(records: &[RoiRecord], horizons: &[Horizon]) -> ConvertedSeries {
    let mut series: Vec<(Horizon, Vec<Option<f64>>)> = Vec::with_capacity(horizons.len());

    for &horizon in horizons {
        let Some(field) = horizon.field() else {
            continue;
        };
        if series.iter().any(|(h, _)| *h == horizon) {
            continue;
        }

        let values: Vec<Option<f64>> = records.iter().map(|r| parse_value(field(r))).collect();

        let dropped = records
            .iter()
            .zip(&values)
            .filter(|(r, v)| v.is_none() && !field(r).trim().is_empty())
            .count();
        if dropped > 0 {
            tracing::warn!(
                "Horizon {}: {} malformed value(s) treated as absent",
                horizon,
                dropped
            );
        }

        series.push((horizon, values));
    }

    ConvertedSeries { series }
}

/// Name-based entry point; fails on the first name the registry does not know.
pub fn convert_named(records: &[RoiRecord], horizon_names: &[&str]) -> Result<ConvertedSeries, CoreError> {
    let horizons = horizon_names
        .iter()
        .map(|name| name.parse::<Horizon>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(convert(records, &horizons))
}
