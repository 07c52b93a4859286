// Chart-ready series domain models
use super::horizon::Horizon;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether series values are plotted as converted or as a trailing moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Raw,
    #[default]
    Smoothed,
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The dashboard's own selector labels are accepted alongside the short names
        match s.trim() {
            m if m.eq_ignore_ascii_case("raw") || m == "显示原始数据" => Ok(DisplayMode::Raw),
            m if m.eq_ignore_ascii_case("smoothed") || m == "显示移动平均值" => {
                Ok(DisplayMode::Smoothed)
            }
            other => Err(format!("unknown display mode: {}", other)),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Raw => f.write_str("raw"),
            DisplayMode::Smoothed => f.write_str("smoothed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YAxisScale {
    #[default]
    Linear,
    Log,
}

const LINEAR_TICKS: [f64; 10] = [7.0, 10.0, 20.0, 30.0, 50.0, 70.0, 100.0, 200.0, 300.0, 500.0];
const LOG_TICKS: [f64; 4] = [1.0, 10.0, 100.0, 1000.0];

impl YAxisScale {
    pub fn ticks(self) -> &'static [f64] {
        match self {
            YAxisScale::Linear => &LINEAR_TICKS,
            YAxisScale::Log => &LOG_TICKS,
        }
    }
}

impl FromStr for YAxisScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            m if m.eq_ignore_ascii_case("linear") || m == "线性刻度" => Ok(YAxisScale::Linear),
            m if m.eq_ignore_ascii_case("log") || m == "对数刻度" => Ok(YAxisScale::Log),
            other => Err(format!("unknown y-axis scale: {}", other)),
        }
    }
}

/// One named, colored numeric sequence, one slot per date on the accompanying axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorizonSeries {
    pub horizon: Horizon,
    pub label: String,
    pub color: String,
    pub dashed: bool,
    pub values: Vec<Option<f64>>,
}

/// Final pipeline output: series in catalog order plus the axis they are aligned to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSet {
    pub mode: DisplayMode,
    pub date_axis: Vec<String>,
    pub series: Vec<HorizonSeries>,
}

impl SeriesSet {
    pub fn get(&self, horizon: Horizon) -> Option<&HorizonSeries> {
        self.series.iter().find(|s| s.horizon == horizon)
    }

    /// True when any present value could not be drawn on a logarithmic axis.
    pub fn has_non_positive(&self) -> bool {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().flatten())
            .any(|v| *v <= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: Vec<Option<f64>>) -> HorizonSeries {
        HorizonSeries {
            horizon: Horizon::OneDay,
            label: "1日".to_string(),
            color: "#059669".to_string(),
            dashed: false,
            values,
        }
    }

    #[test]
    fn test_display_mode_parse() {
        assert_eq!("raw".parse::<DisplayMode>().unwrap(), DisplayMode::Raw);
        assert_eq!("SMOOTHED".parse::<DisplayMode>().unwrap(), DisplayMode::Smoothed);
        assert_eq!("显示原始数据".parse::<DisplayMode>().unwrap(), DisplayMode::Raw);
        assert!("average".parse::<DisplayMode>().is_err());
    }

    #[test]
    fn test_scale_ticks() {
        assert_eq!(YAxisScale::Log.ticks(), &[1.0, 10.0, 100.0, 1000.0]);
        assert_eq!(YAxisScale::Linear.ticks().len(), 10);
        assert_eq!("对数刻度".parse::<YAxisScale>().unwrap(), YAxisScale::Log);
    }

    #[test]
    fn test_has_non_positive_ignores_absent() {
        let mut set = SeriesSet {
            mode: DisplayMode::Raw,
            date_axis: vec!["2024-01-01".to_string(), "2024-01-02".to_string()],
            series: vec![series(vec![None, Some(1.5)])],
        };
        assert!(!set.has_non_positive());

        set.series.push(series(vec![Some(0.0), None]));
        assert!(set.has_non_positive());
    }

    #[test]
    fn test_absent_serializes_as_null() {
        let json = serde_json::to_value(series(vec![Some(1.25), None])).unwrap();
        assert_eq!(json["values"], serde_json::json!([1.25, null]));
        assert_eq!(json["horizon"], "1d");
    }
}
