// ROI horizon registry and raw per-day records
use super::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reads one horizon's string-encoded value out of a raw record.
pub type FieldSelector = fn(&RoiRecord) -> &str;

/// One upstream observation for a single date. Values stay string-encoded until conversion;
/// a field missing from the payload deserializes as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RoiRecord {
    pub roi_current: String,
    pub roi_1d: String,
    pub roi_3d: String,
    pub roi_7d: String,
    pub roi_14d: String,
    pub roi_30d: String,
    pub roi_60d: String,
    pub roi_90d: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Horizon {
    Current,
    OneDay,
    ThreeDay,
    SevenDay,
    FourteenDay,
    ThirtyDay,
    SixtyDay,
    NinetyDay,
    /// Filled by a separate forecasting source, never by conversion.
    Prediction,
}

struct RegistryEntry {
    horizon: Horizon,
    key: &'static str,
    const_name: &'static str,
    field: Option<FieldSelector>,
}

fn roi_current(r: &RoiRecord) -> &str {
    &r.roi_current
}

fn roi_1d(r: &RoiRecord) -> &str {
    &r.roi_1d
}

fn roi_3d(r: &RoiRecord) -> &str {
    &r.roi_3d
}

fn roi_7d(r: &RoiRecord) -> &str {
    &r.roi_7d
}

fn roi_14d(r: &RoiRecord) -> &str {
    &r.roi_14d
}

fn roi_30d(r: &RoiRecord) -> &str {
    &r.roi_30d
}

fn roi_60d(r: &RoiRecord) -> &str {
    &r.roi_60d
}

fn roi_90d(r: &RoiRecord) -> &str {
    &r.roi_90d
}

static REGISTRY: [RegistryEntry; 9] = [
    RegistryEntry {
        horizon: Horizon::Current,
        key: "current",
        const_name: "CURRENT",
        field: Some(roi_current as FieldSelector),
    },
    RegistryEntry {
        horizon: Horizon::OneDay,
        key: "1d",
        const_name: "ONE_DAY",
        field: Some(roi_1d as FieldSelector),
    },
    RegistryEntry {
        horizon: Horizon::ThreeDay,
        key: "3d",
        const_name: "THREE_DAY",
        field: Some(roi_3d as FieldSelector),
    },
    RegistryEntry {
        horizon: Horizon::SevenDay,
        key: "7d",
        const_name: "SEVEN_DAY",
        field: Some(roi_7d as FieldSelector),
    },
    RegistryEntry {
        horizon: Horizon::FourteenDay,
        key: "14d",
        const_name: "FOURTEEN_DAY",
        field: Some(roi_14d as FieldSelector),
    },
    RegistryEntry {
        horizon: Horizon::ThirtyDay,
        key: "30d",
        const_name: "THIRTY_DAY",
        field: Some(roi_30d as FieldSelector),
    },
    RegistryEntry {
        horizon: Horizon::SixtyDay,
        key: "60d",
        const_name: "SIXTY_DAY",
        field: Some(roi_60d as FieldSelector),
    },
    RegistryEntry {
        horizon: Horizon::NinetyDay,
        key: "90d",
        const_name: "NINETY_DAY",
        field: Some(roi_90d as FieldSelector),
    },
    RegistryEntry {
        horizon: Horizon::Prediction,
        key: "prediction",
        const_name: "PREDICTION",
        field: None,
    },
];

impl Horizon {
    /// Every registered horizon, pseudo-horizon last.
    pub const ALL: [Horizon; 9] = [
        Horizon::Current,
        Horizon::OneDay,
        Horizon::ThreeDay,
        Horizon::SevenDay,
        Horizon::FourteenDay,
        Horizon::ThirtyDay,
        Horizon::SixtyDay,
        Horizon::NinetyDay,
        Horizon::Prediction,
    ];

    fn entry(self) -> &'static RegistryEntry {
        // REGISTRY is declared in the same order as the enum variants
        &REGISTRY[self as usize]
    }

    /// Wire key, e.g. `7d`.
    pub fn key(self) -> &'static str {
        self.entry().key
    }

    /// Field accessor for this horizon; `None` for the prediction pseudo-horizon.
    pub fn field(self) -> Option<FieldSelector> {
        self.entry().field
    }

    pub fn is_prediction(self) -> bool {
        self.field().is_none()
    }
}

impl FromStr for Horizon {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        REGISTRY
            .iter()
            .find(|e| e.key.eq_ignore_ascii_case(name) || e.const_name.eq_ignore_ascii_case(name))
            .map(|e| e.horizon)
            .ok_or_else(|| CoreError::UnknownHorizon(s.to_string()))
    }
}

impl TryFrom<String> for Horizon {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Horizon> for String {
    fn from(horizon: Horizon) -> Self {
        horizon.key().to_string()
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Resolve a horizon name to its field accessor. Only the eight measured horizons resolve;
/// the prediction pseudo-horizon has no field and is reported as unknown here.
pub fn resolve_field(horizon_name: &str) -> Result<FieldSelector, CoreError> {
    let horizon: Horizon = horizon_name.parse()?;
    horizon
        .field()
        .ok_or_else(|| CoreError::UnknownHorizon(horizon_name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> RoiRecord {
        RoiRecord {
            roi_current: "0.5".to_string(),
            roi_1d: "1".to_string(),
            roi_3d: "3".to_string(),
            roi_7d: "12.345".to_string(),
            roi_14d: "14".to_string(),
            roi_30d: "30".to_string(),
            roi_60d: "60".to_string(),
            roi_90d: "90".to_string(),
        }
    }

    #[test]
    fn test_registry_matches_variant_order() {
        for horizon in Horizon::ALL {
            assert_eq!(horizon.entry().horizon, horizon);
        }
    }

    #[test]
    fn test_resolve_field_by_key_and_const_name() {
        let r = record();
        assert_eq!(resolve_field("7d").unwrap()(&r), "12.345");
        assert_eq!(resolve_field("SEVEN_DAY").unwrap()(&r), "12.345");
        assert_eq!(resolve_field("current").unwrap()(&r), "0.5");
        assert_eq!(resolve_field("ninety_day").unwrap()(&r), "90");
    }

    #[test]
    fn test_resolve_field_unknown() {
        assert_eq!(
            resolve_field("120d").unwrap_err(),
            CoreError::UnknownHorizon("120d".to_string())
        );
        assert!(matches!(
            resolve_field("PREDICTION"),
            Err(CoreError::UnknownHorizon(_))
        ));
    }

    #[test]
    fn test_prediction_is_recognized_without_field() {
        let horizon: Horizon = "prediction".parse().unwrap();
        assert_eq!(horizon, Horizon::Prediction);
        assert!(horizon.is_prediction());
        assert_eq!(Horizon::ALL.iter().filter(|h| h.is_prediction()).count(), 1);
    }

    #[test]
    fn test_record_missing_fields_default_to_empty() {
        let r: RoiRecord = serde_json::from_str(r#"{"roi_7d": "2.5"}"#).unwrap();
        assert_eq!(r.roi_7d, "2.5");
        assert_eq!(r.roi_90d, "");
    }

    #[test]
    fn test_horizon_serde_uses_wire_key() {
        let json = serde_json::to_string(&Horizon::FourteenDay).unwrap();
        assert_eq!(json, "\"14d\"");
        let back: Horizon = serde_json::from_str("\"THIRTY_DAY\"").unwrap();
        assert_eq!(back, Horizon::ThirtyDay);
    }
}
