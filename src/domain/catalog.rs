// Series catalog - rendering order and presentation metadata per horizon
use super::error::CoreError;
use super::horizon::Horizon;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub horizon: Horizon,
    pub label: String,
    pub color: String,
    pub dashed: bool,
}

impl CatalogEntry {
    pub fn new(horizon: Horizon, label: impl Into<String>, color: impl Into<String>, dashed: bool) -> Self {
        Self {
            horizon,
            label: label.into(),
            color: color.into(),
            dashed,
        }
    }
}

/// Ordered, immutable set of horizons to chart. Order is rendering order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SeriesCatalog {
    entries: Vec<CatalogEntry>,
}

const BUILTIN: [(Horizon, &str, &str); 9] = [
    (Horizon::Current, "当日(7日均值)", "#dc2626"),
    (Horizon::OneDay, "1日(7日均值)", "#059669"),
    (Horizon::ThreeDay, "3日(7日均值)", "#0d9488"),
    (Horizon::SevenDay, "7日(7日均值)", "#0891b2"),
    (Horizon::FourteenDay, "14日(7日均值)", "#2563eb"),
    (Horizon::ThirtyDay, "30日(7日均值)", "#7c3aed"),
    (Horizon::SixtyDay, "60日(7日均值)", "#d97706"),
    (Horizon::NinetyDay, "90日(7日均值)", "#e11d48"),
    (Horizon::Prediction, "预测值", "#16a34a"),
];

impl SeriesCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CoreError> {
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.horizon == entry.horizon) {
                return Err(CoreError::DuplicateHorizon(entry.horizon.to_string()));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn horizons(&self) -> impl Iterator<Item = Horizon> + '_ {
        self.entries.iter().map(|e| e.horizon)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SeriesCatalog {
    fn default() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(horizon, label, color)| CatalogEntry::new(*horizon, *label, *color, horizon.is_prediction()))
            .collect();
        Self { entries }
    }
}
