// Repository trait for ROI data access
use crate::domain::horizon::RoiRecord;
use async_trait::async_trait;
use serde::Deserialize;

/// Every filter value the upstream knows about
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    pub app_names: Vec<String>,
    pub bid_types: Vec<String>,
    pub countries: Vec<String>,
}

/// Filter values available for a single app
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppFilterOptions {
    pub bid_types: Vec<String>,
    pub countries: Vec<String>,
}

#[async_trait]
pub trait RoiRepository: Send + Sync {
    /// List app names, bid types and countries
    async fn list_filters(&self) -> anyhow::Result<FilterOptions>;

    /// Bid types and countries for one app
    async fn filters_for_app(&self, app_name: &str) -> anyhow::Result<AppFilterOptions>;

    /// Ordered date labels for a selection
    async fn fetch_dates(&self, app_name: &str, country: &str) -> anyhow::Result<Vec<String>>;

    /// Raw records for a selection, index-aligned with `fetch_dates`
    async fn fetch_records(&self, app_name: &str, country: &str) -> anyhow::Result<Vec<RoiRecord>>;
}
