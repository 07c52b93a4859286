// Filter service - Use case for listing selectable apps, bid types and countries
use crate::application::roi_repository::RoiRepository;
use serde::Serialize;
use std::sync::Arc;

const INSTALLATION_CHANNELS: [&str; 1] = ["Apple"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
}

impl FilterOption {
    pub fn new(value: String) -> Self {
        Self {
            label: value.clone(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSelection {
    pub app_names: Vec<FilterOption>,
    pub bid_types: Vec<FilterOption>,
    pub countries: Vec<FilterOption>,
    pub installation_channels: Vec<String>,
    pub current_app_name: String,
    pub current_bid_type: String,
    pub current_country: String,
    pub current_installation_channel: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppFilterSelection {
    pub app_name: String,
    pub bid_types: Vec<FilterOption>,
    pub countries: Vec<FilterOption>,
    pub current_country: String,
}

fn to_options(values: Vec<String>) -> Vec<FilterOption> {
    values.into_iter().map(FilterOption::new).collect()
}

fn first_or_empty(values: &[String]) -> String {
    values.first().cloned().unwrap_or_default()
}

#[derive(Clone)]
pub struct FilterService {
    repository: Arc<dyn RoiRepository>,
}

impl FilterService {
    pub fn new(repository: Arc<dyn RoiRepository>) -> Self {
        Self { repository }
    }

    pub async fn load_filters(&self) -> anyhow::Result<FilterSelection> {
        let options = self.repository.list_filters().await?;
        tracing::debug!(
            "Loaded filters: {} apps, {} bid types, {} countries",
            options.app_names.len(),
            options.bid_types.len(),
            options.countries.len()
        );

        Ok(FilterSelection {
            current_app_name: first_or_empty(&options.app_names),
            current_bid_type: first_or_empty(&options.bid_types),
            current_country: first_or_empty(&options.countries),
            current_installation_channel: INSTALLATION_CHANNELS[0].to_string(),
            app_names: to_options(options.app_names),
            bid_types: to_options(options.bid_types),
            countries: to_options(options.countries),
            installation_channels: INSTALLATION_CHANNELS.iter().map(|c| c.to_string()).collect(),
        })
    }

    pub async fn filters_for_app(&self, app_name: &str) -> anyhow::Result<AppFilterSelection> {
        let options = self.repository.filters_for_app(app_name).await?;

        Ok(AppFilterSelection {
            app_name: app_name.to_string(),
            current_country: first_or_empty(&options.countries),
            bid_types: to_options(options.bid_types),
            countries: to_options(options.countries),
        })
    }
}
