// ROI dashboard - chart-ready ROI time series per app and country
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
