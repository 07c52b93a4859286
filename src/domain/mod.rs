// Domain layer - ROI horizons, catalog and chart-ready series
pub mod catalog;
pub mod error;
pub mod horizon;
pub mod series;
