// Application layer - ROI series pipeline and the use cases built on it
pub mod chart_service;
pub mod converter;
pub mod filter_service;
pub mod pipeline;
pub mod roi_repository;
pub mod smoother;
