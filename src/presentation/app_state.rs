// Application state for HTTP handlers
use crate::application::chart_service::ChartService;
use crate::application::filter_service::FilterService;

#[derive(Clone)]
pub struct AppState {
    pub filter_service: FilterService,
    pub chart_service: ChartService,
}
