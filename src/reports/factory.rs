use crate::core::store::AppState;
use crate::reports::domain::ReportService;
use crate::reports::domain::service::ReportServiceImpl;

pub fn create_report_service(state: &AppState) -> Box<dyn ReportService> {
    Box::new(ReportServiceImpl::new(&state.config, state.store.clone()))
}
