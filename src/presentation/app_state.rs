// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::presentation::view::DashboardView;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: DashboardService,
}

impl AppState {
    pub fn view(&self) -> DashboardView {
        let today = chrono::Local::now().date_naive();
        self.dashboard
            .read(|state| DashboardView::from_state(state, today))
    }
}
