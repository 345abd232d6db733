// Dashboard service - Orchestrates the initial load and the interactive view state
use crate::application::dashboard_gateway::DashboardGateway;
use crate::domain::asset::{SummaryMetrics, WarrantyAsset};
use crate::domain::carousel::{CarouselController, CarouselSettings};
use crate::domain::drill_down::{DetailRequest, DrillDownSession};
use crate::domain::filter::{MaintenanceDimension, MaintenanceFilter, WarrantyFilter};
use crate::domain::maintenance::MaintenanceOverviewItem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Shown instead of the underlying error whenever a required fetch fails.
pub const LOAD_ERROR_MESSAGE: &str = "No se pudieron cargar los datos del dashboard. Intente nuevamente.";

/// Collections every panel depends on. All present or none.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub by_type: serde_json::Value,
    pub models: serde_json::Value,
    pub warranty_assets: Vec<WarrantyAsset>,
    pub maintenance: Vec<MaintenanceOverviewItem>,
}

#[derive(Debug)]
pub struct DashboardState {
    pub is_loading: bool,
    // Bumped per load so only the newest one lands.
    pub load_token: u64,
    pub error: Option<&'static str>,
    pub summary: SummaryMetrics,
    pub data: Option<DashboardData>,
    pub carousel: CarouselController,
    pub warranty_filter: WarrantyFilter,
    pub maintenance_filter: MaintenanceFilter,
    pub drill_down: DrillDownSession,
}

impl DashboardState {
    pub fn new(carousel: CarouselSettings) -> Self {
        Self {
            is_loading: false,
            load_token: 0,
            error: None,
            summary: SummaryMetrics::default(),
            data: None,
            carousel: CarouselController::new(carousel),
            warranty_filter: WarrantyFilter::default(),
            maintenance_filter: MaintenanceFilter::default(),
            drill_down: DrillDownSession::default(),
        }
    }
}

#[derive(Clone)]
pub struct DashboardService {
    gateway: Arc<dyn DashboardGateway>,
    state: Arc<Mutex<DashboardState>>,
    carousel_wake: Arc<Notify>,
}

fn lock(state: &Mutex<DashboardState>) -> MutexGuard<'_, DashboardState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl DashboardService {
    pub fn new(gateway: Arc<dyn DashboardGateway>, carousel: CarouselSettings) -> Self {
        Self {
            gateway,
            state: Arc::new(Mutex::new(DashboardState::new(carousel))),
            carousel_wake: Arc::new(Notify::new()),
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R {
        f(&lock(&self.state))
    }

    fn update<R>(&self, f: impl FnOnce(&mut DashboardState) -> R) -> R {
        f(&mut lock(&self.state))
    }

    /// Loads every panel. The summary is best-effort and falls back to an
    /// empty placeholder; any failure among the other four fails the screen.
    /// A load overtaken by a newer one is discarded when it finishes.
    pub async fn load(&self) {
        let token = self.update(|state| {
            state.load_token = state.load_token.wrapping_add(1);
            state.is_loading = true;
            state.load_token
        });

        let gateway = &self.gateway;
        let summary = async {
            match gateway.summary().await {
                Ok(summary) => summary,
                Err(e) => {
                    tracing::warn!("Summary unavailable, showing empty totals: {}", e);
                    SummaryMetrics::default()
                }
            }
        };
        let required = async {
            futures::try_join!(
                gateway.dashboard_by_type(),
                gateway.dashboard_models(),
                gateway.dashboard_warranty(),
                gateway.maintenance_overview()
            )
        };
        let (summary, required) = futures::join!(summary, required);

        let now = Instant::now();
        let applied = self.update(|state| {
            if state.load_token != token {
                tracing::debug!(token, current = state.load_token, "Discarding superseded dashboard load");
                return false;
            }

            state.carousel.set_len(summary.asset_types.len(), now);
            state.summary = summary;

            match required {
                Ok((by_type, models, warranty, maintenance)) => {
                    tracing::info!(
                        "Dashboard loaded: {} warranty assets, {} maintenance items",
                        warranty.warranty_assets.len(),
                        maintenance.len()
                    );
                    state.data = Some(DashboardData {
                        by_type,
                        models,
                        warranty_assets: warranty.warranty_assets,
                        maintenance,
                    });
                    state.error = None;
                }
                Err(e) => {
                    tracing::error!("Error loading dashboard: {}", e);
                    state.data = None;
                    state.error = Some(LOAD_ERROR_MESSAGE);
                }
            }

            state.is_loading = false;
            true
        });
        if applied {
            self.carousel_wake.notify_one();
        }
    }

    pub fn carousel_next(&self) {
        self.touch_carousel(|carousel, now| carousel.advance(now));
    }

    pub fn carousel_prev(&self) {
        self.touch_carousel(|carousel, now| carousel.retreat(now));
    }

    pub fn carousel_go_to(&self, index: usize) {
        self.touch_carousel(|carousel, now| carousel.go_to(index, now));
    }

    /// Hover and any other interaction that should hold the carousel still.
    pub fn carousel_pause(&self) {
        self.touch_carousel(|carousel, now| carousel.pause(now));
    }

    fn touch_carousel(&self, f: impl FnOnce(&mut CarouselController, Instant)) {
        let now = Instant::now();
        self.update(|state| f(&mut state.carousel, now));
        self.carousel_wake.notify_one();
    }

    pub fn toggle_warranty_type(&self, value: &str) {
        self.update(|state| state.warranty_filter.toggle_type(value));
    }

    pub fn clear_warranty_filter(&self) {
        self.update(|state| state.warranty_filter.clear());
    }

    /// Returns false when the value is not valid for the dimension.
    pub fn toggle_maintenance_filter(&self, dimension: MaintenanceDimension, value: &str) -> bool {
        self.update(|state| state.maintenance_filter.toggle(dimension, value))
    }

    pub fn clear_maintenance_filter(&self) {
        self.update(|state| state.maintenance_filter.clear());
    }

    pub async fn open_drill_down(&self, category: &str, title: &str) {
        let request = self.update(|state| state.drill_down.open(category, title));
        self.fetch_detail(request).await;
    }

    pub async fn sort_drill_down(&self, field: &str) {
        if let Some(request) = self.update(|state| state.drill_down.set_sort(field)) {
            self.fetch_detail(request).await;
        }
    }

    pub async fn page_drill_down(&self, page: u32) {
        if let Some(request) = self.update(|state| state.drill_down.set_page(page)) {
            self.fetch_detail(request).await;
        }
    }

    pub fn close_drill_down(&self) {
        self.update(|state| state.drill_down.close());
    }

    async fn fetch_detail(&self, request: DetailRequest) {
        tracing::debug!(
            token = request.token,
            category = %request.query.category,
            ordering = %request.query.ordering,
            page = request.query.page,
            "Fetching drill-down page"
        );

        let result = match self.gateway.dashboard_detail(&request.query).await {
            Ok(page) => Some(page),
            Err(e) => {
                tracing::error!("Error fetching detail for {}: {}", request.query.category, e);
                None
            }
        };

        self.update(|state| state.drill_down.complete(request.token, result));
    }

    /// Runs the carousel clock: sleeps until the controller's next deadline
    /// and re-reads it whenever the controller is touched.
    pub fn spawn_carousel_driver(&self) -> JoinHandle<()> {
        let state = self.state.clone();
        let wake = self.carousel_wake.clone();

        tokio::spawn(async move {
            loop {
                let deadline = lock(&state).carousel.next_deadline();
                match deadline {
                    Some(deadline) => {
                        tokio::select! {
                            _ = tokio::time::sleep_until(deadline) => {
                                let changed = lock(&state).carousel.fire_due(Instant::now());
                                if changed {
                                    tracing::debug!("Carousel advanced");
                                }
                            }
                            _ = wake.notified() => {}
                        }
                    }
                    None => wake.notified().await,
                }
            }
        })
    }
}
