// HTTP request handlers
use crate::domain::filter::MaintenanceDimension;
use crate::presentation::app_state::AppState;
use crate::presentation::view::DashboardView;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug)]
pub struct BadRequest(String);

impl IntoResponse for BadRequest {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": self.0 })),
        )
            .into_response()
    }
}

#[derive(Deserialize)]
pub struct ToggleValue {
    pub value: String,
}

#[derive(Deserialize)]
pub struct MaintenanceToggle {
    pub dimension: String,
    pub value: String,
}

#[derive(Deserialize)]
pub struct OpenDrillDown {
    pub category: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Deserialize)]
pub struct SortRequest {
    pub field: String,
}

#[derive(Deserialize)]
pub struct PageRequest {
    pub page: u32,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    Json(state.view())
}

pub async fn reload_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    state.dashboard.load().await;
    Json(state.view())
}

pub async fn carousel_next(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    state.dashboard.carousel_next();
    Json(state.view())
}

pub async fn carousel_prev(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    state.dashboard.carousel_prev();
    Json(state.view())
}

/// Pointer entered the carousel
pub async fn carousel_pause(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    state.dashboard.carousel_pause();
    Json(state.view())
}

pub async fn carousel_goto(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Json<DashboardView> {
    state.dashboard.carousel_go_to(index);
    Json(state.view())
}

pub async fn toggle_warranty_filter(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ToggleValue>,
) -> Json<DashboardView> {
    state.dashboard.toggle_warranty_type(&body.value);
    Json(state.view())
}

pub async fn clear_warranty_filter(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    state.dashboard.clear_warranty_filter();
    Json(state.view())
}

pub async fn toggle_maintenance_filter(
    State(state): State<Arc<AppState>>,
    Json(body): Json<MaintenanceToggle>,
) -> Result<Json<DashboardView>, BadRequest> {
    let dimension = MaintenanceDimension::parse(&body.dimension)
        .ok_or_else(|| BadRequest(format!("unknown filter dimension: {}", body.dimension)))?;

    if !state.dashboard.toggle_maintenance_filter(dimension, &body.value) {
        return Err(BadRequest(format!("unknown maintenance status: {}", body.value)));
    }
    Ok(Json(state.view()))
}

pub async fn clear_maintenance_filter(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    state.dashboard.clear_maintenance_filter();
    Json(state.view())
}

pub async fn open_drill_down(
    State(state): State<Arc<AppState>>,
    Json(body): Json<OpenDrillDown>,
) -> Json<DashboardView> {
    let title = body.title.as_deref().unwrap_or(&body.category);
    state.dashboard.open_drill_down(&body.category, title).await;
    Json(state.view())
}

pub async fn sort_drill_down(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SortRequest>,
) -> Json<DashboardView> {
    state.dashboard.sort_drill_down(&body.field).await;
    Json(state.view())
}

pub async fn page_drill_down(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PageRequest>,
) -> Result<Json<DashboardView>, BadRequest> {
    if body.page == 0 {
        return Err(BadRequest("page must be at least 1".to_string()));
    }
    state.dashboard.page_drill_down(body.page).await;
    Ok(Json(state.view()))
}

pub async fn close_drill_down(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    state.dashboard.close_drill_down();
    Json(state.view())
}
