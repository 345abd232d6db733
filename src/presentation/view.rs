// Serializable snapshot of the dashboard for renderers
use crate::application::dashboard_service::DashboardState;
use crate::domain::asset::{AssetTypeSummary, WarrantyAsset};
use crate::domain::carousel::CarouselSnapshot;
use crate::domain::drill_down::DrillDownSnapshot;
use crate::domain::filter::status_counts;
use crate::domain::maintenance::{MaintenanceOverviewItem, MaintenanceStatus};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub is_loading: bool,
    pub error: Option<String>,
    pub total_assets: u64,
    pub carousel: CarouselView,
    pub by_type: Option<serde_json::Value>,
    pub models: Option<serde_json::Value>,
    pub warranty: Option<WarrantyPanel>,
    pub maintenance: Option<MaintenancePanel>,
    pub drill_down: DrillDownSnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct CarouselView {
    #[serde(flatten)]
    pub state: CarouselSnapshot,
    pub total_cards: usize,
    pub cards: Vec<AssetTypeSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WarrantyPanel {
    pub selected_types: Vec<String>,
    pub available_types: Vec<String>,
    pub assets: Vec<WarrantyRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WarrantyRow {
    #[serde(flatten)]
    pub asset: WarrantyAsset,
    pub days_until_expiry: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MaintenancePanel {
    pub selected_regions: Vec<String>,
    pub selected_types: Vec<String>,
    pub selected_statuses: Vec<MaintenanceStatus>,
    pub available_regions: Vec<String>,
    pub available_types: Vec<String>,
    pub status_counts: BTreeMap<MaintenanceStatus, usize>,
    pub items: Vec<MaintenanceRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MaintenanceRow {
    #[serde(flatten)]
    pub item: MaintenanceOverviewItem,
    pub technician: Option<String>,
}

fn owned(values: Vec<&str>) -> Vec<String> {
    values.into_iter().map(str::to_string).collect()
}

impl DashboardView {
    pub fn from_state(state: &DashboardState, today: NaiveDate) -> Self {
        let carousel = CarouselView {
            state: state.carousel.snapshot(),
            total_cards: state.carousel.len(),
            cards: state
                .carousel
                .visible_window(&state.summary.asset_types)
                .to_vec(),
        };

        let data = state.data.as_ref();

        let warranty = data.map(|data| {
            let filter = &state.warranty_filter;
            WarrantyPanel {
                selected_types: filter.types.iter().cloned().collect(),
                available_types: owned(filter.available_types(&data.warranty_assets)),
                assets: filter
                    .apply(&data.warranty_assets)
                    .into_iter()
                    .map(|asset| WarrantyRow {
                        days_until_expiry: asset.days_until_expiry(today),
                        asset: asset.clone(),
                    })
                    .collect(),
            }
        });

        let maintenance = data.map(|data| {
            let filter = &state.maintenance_filter;
            MaintenancePanel {
                selected_regions: filter.regions.iter().cloned().collect(),
                selected_types: filter.types.iter().cloned().collect(),
                selected_statuses: filter.statuses.iter().copied().collect(),
                available_regions: owned(filter.available_regions(&data.maintenance)),
                available_types: owned(filter.available_types(&data.maintenance)),
                status_counts: status_counts(&data.maintenance),
                items: filter
                    .apply(&data.maintenance)
                    .into_iter()
                    .map(|item| MaintenanceRow {
                        technician: item.technician().map(str::to_string),
                        item: item.clone(),
                    })
                    .collect(),
            }
        });

        Self {
            is_loading: state.is_loading,
            error: state.error.map(str::to_string),
            total_assets: state.summary.total_assets,
            carousel,
            by_type: data.map(|d| d.by_type.clone()),
            models: data.map(|d| d.models.clone()),
            warranty,
            maintenance,
            drill_down: state.drill_down.snapshot(),
        }
    }
}
