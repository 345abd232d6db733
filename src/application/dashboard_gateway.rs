// Gateway trait for the backend's read-only dashboard endpoints
use crate::domain::asset::{PagedAssetResult, SummaryMetrics, WarrantyDashboard};
use crate::domain::drill_down::DetailQuery;
use crate::domain::maintenance::MaintenanceOverviewItem;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("backend answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

#[async_trait]
pub trait DashboardGateway: Send + Sync {
    /// Totals plus the per-type cards shown in the carousel
    async fn summary(&self) -> GatewayResult<SummaryMetrics>;

    /// Per-type breakdown, consumed as-is
    async fn dashboard_by_type(&self) -> GatewayResult<serde_json::Value>;

    /// Model-level breakdown, consumed as-is
    async fn dashboard_models(&self) -> GatewayResult<serde_json::Value>;

    async fn dashboard_warranty(&self) -> GatewayResult<WarrantyDashboard>;

    async fn maintenance_overview(&self) -> GatewayResult<Vec<MaintenanceOverviewItem>>;

    /// One page of drill-down rows for a category, in the given ordering
    async fn dashboard_detail(&self, query: &DetailQuery) -> GatewayResult<PagedAssetResult>;
}
