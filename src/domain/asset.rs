// Asset domain models consumed from the ITAM backend
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier as the backend emits it: numeric primary keys, occasionally strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssetId {
    Number(i64),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    #[serde(default)]
    pub total_assets: u64,
    #[serde(default)]
    pub asset_types: Vec<AssetTypeSummary>,
}

/// One carousel card. `valid + expiring + none <= total` is the backend's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetTypeSummary {
    pub tipo_activo: String,
    #[serde(default)]
    pub total_equipment: u64,
    #[serde(default)]
    pub valid_warranty: u64,
    #[serde(default)]
    pub expiring_warranty: u64,
    #[serde(default)]
    pub no_warranty: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarrantyAsset {
    pub id: AssetId,
    #[serde(default)]
    pub tipo_activo: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub marca: Option<String>,
    #[serde(default)]
    pub modelo: Option<String>,
    #[serde(default)]
    pub serie: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub fecha_vencimiento_garantia: Option<NaiveDate>,
}

impl WarrantyAsset {
    /// Days left until the warranty lapses; negative once it already has.
    pub fn days_until_expiry(&self, today: NaiveDate) -> Option<i64> {
        self.fecha_vencimiento_garantia
            .map(|expiry| (expiry - today).num_days())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WarrantyDashboard {
    #[serde(default)]
    pub warranty_assets: Vec<WarrantyAsset>,
}

/// Row of the drill-down table. The detail endpoint's rows vary by category,
/// so everything but the identifier is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailAsset {
    pub id: AssetId,
    #[serde(default)]
    pub serie: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub marca: Option<String>,
    #[serde(default)]
    pub modelo: Option<String>,
    #[serde(default)]
    pub tipo_activo: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub fecha_vencimiento_garantia: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedAssetResult {
    #[serde(default)]
    pub assets: Vec<DetailAsset>,
    pub pagination: Pagination,
}

impl PagedAssetResult {
    pub fn has_next_page(&self) -> bool {
        self.pagination.page < self.pagination.total_pages
    }

    pub fn has_previous_page(&self) -> bool {
        self.pagination.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_until_expiry() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut asset: WarrantyAsset = serde_json::from_value(serde_json::json!({
            "id": 7,
            "tipo_activo": "Laptop",
            "fecha_vencimiento_garantia": "2024-03-31"
        }))
        .unwrap();

        assert_eq!(asset.days_until_expiry(today), Some(30));

        asset.fecha_vencimiento_garantia = NaiveDate::from_ymd_opt(2024, 2, 27);
        assert_eq!(asset.days_until_expiry(today), Some(-3));

        asset.fecha_vencimiento_garantia = None;
        assert_eq!(asset.days_until_expiry(today), None);
    }

    #[test]
    fn test_summary_tolerates_missing_fields() {
        let summary: SummaryMetrics = serde_json::from_str(
            r#"{"total_assets": 12, "asset_types": [{"tipo_activo": "Desktop", "total_equipment": 12}]}"#,
        )
        .unwrap();

        assert_eq!(summary.total_assets, 12);
        assert_eq!(summary.asset_types[0].valid_warranty, 0);
        assert_eq!(SummaryMetrics::default().asset_types.len(), 0);
    }

    #[test]
    fn test_pagination_flags() {
        let page: PagedAssetResult = serde_json::from_value(serde_json::json!({
            "assets": [{"id": "A-1", "serie": "SN1"}],
            "pagination": {"page": 2, "page_size": 10, "total_count": 25, "total_pages": 3}
        }))
        .unwrap();

        assert_eq!(page.assets[0].id, AssetId::Text("A-1".to_string()));
        assert!(page.has_next_page());
        assert!(page.has_previous_page());
    }
}
