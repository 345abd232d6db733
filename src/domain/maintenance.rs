// Maintenance overview domain model
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::asset::AssetId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceStatus {
    Nunca,
    Proximos,
    Realizados,
}

impl MaintenanceStatus {
    pub const ALL: [MaintenanceStatus; 3] = [
        MaintenanceStatus::Nunca,
        MaintenanceStatus::Proximos,
        MaintenanceStatus::Realizados,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceStatus::Nunca => "nunca",
            MaintenanceStatus::Proximos => "proximos",
            MaintenanceStatus::Realizados => "realizados",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceOverviewItem {
    pub id: AssetId,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub serie: Option<String>,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub modelo: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub finca: Option<String>,
    #[serde(default)]
    pub tecnico_mantenimiento: Option<String>,
    #[serde(default)]
    pub usuario: Option<String>,
    pub status: MaintenanceStatus,
    #[serde(default)]
    pub ultimo_mantenimiento: Option<NaiveDate>,
    #[serde(default)]
    pub proximo_mantenimiento: Option<NaiveDate>,
}

impl MaintenanceOverviewItem {
    /// Older backends report the responsible person as `usuario`.
    pub fn technician(&self) -> Option<&str> {
        self.tecnico_mantenimiento
            .as_deref()
            .or(self.usuario.as_deref())
    }
}

/// The overview endpoint answers either with a bare list or a paginated envelope.
/// Rows are kept raw until [`MaintenanceOverviewResponse::into_items`] so that one
/// malformed row cannot fail the whole collection.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MaintenanceOverviewResponse {
    List(Vec<serde_json::Value>),
    Envelope { results: Vec<serde_json::Value> },
}

impl MaintenanceOverviewResponse {
    /// Decodes every row, skipping (and logging) rows with a missing or
    /// unknown status or any other malformed field.
    pub fn into_items(self) -> Vec<MaintenanceOverviewItem> {
        let rows = match self {
            MaintenanceOverviewResponse::List(rows) => rows,
            MaintenanceOverviewResponse::Envelope { results } => results,
        };

        rows.into_iter()
            .filter_map(|row| match serde_json::from_value(row) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!("Skipping malformed maintenance row: {}", e);
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_json(status: &str) -> serde_json::Value {
        serde_json::json!({
            "id": 1,
            "hostname": "pc-01",
            "region": "Norte",
            "tipo": "Desktop",
            "usuario": "jperez",
            "status": status,
            "proximo_mantenimiento": "2024-05-01"
        })
    }

    #[test]
    fn test_both_response_shapes() {
        let bare: MaintenanceOverviewResponse =
            serde_json::from_value(serde_json::json!([item_json("nunca")])).unwrap();
        assert_eq!(bare.into_items().len(), 1);

        let wrapped: MaintenanceOverviewResponse = serde_json::from_value(
            serde_json::json!({"results": [item_json("proximos"), item_json("realizados")]}),
        )
        .unwrap();
        let items = wrapped.into_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].status, MaintenanceStatus::Realizados);
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let mut missing_status = item_json("nunca");
        missing_status.as_object_mut().unwrap().remove("status");

        let response: MaintenanceOverviewResponse = serde_json::from_value(serde_json::json!({
            "results": [item_json("pendiente"), missing_status, item_json("realizados")]
        }))
        .unwrap();

        let items = response.into_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].status, MaintenanceStatus::Realizados);
    }

    #[test]
    fn test_technician_falls_back_to_usuario() {
        let mut item: MaintenanceOverviewItem =
            serde_json::from_value(item_json("nunca")).unwrap();
        assert_eq!(item.technician(), Some("jperez"));

        item.tecnico_mantenimiento = Some("mgomez".to_string());
        assert_eq!(item.technician(), Some("mgomez"));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(MaintenanceStatus::parse("proximos"), Some(MaintenanceStatus::Proximos));
        assert_eq!(MaintenanceStatus::parse("pending"), None);
    }
}
