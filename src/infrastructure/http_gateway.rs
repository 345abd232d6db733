// HTTP gateway implementation against the ITAM REST backend
use crate::application::dashboard_gateway::{DashboardGateway, GatewayError, GatewayResult};
use crate::domain::asset::{PagedAssetResult, SummaryMetrics, WarrantyDashboard};
use crate::domain::drill_down::DetailQuery;
use crate::domain::maintenance::{MaintenanceOverviewItem, MaintenanceOverviewResponse};
use crate::infrastructure::config::{ApiSettings, EndpointPaths};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpDashboardGateway {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    endpoints: EndpointPaths,
}

impl HttpDashboardGateway {
    pub fn new(settings: &ApiSettings) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
            endpoints: settings.endpoints.clone(),
        })
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn build_detail_url(&self, query: &DetailQuery) -> String {
        format!(
            "{}?category={}&ordering={}&page={}",
            self.build_url(&self.endpoints.dashboard_detail),
            urlencoding::encode(&query.category),
            urlencoding::encode(&query.ordering),
            query.page
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> GatewayResult<T> {
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl DashboardGateway for HttpDashboardGateway {
    async fn summary(&self) -> GatewayResult<SummaryMetrics> {
        self.get_json(&self.build_url(&self.endpoints.summary)).await
    }

    async fn dashboard_by_type(&self) -> GatewayResult<serde_json::Value> {
        self.get_json(&self.build_url(&self.endpoints.dashboard_by_type)).await
    }

    async fn dashboard_models(&self) -> GatewayResult<serde_json::Value> {
        self.get_json(&self.build_url(&self.endpoints.dashboard_models)).await
    }

    async fn dashboard_warranty(&self) -> GatewayResult<WarrantyDashboard> {
        self.get_json(&self.build_url(&self.endpoints.dashboard_warranty)).await
    }

    async fn maintenance_overview(&self) -> GatewayResult<Vec<MaintenanceOverviewItem>> {
        let response: MaintenanceOverviewResponse = self
            .get_json(&self.build_url(&self.endpoints.maintenance_overview))
            .await?;
        Ok(response.into_items())
    }

    async fn dashboard_detail(&self, query: &DetailQuery) -> GatewayResult<PagedAssetResult> {
        let url = self.build_detail_url(query);
        tracing::debug!("Requesting detail page: {}", url);
        self.get_json(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway(server: &MockServer, token: Option<&str>) -> HttpDashboardGateway {
        HttpDashboardGateway::new(&ApiSettings {
            base_url: format!("{}/", server.uri()),
            token: token.map(str::to_string),
            timeout_secs: 5,
            endpoints: EndpointPaths::default(),
        })
        .unwrap()
    }

    #[test]
    fn test_build_detail_url_encodes_values() {
        let gw = HttpDashboardGateway::new(&ApiSettings {
            base_url: "http://itam.local/".to_string(),
            token: None,
            timeout_secs: 5,
            endpoints: EndpointPaths::default(),
        })
        .unwrap();

        let url = gw.build_detail_url(&DetailQuery {
            category: "Garantía vencida".to_string(),
            ordering: "-serie".to_string(),
            page: 2,
        });
        assert_eq!(
            url,
            "http://itam.local/api/dashboard/detail/?category=Garant%C3%ADa%20vencida&ordering=-serie&page=2"
        );
    }

    #[tokio::test]
    async fn test_summary_with_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/assets/summary/"))
            .and(header("Authorization", "Bearer abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_assets": 3,
                "asset_types": [{"tipo_activo": "Laptop", "total_equipment": 3, "valid_warranty": 2}]
            })))
            .mount(&server)
            .await;

        let summary = gateway(&server, Some("abc")).summary().await.unwrap();
        assert_eq!(summary.total_assets, 3);
        assert_eq!(summary.asset_types[0].valid_warranty, 2);
    }

    #[tokio::test]
    async fn test_maintenance_accepts_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/maintenance/overview/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"id": 4, "status": "proximos", "region": "Sur"}]
            })))
            .mount(&server)
            .await;

        let items = gateway(&server, None).maintenance_overview().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].region.as_deref(), Some("Sur"));
    }

    #[tokio::test]
    async fn test_detail_sends_full_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dashboard/detail/"))
            .and(query_param("category", "Laptop"))
            .and(query_param("ordering", "-hostname"))
            .and(query_param("page", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "assets": [{"id": 10, "hostname": "lap-10"}],
                "pagination": {"page": 3, "page_size": 20, "total_count": 41, "total_pages": 3}
            })))
            .mount(&server)
            .await;

        let page = gateway(&server, None)
            .dashboard_detail(&DetailQuery {
                category: "Laptop".to_string(),
                ordering: "-hostname".to_string(),
                page: 3,
            })
            .await
            .unwrap();
        assert_eq!(page.assets[0].hostname.as_deref(), Some("lap-10"));
        assert!(!page.has_next_page());
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dashboard/warranty/"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = gateway(&server, None).dashboard_warranty().await.unwrap_err();
        match err {
            GatewayError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dashboard/models/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = gateway(&server, None).dashboard_models().await.unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }
}
