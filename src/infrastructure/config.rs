use crate::domain::carousel::CarouselSettings;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub api: ApiSettings,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub endpoints: EndpointPaths,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EndpointPaths {
    pub summary: String,
    pub dashboard_by_type: String,
    pub dashboard_models: String,
    pub dashboard_warranty: String,
    pub maintenance_overview: String,
    pub dashboard_detail: String,
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            summary: "/api/assets/summary/".to_string(),
            dashboard_by_type: "/api/dashboard/by-type/".to_string(),
            dashboard_models: "/api/dashboard/models/".to_string(),
            dashboard_warranty: "/api/dashboard/warranty/".to_string(),
            maintenance_overview: "/api/maintenance/overview/".to_string(),
            dashboard_detail: "/api/dashboard/detail/".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CarouselConfig {
    pub visible_cards: usize,
    pub advance_interval_ms: u64,
    pub resume_delay_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        let defaults = CarouselSettings::default();
        Self {
            visible_cards: defaults.visible,
            advance_interval_ms: defaults.advance_every.as_millis() as u64,
            resume_delay_ms: defaults.resume_after.as_millis() as u64,
        }
    }
}

impl CarouselConfig {
    pub fn settings(&self) -> CarouselSettings {
        CarouselSettings {
            visible: self.visible_cards.max(1),
            advance_every: Duration::from_millis(self.advance_interval_ms.max(1)),
            resume_after: Duration::from_millis(self.resume_delay_ms),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    15
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("ITAM")
        .separator("__")
        .try_parsing(true)
}

/// Reads `config/dashboard.*` when present, overridden by `ITAM__SECTION__KEY`
/// environment variables.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    build_dashboard_config(
        config::File::with_name("config/dashboard").required(false),
        environment(),
    )
}

fn build_dashboard_config<S>(file: S, env: config::Environment) -> anyhow::Result<DashboardConfig>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> DashboardConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = parse(
            r#"
            [api]
            base_url = "http://itam.local"
            "#,
        );

        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.api.token, None);
        assert_eq!(config.api.endpoints, EndpointPaths::default());
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.carousel.settings(), CarouselSettings::default());
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = config::File::from_str(
            r#"
            [api]
            base_url = "http://itam.local"
            timeout_secs = 15

            [carousel]
            advance_interval_ms = 5000
            "#,
            config::FileFormat::Toml,
        );
        let vars = config::Map::from([
            ("ITAM__API__BASE_URL".to_string(), "http://itam.prod".to_string()),
            ("ITAM__API__TIMEOUT_SECS".to_string(), "30".to_string()),
            ("ITAM__CAROUSEL__ADVANCE_INTERVAL_MS".to_string(), "2500".to_string()),
            ("OTHER__API__BASE_URL".to_string(), "http://ignored".to_string()),
        ]);

        let config = build_dashboard_config(file, environment().source(Some(vars))).unwrap();

        assert_eq!(config.api.base_url, "http://itam.prod");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.carousel.settings().advance_every, Duration::from_millis(2_500));
        assert_eq!(config.carousel.resume_delay_ms, 10_000);
    }

    #[test]
    fn test_overrides() {
        let config = parse(
            r#"
            [api]
            base_url = "http://itam.local"
            token = "secret"

            [api.endpoints]
            summary = "/v2/summary/"

            [carousel]
            visible_cards = 4
            resume_delay_ms = 3000
            "#,
        );

        assert_eq!(config.api.token.as_deref(), Some("secret"));
        assert_eq!(config.api.endpoints.summary, "/v2/summary/");
        assert_eq!(config.api.endpoints.dashboard_detail, "/api/dashboard/detail/");

        let settings = config.carousel.settings();
        assert_eq!(settings.visible, 4);
        assert_eq!(settings.advance_every, Duration::from_millis(5_000));
        assert_eq!(settings.resume_after, Duration::from_millis(3_000));
    }
}
