use crate::application::dashboard_controller::ControllerSettings;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub backend: BackendSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub url: String,
    #[serde(default = "default_model")]
    pub model: String,
    pub session_id: Option<String>,
    pub request_timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardSettings {
    /// Unset means fetches never time out.
    pub fetch_timeout_ms: Option<u64>,
    /// Reporting window sent to the backend; unset uses the backend default.
    pub date_range_days: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_model() -> String {
    "hospital.dashboard".to_string()
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl BackendSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

impl DashboardSettings {
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            fetch_timeout: self.fetch_timeout_ms.map(Duration::from_millis),
        }
    }
}

/// Reads `config/dashboard.{toml,...}`, then `DASHBOARD__SECTION__KEY` overrides.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_app_config(toml: &str) -> anyhow::Result<AppConfig> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    #[test]
    fn test_defaults() {
        let config = parse_app_config(
            r#"
            [backend]
            url = "http://odoo.local:8069"
            "#,
        )
        .unwrap();

        assert_eq!(config.backend.model, "hospital.dashboard");
        assert_eq!(config.backend.request_timeout(), None);
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.dashboard.controller_settings().fetch_timeout, None);
        assert_eq!(config.dashboard.date_range_days, None);
    }

    #[test]
    fn test_full_config() {
        let config = parse_app_config(
            r#"
            [backend]
            url = "http://odoo.local:8069"
            model = "clinic.dashboard"
            session_id = "abc123"
            request_timeout_ms = 3000

            [dashboard]
            fetch_timeout_ms = 10000
            date_range_days = 90

            [server]
            bind = "127.0.0.1:9000"
            "#,
        )
        .unwrap();

        assert_eq!(config.backend.model, "clinic.dashboard");
        assert_eq!(config.backend.session_id.as_deref(), Some("abc123"));
        assert_eq!(config.backend.request_timeout(), Some(Duration::from_secs(3)));
        assert_eq!(
            config.dashboard.controller_settings().fetch_timeout,
            Some(Duration::from_secs(10))
        );
        assert_eq!(config.dashboard.date_range_days, Some(90));
        assert_eq!(config.server.bind, "127.0.0.1:9000");
    }

    #[test]
    fn test_backend_url_required() {
        assert!(parse_app_config("[dashboard]\nfetch_timeout_ms = 5").is_err());
    }
}
