/*
[INPUT]:  YAML configuration file, CREATOR_DASHBOARD__* environment overrides
[OUTPUT]: Parsed dashboard configuration and a configured backend client
[POS]:    Configuration layer - backend endpoint and controller timings
[UPDATE]: When adding new configuration options
[UPDATE]: 2026-10-06 Layer environment overrides over the YAML file
*/

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use creator_dashboard_adapter::{ClientConfig, ContentType, CreatorClient};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "CREATOR_DASHBOARD";
pub const DEFAULT_HISTORY_LIMIT: u32 = 100;

/// Top-level configuration for the dashboard client
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DashboardConfig {
    /// Backend endpoint settings
    #[serde(default)]
    pub backend: BackendConfig,
    /// Task lifecycle timings
    #[serde(default)]
    pub controller: ControllerConfig,
    /// Records requested when loading history
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,
}

/// Backend connection configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the content backend (e.g., "http://127.0.0.1:8083")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Total request timeout; unset by default because generation can run for minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: None,
        }
    }
}

/// Task lifecycle configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ControllerConfig {
    /// Delay between simulated progress milestones
    #[serde(default = "default_progress_step_ms")]
    pub progress_step_ms: u64,
    /// Delay before the result view opens after a terminal response
    #[serde(default = "default_result_delay_ms")]
    pub result_delay_ms: u64,
    /// Delay before each launch in batch and group retries
    #[serde(default = "default_batch_throttle_ms")]
    pub batch_throttle_ms: u64,
    /// Cancel the request of a card replaced by a newer one
    #[serde(default)]
    pub cancel_superseded: bool,
    /// Composer content type at startup
    #[serde(default)]
    pub default_content_type: ContentType,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            progress_step_ms: default_progress_step_ms(),
            result_delay_ms: default_result_delay_ms(),
            batch_throttle_ms: default_batch_throttle_ms(),
            cancel_superseded: false,
            default_content_type: ContentType::default(),
        }
    }
}

impl ControllerConfig {
    pub fn progress_step(&self) -> Duration {
        Duration::from_millis(self.progress_step_ms)
    }

    pub fn result_delay(&self) -> Duration {
        Duration::from_millis(self.result_delay_ms)
    }

    pub fn batch_throttle(&self) -> Duration {
        Duration::from_millis(self.batch_throttle_ms)
    }
}

fn default_base_url() -> String {
    creator_dashboard_adapter::http::client::DEFAULT_BASE_URL.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_progress_step_ms() -> u64 {
    1000
}

fn default_result_delay_ms() -> u64 {
    1000
}

fn default_batch_throttle_ms() -> u64 {
    300
}

fn default_history_limit() -> u32 {
    DEFAULT_HISTORY_LIMIT
}

impl DashboardConfig {
    /// Defaults, then the YAML file when given, then `CREATOR_DASHBOARD__*` variables
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Yaml)
                    .required(true),
            );
        }
        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("read configuration sources")?;
        settings
            .try_deserialize()
            .context("parse dashboard configuration")
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        serde_yaml::to_string(self).context("failed to serialize config to YAML")
    }

    /// Check values the client cannot work without
    pub fn validate(&self) -> anyhow::Result<()> {
        self.build_client()
            .with_context(|| format!("invalid backend.base_url: {}", self.backend.base_url))?;
        anyhow::ensure!(self.history_limit > 0, "history_limit must be positive");
        anyhow::ensure!(
            self.controller.progress_step_ms > 0,
            "controller.progress_step_ms must be positive"
        );
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            connect_timeout: Duration::from_secs(self.backend.connect_timeout_secs),
            request_timeout: self.backend.request_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn build_client(&self) -> anyhow::Result<CreatorClient> {
        CreatorClient::with_config_and_base_url(self.client_config(), &self.backend.base_url)
            .context("build backend client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_dashboard_timings() {
        let config = DashboardConfig::default();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:8083");
        assert_eq!(config.controller.progress_step(), Duration::from_secs(1));
        assert_eq!(config.controller.result_delay(), Duration::from_secs(1));
        assert_eq!(config.controller.batch_throttle(), Duration::from_millis(300));
        assert!(!config.controller.cancel_superseded);
        assert_eq!(config.history_limit, 100);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = r#"
backend:
  base_url: "http://dashboard.local:9000"
controller:
  batch_throttle_ms: 50
  default_content_type: paper_analysis
"#;
        let config: DashboardConfig = serde_yaml::from_str(yaml).expect("parse yaml");
        assert_eq!(config.backend.base_url, "http://dashboard.local:9000");
        assert_eq!(config.backend.connect_timeout_secs, 10);
        assert_eq!(config.controller.batch_throttle_ms, 50);
        assert_eq!(config.controller.progress_step_ms, 1000);
        assert_eq!(
            config.controller.default_content_type,
            ContentType::PaperAnalysis
        );
    }

    #[test]
    fn test_load_reads_yaml_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "history_limit: 20\ncontroller:\n  cancel_superseded: true")
            .expect("write yaml");

        let config = DashboardConfig::load(Some(file.path())).expect("load config");
        assert_eq!(config.history_limit, 20);
        assert!(config.controller.cancel_superseded);
        assert_eq!(config.backend, BackendConfig::default());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = DashboardConfig::load(Some(Path::new("/nonexistent/dashboard.yaml")));
        assert!(err.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = DashboardConfig::default();
        config.backend.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_roundtrip_keeps_values() {
        let mut config = DashboardConfig::default();
        config.controller.result_delay_ms = 250;
        let yaml = config.to_yaml().expect("to yaml");
        let parsed: DashboardConfig = serde_yaml::from_str(&yaml).expect("parse yaml");
        assert_eq!(parsed, config);
    }
}
