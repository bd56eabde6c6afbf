/*
[INPUT]:  Backend configuration, platform choice, credentials to validate
[OUTPUT]: Updated settings forms; save and validation results with toasts
[POS]:    Domain layer - model provider configuration
[UPDATE]: When platforms or configuration fields change
*/

use creator_dashboard_adapter::{DashboardSettings, ValidateModelRequest};
use tracing::{info, warn};

use crate::controller::TaskController;
use crate::error::{ControllerError, Result};
use crate::render::ToastLevel;

/// Endpoint and model a platform starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformDefaults {
    pub platform: &'static str,
    pub base_url: &'static str,
    pub model: &'static str,
}

pub const PLATFORM_DEFAULTS: [PlatformDefaults; 6] = [
    PlatformDefaults {
        platform: "openai",
        base_url: "https://api.openai.com/v1",
        model: "gpt-4o",
    },
    PlatformDefaults {
        platform: "claude",
        base_url: "https://api.anthropic.com/v1",
        model: "claude-3-5-sonnet-20240620",
    },
    PlatformDefaults {
        platform: "gemini",
        base_url: "https://generativelanguage.googleapis.com/v1",
        model: "gemini-pro",
    },
    PlatformDefaults {
        platform: "tongyi",
        base_url: "https://dashscope.aliyuncs.com/compatible-mode/v1",
        model: "qwen-plus",
    },
    PlatformDefaults {
        platform: "wenxin",
        base_url: "https://aip.baidubce.com/rpc/2.0/ai_custom/v1/wenxinworkshop/chat",
        model: "ernie-3.5-8k",
    },
    PlatformDefaults {
        platform: "doubao",
        base_url: "https://ark.cn-beijing.volces.com/api/v3",
        model: "doubao-seed-1-8-251228",
    },
];

pub fn platform_defaults(platform: &str) -> Option<&'static PlatformDefaults> {
    let platform = platform.trim();
    PLATFORM_DEFAULTS
        .iter()
        .find(|defaults| defaults.platform.eq_ignore_ascii_case(platform))
}

fn is_default_model(model: &str) -> bool {
    PLATFORM_DEFAULTS.iter().any(|defaults| defaults.model == model)
}

/// Result of switching platforms in the settings form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformChange {
    /// Base URL and model both set to the platform defaults
    Defaults,
    /// Base URL updated; a custom model name was kept
    KeptModel,
    UnknownPlatform,
}

/// Point `settings` at `platform`.
///
/// The model is only replaced while it is empty or still some platform's
/// default, so a hand-entered model name survives a platform switch.
pub fn apply_platform(settings: &mut DashboardSettings, platform: &str) -> PlatformChange {
    let Some(defaults) = platform_defaults(platform) else {
        return PlatformChange::UnknownPlatform;
    };
    settings.ai_platform = Some(defaults.platform.to_string());
    settings.openai_base_url = Some(defaults.base_url.to_string());

    let model = settings.default_model.as_deref().map(str::trim).unwrap_or_default();
    if model.is_empty() || is_default_model(model) {
        settings.default_model = Some(defaults.model.to_string());
        PlatformChange::Defaults
    } else {
        PlatformChange::KeptModel
    }
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ControllerError::IncompleteSettings(field))
}

/// Validation request from the form; masked keys cannot be validated
pub fn validation_request(settings: &DashboardSettings) -> Result<ValidateModelRequest> {
    let api_key = required(&settings.llm_api_key, "llm_api_key")?;
    if DashboardSettings::is_masked(api_key) {
        return Err(ControllerError::IncompleteSettings("llm_api_key"));
    }
    Ok(ValidateModelRequest {
        llm_api_key: api_key.to_string(),
        openai_base_url: required(&settings.openai_base_url, "openai_base_url")?.to_string(),
        model_name: required(&settings.default_model, "default_model")?.to_string(),
    })
}

impl TaskController {
    pub async fn load_settings(&self) -> Result<DashboardSettings> {
        let settings = self.backend().load_settings().await.inspect_err(|err| {
            warn!(error = %err, "failed to load settings");
        })?;
        info!(
            platform = settings.ai_platform.as_deref().unwrap_or("-"),
            api_key_set = settings.has_api_key(),
            "settings loaded"
        );
        Ok(settings)
    }

    /// Save the form; empty and masked fields are left unchanged on the backend
    pub async fn save_settings(&self, settings: &DashboardSettings) -> Result<bool> {
        match self.backend().save_settings(settings).await {
            Ok(ack) if ack.success => {
                info!("settings saved");
                self.surface().show_toast("Settings saved", ToastLevel::Success);
                Ok(true)
            }
            Ok(ack) => {
                warn!(reason = ack.message.as_deref().unwrap_or("-"), "settings save rejected");
                self.surface().show_toast("Save failed", ToastLevel::Error);
                Ok(false)
            }
            Err(err) => {
                warn!(error = %err, "settings save request failed");
                self.surface().show_toast("Save failed", ToastLevel::Error);
                Err(err.into())
            }
        }
    }

    /// Ask the backend whether the configured model answers
    pub async fn validate_model(&self, settings: &DashboardSettings) -> Result<bool> {
        let request = validation_request(settings)?;
        match self.backend().validate_model(&request).await {
            Ok(ack) if ack.success => {
                info!(model = %request.model_name, "model available");
                self.surface().show_toast("Model available", ToastLevel::Success);
                Ok(true)
            }
            Ok(ack) => {
                let reason = ack.message.unwrap_or_else(|| "Model unavailable".to_string());
                warn!(model = %request.model_name, reason = %reason, "model unavailable");
                self.surface()
                    .show_toast(&format!("Model unavailable: {reason}"), ToastLevel::Error);
                Ok(false)
            }
            Err(err) => {
                warn!(error = %err, "model validation request failed");
                self.surface()
                    .show_toast("Error while validating model", ToastLevel::Error);
                Err(err.into())
            }
        }
    }
}
