/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
[UPDATE]: 2026-10-02 Accept null tag/image lists and naive created_at stamps
*/

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::enums::{ContentType, HistoryStatus};

/// `publish_status` value the backend reports once the post is live
pub const PUBLISH_SUCCESS_MARKER: &str = "已成功发布";

/// Generated post as returned by generate-and-publish or stored in history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "serde_helpers::null_as_default")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_time: Option<String>,
}

impl ContentPayload {
    pub fn is_published(&self) -> bool {
        self.publish_status.as_deref() == Some(PUBLISH_SUCCESS_MARKER)
    }

    /// True when there is generated text worth showing
    pub fn has_content(&self) -> bool {
        self.title.as_deref().is_some_and(|t| !t.is_empty())
            || self.content.as_deref().is_some_and(|c| !c.is_empty())
    }
}

/// One persisted task from the backend history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default)]
    pub topic: String,
    #[serde(default = "default_history_status")]
    pub status: HistoryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: ContentPayload,
}

fn default_history_status() -> HistoryStatus {
    HistoryStatus::Other
}

impl HistoryRecord {
    /// Identity shared with live task cards; older records only carry `task_id`
    pub fn identity(&self) -> Option<&str> {
        self.id.as_deref().or(self.task_id.as_deref())
    }

    /// Recorded content type, if it is one this client understands
    pub fn content_type(&self) -> Option<ContentType> {
        self.content_type
            .as_deref()
            .and_then(|value| value.parse().ok())
    }

    pub fn is_failed(&self) -> bool {
        self.status.is_failed()
    }

    /// Creation time in the local time zone.
    ///
    /// RFC 3339 stamps are converted; naive stamps are taken as local time.
    pub fn created_at_local(&self) -> Option<DateTime<Local>> {
        let raw = self.created_at.as_deref()?.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Local));
        }
        const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
        NAIVE_FORMATS.iter().find_map(|format| {
            NaiveDateTime::parse_from_str(raw, format)
                .ok()
                .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        })
    }
}

/// Candidate topic returned by discovery endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSuggestion {
    pub title: String,
    #[serde(default)]
    pub summary: String,
}

/// Backend configuration as exposed by `/api/config`.
///
/// Secrets come back masked with `*`; unknown keys are kept so a load/save
/// cycle does not drop them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xhs_mcp_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jina_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tavily_api_key: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DashboardSettings {
    pub fn has_api_key(&self) -> bool {
        self.llm_api_key.as_deref().is_some_and(|key| !key.is_empty())
    }

    /// Masked secrets are placeholders and must not be sent back as values
    pub fn is_masked(value: &str) -> bool {
        value.contains('*')
    }

    /// Copy with empty and masked fields dropped, ready for a partial save
    pub fn without_placeholders(&self) -> Self {
        let keep = |value: &Option<String>| {
            value
                .as_ref()
                .filter(|v| !v.is_empty() && !Self::is_masked(v))
                .cloned()
        };
        Self {
            ai_platform: keep(&self.ai_platform),
            llm_api_key: keep(&self.llm_api_key),
            openai_base_url: keep(&self.openai_base_url),
            default_model: keep(&self.default_model),
            xhs_mcp_url: keep(&self.xhs_mcp_url),
            jina_api_key: keep(&self.jina_api_key),
            tavily_api_key: keep(&self.tavily_api_key),
            extra: self.extra.clone(),
        }
    }
}

mod serde_helpers {
    use serde::{Deserialize, Deserializer};

    pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}
