/*
[INPUT]:  Raw HTTP status + JSON bodies from the creator backend
[OUTPUT]: Typed response envelopes and the tagged generate outcome
[POS]:    Data layer - wire decoding at the API boundary
[UPDATE]: When API schema changes or new types added
[UPDATE]: 2026-09-28 Decode generate replies once into GenerateOutcome
*/

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::models::ContentPayload;
use crate::http::{DashboardError, Result};

const GENERATE_FAILED_MESSAGE: &str = "Generation failed";
const PUBLISH_FAILED_MESSAGE: &str = "Publish failed";

/// HTTP status plus parsed JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiEnvelope {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiEnvelope {
    /// Transport and payload both report success
    pub fn is_ok(&self) -> bool {
        self.status.is_success() && self.body.get("success").and_then(Value::as_bool) == Some(true)
    }

    /// Error reported by the backend in `error`, falling back to `detail`
    pub fn error_detail(&self) -> Option<ErrorDetail> {
        ["error", "detail"]
            .iter()
            .filter_map(|key| self.body.get(*key))
            .find_map(ErrorDetail::from_value)
    }

    /// Payload, read from `data` when the deployment nests it there
    pub fn data<T: DeserializeOwned>(&self) -> Result<T> {
        let source = match self.body.get("data") {
            Some(data) if data.is_object() || data.is_array() => data,
            _ => &self.body,
        };
        Ok(serde_json::from_value(source.clone())?)
    }

    /// Named field of the body, defaulting when absent or null
    pub fn field<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        match self.body.get(key) {
            Some(Value::Null) | None => Ok(T::default()),
            Some(value) => Ok(serde_json::from_value(value.clone())?),
        }
    }

    pub fn into_ack(self) -> Ack {
        let success = self.is_ok();
        let message = if success {
            self.body
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
        } else {
            self.error_detail().map(|detail| detail.message())
        };
        Ack { success, message }
    }

    /// Error for endpoints where anything but success is unusable
    pub fn into_error(self) -> DashboardError {
        let message = self
            .error_detail()
            .map(|detail| detail.message())
            .unwrap_or_else(|| format!("request failed with status {}", self.status));
        DashboardError::api_error(self.status, message)
    }
}

/// Success flag plus the backend's message for simple command endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub success: bool,
    pub message: Option<String>,
}

/// Error payload; FastAPI validation errors arrive as structured objects
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDetail {
    Text(String),
    Structured(Value),
}

impl ErrorDetail {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(text) if text.is_empty() => None,
            Value::String(text) => Some(ErrorDetail::Text(text.clone())),
            other => Some(ErrorDetail::Structured(other.clone())),
        }
    }

    /// Display text; structured errors are pretty-printed JSON
    pub fn message(&self) -> String {
        match self {
            ErrorDetail::Text(text) => text.clone(),
            ErrorDetail::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, ErrorDetail::Structured(_))
    }
}

/// Result of a generate-and-publish call, decoded once from the wire
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateOutcome {
    /// Content generated and published
    Success(ContentPayload),
    /// Content generated but publishing failed; the payload is still usable
    PartialFailure {
        payload: ContentPayload,
        reason: String,
    },
    /// Nothing usable was produced
    Failure(ErrorDetail),
}

impl GenerateOutcome {
    pub fn from_envelope(envelope: &ApiEnvelope) -> Result<Self> {
        if !envelope.is_ok() {
            let detail = envelope
                .error_detail()
                .unwrap_or_else(|| ErrorDetail::Text(GENERATE_FAILED_MESSAGE.to_string()));
            return Ok(GenerateOutcome::Failure(detail));
        }

        let payload: ContentPayload = envelope.data()?;
        if payload.is_published() {
            return Ok(GenerateOutcome::Success(payload));
        }

        let reason = match payload.publish_status.as_deref() {
            Some(status) if !status.is_empty() => status.to_string(),
            _ => PUBLISH_FAILED_MESSAGE.to_string(),
        };
        Ok(GenerateOutcome::PartialFailure { payload, reason })
    }

    pub fn payload(&self) -> Option<&ContentPayload> {
        match self {
            GenerateOutcome::Success(payload) => Some(payload),
            GenerateOutcome::PartialFailure { payload, .. } => Some(payload),
            GenerateOutcome::Failure(_) => None,
        }
    }
}
