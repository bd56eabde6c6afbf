/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of post the backend generates for a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    #[default]
    General,
    PaperAnalysis,
}

impl ContentType {
    pub const ALL: [ContentType; 2] = [ContentType::General, ContentType::PaperAnalysis];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::General => "general",
            ContentType::PaperAnalysis => "paper_analysis",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(ContentType::General),
            "paper_analysis" | "paper-analysis" => Ok(ContentType::PaperAnalysis),
            other => Err(format!(
                "unknown content type '{other}' (expected general or paper_analysis)"
            )),
        }
    }
}

/// Status stored on a history record by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryStatus {
    Success,
    Error,
    #[serde(other)]
    Other,
}

impl HistoryStatus {
    pub fn is_failed(self) -> bool {
        self == HistoryStatus::Error
    }
}
