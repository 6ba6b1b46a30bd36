use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("title is required")]
    MissingTitle,
    #[error("why is required")]
    MissingWhy,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}' (expected Health, Wealth, Tech or Growth)")]
pub struct UnknownCategory(pub String);

/// Error payload returned by the remote collection store on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl RemoteErrorBody {
    pub fn summary(&self) -> String {
        match (&self.code, &self.details) {
            (Some(code), Some(details)) => format!("{} ({code}): {details}", self.message),
            (Some(code), None) => format!("{} ({code})", self.message),
            (None, Some(details)) => format!("{}: {details}", self.message),
            (None, None) => self.message.clone(),
        }
    }
}
