use thiserror::Error;

/// Any failure talking to the collection store. Transport, HTTP status,
/// decoding and not-found failures share this one type.
#[derive(Debug, Clone, Error)]
#[error("store request failed: {message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(value: reqwest::Error) -> Self {
        Self::new(value.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::new(format!("malformed store payload: {value}"))
    }
}

impl From<url::ParseError> for StoreError {
    fn from(value: url::ParseError) -> Self {
        Self::new(format!("invalid store url: {value}"))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
