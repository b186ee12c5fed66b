//! Shared error type for cloud calls and store access

use thiserror::Error;

/// Errors produced by cloud-operation clients and the local mirror.
#[derive(Error, Debug)]
pub enum CloudError {
    /// A vendor API call failed. `body` carries the provider's structured
    /// response when one was available.
    #[error("cloud api error: {message}")]
    Api {
        message: String,
        body: Option<serde_json::Value>,
    },

    #[error("store error: {0}")]
    Store(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CloudError {
    /// Build an API error with only a message.
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
            body: None,
        }
    }

    /// Build an API error carrying the provider's structured response body.
    pub fn api_with_body(message: impl Into<String>, body: serde_json::Value) -> Self {
        Self::Api {
            message: message.into(),
            body: Some(body),
        }
    }

    /// Text to persist as a sync failure reason. A structured provider
    /// response is serialized as JSON; everything else stores its display
    /// form.
    pub fn failure_reason(&self) -> String {
        match self {
            Self::Api {
                message,
                body: Some(body),
            } => serde_json::json!({ "message": message, "body": body }).to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
