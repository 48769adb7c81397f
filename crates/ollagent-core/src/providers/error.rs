//! Provider error types

use thiserror::Error;

/// Errors that can occur while talking to the chat backend
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Backend could not be reached at all
    #[error("{provider} is unreachable at {url}")]
    Unreachable { provider: String, url: String },

    /// Backend did not answer within the request timeout
    #[error("{provider} did not respond within {seconds}s at {url}")]
    Timeout {
        provider: String,
        url: String,
        seconds: u64,
    },

    /// API request failed
    #[error("{provider} API error ({status}): {message}")]
    ApiError {
        provider: String,
        status: u16,
        message: String,
    },

    /// Network/HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid response from provider
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse { provider: String, message: String },

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// Create an unreachable error
    pub fn unreachable(provider: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Unreachable {
            provider: provider.into(),
            url: url.into(),
        }
    }

    /// Create an API error
    pub fn api_error(provider: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            provider: provider.into(),
            status,
            message: message.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Whether the backend could not be contacted (as opposed to answering badly)
    pub fn is_unreachable(&self) -> bool {
        match self {
            Self::Unreachable { .. } => true,
            Self::Http(e) => e.is_connect(),
            _ => false,
        }
    }

    /// Whether the call failed on the network (down or too slow) rather than with a reply
    pub fn is_network_failure(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Http(e) => e.is_connect() || e.is_timeout(),
            _ => self.is_unreachable(),
        }
    }

    /// URL of the backend that could not be reached, when known
    pub fn backend_url(&self) -> Option<&str> {
        match self {
            Self::Unreachable { url, .. } | Self::Timeout { url, .. } => Some(url),
            _ => None,
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
