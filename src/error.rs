//! Error types for the Hank's Tank MLB client

use thiserror::Error;

#[cfg(test)]
mod tests;

pub type Result<T> = std::result::Result<T, HanksTankError>;

/// Failure of a single outbound request.
///
/// Cloneable so every caller awaiting a de-duplicated request receives the
/// same error. Each variant carries the URL that failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Resource not found: {url}")]
    NotFound { url: String },

    #[error("Rate limit exceeded. Please try again later. ({url})")]
    RateLimited { url: String },

    #[error("Server error ({status}). Please try again later. ({url})")]
    Server { status: u16, url: String },

    #[error("HTTP {status}: {reason} ({url})")]
    Status {
        status: u16,
        reason: String,
        url: String,
    },

    #[error("Request timed out: {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Request cancelled: {url}")]
    Cancelled { url: String },
}

impl ApiError {
    /// Map a non-success HTTP status to the matching error.
    pub fn from_status(status: reqwest::StatusCode, url: impl Into<String>) -> Self {
        let url = url.into();
        match status.as_u16() {
            404 => Self::NotFound { url },
            429 => Self::RateLimited { url },
            code @ 500..=599 => Self::Server { status: code, url },
            code => Self::Status {
                status: code,
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                url,
            },
        }
    }

    /// Classify a transport-level reqwest failure.
    pub fn from_reqwest(err: &reqwest::Error, url: impl Into<String>) -> Self {
        let url = url.into();
        if err.is_timeout() {
            Self::Timeout { url }
        } else if err.is_decode() {
            Self::Decode {
                url,
                message: err.to_string(),
            }
        } else if let Some(status) = err.status() {
            Self::from_status(status, url)
        } else {
            Self::Network {
                url,
                message: err.to_string(),
            }
        }
    }

    /// Timeouts, 5xx and generic network failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Server { .. } | Self::Timeout { .. } | Self::Network { .. }
        )
    }

    pub fn url(&self) -> &str {
        match self {
            Self::NotFound { url }
            | Self::RateLimited { url }
            | Self::Server { url, .. }
            | Self::Status { url, .. }
            | Self::Timeout { url }
            | Self::Network { url, .. }
            | Self::Decode { url, .. }
            | Self::Cancelled { url } => url,
        }
    }
}

#[derive(Error, Debug)]
pub enum HanksTankError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Season {season} is outside the supported range {min}-{max}")]
    InvalidSeason { season: u16, min: u16, max: u16 },

    #[error("Invalid number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Team not found: {name}")]
    TeamNotFound { name: String },

    #[error("Player not found: {name}")]
    PlayerNotFound { name: String },

    #[error("API returned no data")]
    NoData,
}

impl HanksTankError {
    /// The request-level error, if this failure came from the HTTP client.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}
