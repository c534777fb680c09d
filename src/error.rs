use thiserror::Error;

/// Why a venue's snapshot could not be produced. Never reaches the engine:
/// the aggregator turns it into an empty snapshot after logging it.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("HTTP request timed out")]
    HttpTimeout(reqwest::Error),

    #[error("HTTP response (status={status}) error: {body}")]
    HttpResponse {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Deserialising JSON error: {error} for payload: {payload}")]
    Deserialise {
        error: serde_json::Error,
        payload: String,
    },

    #[error("invalid {field} {value:?}: {reason}")]
    InvalidLevel {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        match error {
            error if error.is_timeout() => FetchError::HttpTimeout(error),
            error => FetchError::Http(error),
        }
    }
}

impl FetchError {
    // Short label for metrics and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Http(_) => "http",
            FetchError::HttpTimeout(_) => "timeout",
            FetchError::HttpResponse { .. } => "status",
            FetchError::Deserialise { .. } => "deserialise",
            FetchError::InvalidLevel { .. } => "invalid_level",
        }
    }
}

pub type FetchResult<T> = Result<T, FetchError>;
