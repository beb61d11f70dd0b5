//! Fetch Error
//!
//! The only failure the views know about.

/// Result type for remote page requests
pub type FetchResult<T> = Result<T, FetchError>;

/// A page request failed: network error, non-OK status, or an
/// undecodable body. The views do not tell these apart; the message is
/// only for the log.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fetch failed: {}", self.message)
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FetchError::new(format!("HTTP {}", status.as_u16())),
            None => FetchError::new(err.to_string()),
        }
    }
}
