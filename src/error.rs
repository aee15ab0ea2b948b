use std::fmt;
use thiserror::Error;

/// Any failed call to the bank API collapses into this one value. Callers
/// only branch on success or failure; `kind` exists so log lines and error
/// envelopes can say what actually went wrong.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind} for {url}: {message}")]
pub struct FetchError {
    pub kind: FetchKind,
    pub url: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Status,
    Connect,
    Timeout,
    InvalidUrl,
    Decode,
    Other,
}

impl fmt::Display for FetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FetchKind::Status => "error status",
            FetchKind::Connect => "connection error",
            FetchKind::Timeout => "timeout",
            FetchKind::InvalidUrl => "invalid URL",
            FetchKind::Decode => "malformed response",
            FetchKind::Other => "request failed",
        };
        f.write_str(text)
    }
}

impl FetchError {
    pub fn status(url: &str, status: reqwest::StatusCode) -> Self {
        Self {
            kind: FetchKind::Status,
            url: url.to_string(),
            message: format!("HTTP {}", status),
        }
    }

    pub fn decode(url: &str, message: impl Into<String>) -> Self {
        Self {
            kind: FetchKind::Decode,
            url: url.to_string(),
            message: message.into(),
        }
    }

    /// Classifies a transport-level reqwest failure (send or body decode).
    pub fn transport(url: &str, err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            FetchKind::Timeout
        } else if err.is_connect() {
            FetchKind::Connect
        } else if err.is_builder() {
            FetchKind::InvalidUrl
        } else if err.is_decode() {
            FetchKind::Decode
        } else {
            FetchKind::Other
        };
        Self {
            kind,
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

/// Rejects history batches deeper than the archive ceiling before any
/// request is issued.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot fetch exchange rates for more than the last {max} days (requested {requested})")]
pub struct DayLimitExceeded {
    pub requested: u32,
    pub max: u32,
}
