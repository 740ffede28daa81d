// src/error/mod.rs

use std::time::Duration;
use thiserror::Error;

/// A failed call to a collaborator agent. Every variant is treated as
/// transient and retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("agent returned HTTP {status}")]
    Status { status: u16 },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("agent rejected request: {0}")]
    Rejected(String),
}

impl ServiceError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        ServiceError::MalformedPayload(reason.into())
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ServiceError::MalformedPayload(err.to_string());
        }
        match err.status() {
            Some(status) => ServiceError::Status {
                status: status.as_u16(),
            },
            None => ServiceError::Network(err.to_string()),
        }
    }
}

/// Why a stage of a trip did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    /// The last failure is kept exactly as the collaborator produced it.
    #[error("gave up after {attempts} attempt(s): {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: ServiceError,
    },

    #[error("timed out after {0:?}")]
    TimedOut(Duration),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid(key: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            key,
            value: value.into(),
            reason: reason.into(),
        }
    }
}
