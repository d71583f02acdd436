use serde::Serialize;
use thiserror::Error;

use super::ResultValue;

/// Why a fetch did not produce a usable body.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a status outside the 2xx range.
    #[error("request returned status {status}")]
    Status { status: u16, body: String },

    /// The request never completed at the network layer.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The target could not be turned into an absolute URL.
    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Transport failure without an underlying `reqwest` error (scripted fetchers).
    #[error("transport error: {0}")]
    Unreachable(String),
}

impl FetchError {
    pub fn is_status(&self) -> bool {
        matches!(self, FetchError::Status { .. })
    }
}

/// The settled result of the one request made per invocation.
#[derive(Debug)]
pub enum FetchOutcome {
    Completed(String),
    Failed(FetchError),
}

impl FetchOutcome {
    pub fn value(&self) -> ResultValue {
        match self {
            FetchOutcome::Completed(body) => ResultValue::from_body(body),
            FetchOutcome::Failed(_) => ResultValue::Error,
        }
    }

    /// Serializable view of the outcome for reports.
    pub fn summary(&self) -> OutcomeSummary {
        match self {
            FetchOutcome::Completed(body) => OutcomeSummary::Completed { body: body.clone() },
            FetchOutcome::Failed(e) => OutcomeSummary::Failed {
                error: e.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutcomeSummary {
    Completed { body: String },
    Failed { error: String },
}
