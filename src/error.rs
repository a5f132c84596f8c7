use thiserror::Error;

use crate::models::RightType;

/// Rejected user input. Surfaced to the caller, nothing is stored.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("symbol is required")]
    MissingSymbol,

    #[error("{0} alerts need a value")]
    MissingRightValue(RightType),

    #[error("{0} alerts need a finite value")]
    NonFiniteRightValue(RightType),

    #[error("invalid time '{0}', expected HH:MM")]
    BadTime(String),

    #[error("window start {start} must be before end {end}")]
    EmptyWindow { start: String, end: String },

    #[error("unknown intensity '{0}'")]
    UnknownIntensity(String),
}

/// Upstream snapshot source failures. The tick is skipped, the next one retries.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("snapshot feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("snapshot feed returned {status}: {body}")]
    Status { status: u16, body: String },
}
