use thiserror::Error;

use crate::domain::error::PremiumError;
use crate::domain::quote::Source;
use crate::domain::symbol::Symbol;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failure of a single upstream market data call.
///
/// Covers transport errors, non-success statuses and payloads that do not
/// match the expected schema. The gateway never retries; callers decide.
#[derive(Error, Debug, Clone)]
pub enum MarketDataError {
    #[error("{upstream} unavailable: {reason}")]
    UpstreamUnavailable { upstream: Source, reason: String },
}

impl MarketDataError {
    pub fn unavailable(upstream: Source, reason: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            upstream,
            reason: reason.into(),
        }
    }

    /// The upstream that failed.
    #[must_use]
    pub fn upstream(&self) -> Source {
        match self {
            Self::UpstreamUnavailable { upstream, .. } => *upstream,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Premium(#[from] PremiumError),

    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    #[error("'{symbol}' is not a valid coin symbol")]
    InvalidSymbol { symbol: Symbol },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
