//! Errors produced while computing a premium.
//!
//! Neither variant is fatal: the monitor skips the affected symbol for the
//! current tick and on-demand callers render the message to the user.

use thiserror::Error;

use super::quote::Source;
use super::symbol::Symbol;
use crate::error::MarketDataError;

/// Reasons a premium could not be computed for a symbol.
#[derive(Error, Debug, Clone)]
pub enum PremiumError {
    /// No static mapping and no search hit for the symbol.
    #[error("no reference market found for {symbol}")]
    Unresolvable {
        /// The symbol that could not be mapped.
        symbol: Symbol,
    },

    /// A required upstream call failed or returned an unexpected shape.
    #[error("{upstream} unavailable: {reason}")]
    UpstreamUnavailable {
        /// The upstream that failed.
        upstream: Source,
        /// Transport or decode failure detail.
        reason: String,
    },
}

impl PremiumError {
    #[must_use]
    pub fn is_unresolvable(&self) -> bool {
        matches!(self, Self::Unresolvable { .. })
    }
}

impl From<MarketDataError> for PremiumError {
    fn from(err: MarketDataError) -> Self {
        match err {
            MarketDataError::UpstreamUnavailable { upstream, reason } => {
                Self::UpstreamUnavailable { upstream, reason }
            }
        }
    }
}
