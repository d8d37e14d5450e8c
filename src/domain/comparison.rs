//! Price gap between the two domestic exchanges.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::quote::Source;
use super::symbol::Symbol;

/// Upbit vs Bithumb KRW price for one coin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeComparison {
    pub symbol: Symbol,
    pub upbit_price: Decimal,
    pub bithumb_price: Decimal,
    /// `upbit - bithumb` in KRW.
    pub diff: Decimal,
    /// `diff / bithumb * 100`.
    pub diff_pct: Decimal,
    pub compared_at: DateTime<Utc>,
}

impl ExchangeComparison {
    /// Returns `None` when the Bithumb price is not positive or the gap
    /// cannot be represented.
    #[must_use]
    pub fn new(
        symbol: Symbol,
        upbit_price: Decimal,
        bithumb_price: Decimal,
        compared_at: DateTime<Utc>,
    ) -> Option<Self> {
        if bithumb_price <= Decimal::ZERO {
            return None;
        }
        let diff = upbit_price.checked_sub(bithumb_price)?;
        let diff_pct = diff
            .checked_div(bithumb_price)?
            .checked_mul(Decimal::ONE_HUNDRED)?;
        Some(Self {
            symbol,
            upbit_price,
            bithumb_price,
            diff,
            diff_pct,
            compared_at,
        })
    }

    /// Venue with the lower price. Ties go to Upbit.
    #[must_use]
    pub fn cheaper(&self) -> Source {
        if self.diff > Decimal::ZERO {
            Source::Bithumb
        } else {
            Source::Upbit
        }
    }
}
