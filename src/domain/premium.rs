//! Kimchi premium: the gap between the domestic KRW price of a coin and its
//! global USD price converted at the prevailing USD/KRW rate.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::symbol::Symbol;

/// USD/KRW rate used when the FX source cannot be reached.
pub const DEFAULT_USD_KRW: Decimal = dec!(1350);

/// A USD/KRW rate and whether it came from the fallback constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FxRate {
    pub rate: Decimal,
    pub fallback: bool,
}

impl FxRate {
    #[must_use]
    pub const fn live(rate: Decimal) -> Self {
        Self {
            rate,
            fallback: false,
        }
    }

    #[must_use]
    pub const fn fallback(rate: Decimal) -> Self {
        Self {
            rate,
            fallback: true,
        }
    }
}

/// Signed premium percentage of `domestic` over `converted`.
///
/// Returns `None` when the converted price is not positive or the ratio
/// leaves the range of [`Decimal`]. No rounding.
#[must_use]
pub fn premium_pct(domestic: Decimal, converted: Decimal) -> Option<Decimal> {
    if converted <= Decimal::ZERO {
        return None;
    }
    domestic
        .checked_sub(converted)?
        .checked_div(converted)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// Headline marker for a premium: hot above 3%, cold below -1%.
#[must_use]
pub fn premium_emoji(pct: Decimal) -> &'static str {
    if pct > dec!(3) {
        "🌶️"
    } else if pct < dec!(-1) {
        "🔵"
    } else {
        "⚖️"
    }
}

/// Human-readable band of a premium. Labeling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PremiumBand {
    /// Above 5%: domestic market strongly overpriced.
    StrongPremium,
    /// Above 2% up to 5%.
    MildPremium,
    /// Below -1%: domestic market trades at a discount.
    Discount,
    Neutral,
}

impl PremiumBand {
    #[must_use]
    pub fn classify(pct: Decimal) -> Self {
        if pct > dec!(5) {
            Self::StrongPremium
        } else if pct > dec!(2) {
            Self::MildPremium
        } else if pct < dec!(-1) {
            Self::Discount
        } else {
            Self::Neutral
        }
    }

    #[must_use]
    pub const fn comment(self) -> &'static str {
        match self {
            Self::StrongPremium => "domestic market strongly overpriced",
            Self::MildPremium => "mild premium",
            Self::Discount => "reverse premium, domestic discount",
            Self::Neutral => "neutral range",
        }
    }
}

impl fmt::Display for PremiumBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.comment())
    }
}

/// Result of one premium computation. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PremiumResult {
    pub symbol: Symbol,
    /// Domestic price in KRW.
    pub domestic_price: Decimal,
    /// Global reference price in USD.
    pub reference_price: Decimal,
    /// Reference price converted to KRW.
    pub reference_price_converted: Decimal,
    pub fx_rate: Decimal,
    /// True when `fx_rate` is the fallback constant.
    pub fx_fallback: bool,
    pub premium_pct: Decimal,
    pub computed_at: DateTime<Utc>,
}

impl PremiumResult {
    /// Build a result from raw prices, or `None` if the converted reference
    /// price is not positive or the arithmetic overflows.
    #[must_use]
    pub fn from_prices(
        symbol: Symbol,
        domestic_price: Decimal,
        reference_price: Decimal,
        fx: FxRate,
        computed_at: DateTime<Utc>,
    ) -> Option<Self> {
        let converted = reference_price.checked_mul(fx.rate)?;
        let premium_pct = premium_pct(domestic_price, converted)?;

        Some(Self {
            symbol,
            domestic_price,
            reference_price,
            reference_price_converted: converted,
            fx_rate: fx.rate,
            fx_fallback: fx.fallback,
            premium_pct,
            computed_at,
        })
    }

    #[must_use]
    pub fn band(&self) -> PremiumBand {
        PremiumBand::classify(self.premium_pct)
    }

    #[must_use]
    pub fn emoji(&self) -> &'static str {
        premium_emoji(self.premium_pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_example_premium() {
        let result = PremiumResult::from_prices(
            Symbol::new("BTC"),
            dec!(100000000),
            dec!(70000),
            FxRate::live(dec!(1350)),
            Utc::now(),
        )
        .unwrap();

        assert_eq!(result.reference_price_converted, dec!(94500000));
        assert_eq!(result.premium_pct.round_dp(2), dec!(5.82));
        assert_eq!(result.band(), PremiumBand::StrongPremium);
        assert!(!result.fx_fallback);
    }

    #[test]
    fn sign_follows_price_order() {
        let above = premium_pct(dec!(101), dec!(100)).unwrap();
        let below = premium_pct(dec!(99), dec!(100)).unwrap();
        let equal = premium_pct(dec!(100), dec!(100)).unwrap();

        assert!(above > Decimal::ZERO);
        assert!(below < Decimal::ZERO);
        assert_eq!(equal, Decimal::ZERO);
    }

    #[test]
    fn zero_reference_is_rejected() {
        assert!(premium_pct(dec!(100), Decimal::ZERO).is_none());
        assert!(PremiumResult::from_prices(
            Symbol::new("BTC"),
            dec!(100),
            Decimal::ZERO,
            FxRate::live(dec!(1350)),
            Utc::now(),
        )
        .is_none());
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(PremiumBand::classify(dec!(5.01)), PremiumBand::StrongPremium);
        assert_eq!(PremiumBand::classify(dec!(5)), PremiumBand::MildPremium);
        assert_eq!(PremiumBand::classify(dec!(2.5)), PremiumBand::MildPremium);
        assert_eq!(PremiumBand::classify(dec!(2)), PremiumBand::Neutral);
        assert_eq!(PremiumBand::classify(dec!(-1)), PremiumBand::Neutral);
        assert_eq!(PremiumBand::classify(dec!(-1.01)), PremiumBand::Discount);
    }

    #[test]
    fn out_of_range_ratio_is_rejected() {
        // 1e8 / 1.35e-24 exceeds the largest representable Decimal.
        assert!(premium_pct(dec!(100000000), Decimal::new(135, 26)).is_none());
        assert!(PremiumResult::from_prices(
            Symbol::new("BTC"),
            dec!(100000000),
            Decimal::new(1, 27),
            FxRate::live(dec!(1350)),
            Utc::now(),
        )
        .is_none());
        assert!(PremiumResult::from_prices(
            Symbol::new("BTC"),
            dec!(100000000),
            Decimal::MAX,
            FxRate::live(dec!(1350)),
            Utc::now(),
        )
        .is_none());
    }

    #[test]
    fn emoji_cutoffs() {
        assert_eq!(premium_emoji(dec!(3.01)), "🌶️");
        assert_eq!(premium_emoji(dec!(3)), "⚖️");
        assert_eq!(premium_emoji(dec!(2.5)), "⚖️");
        assert_eq!(premium_emoji(dec!(-1)), "⚖️");
        assert_eq!(premium_emoji(dec!(-1.01)), "🔵");
    }

    #[test]
    fn fallback_flag_is_carried() {
        let result = PremiumResult::from_prices(
            Symbol::new("ETH"),
            dec!(5000000),
            dec!(3500),
            FxRate::fallback(DEFAULT_USD_KRW),
            Utc::now(),
        )
        .unwrap();
        assert!(result.fx_fallback);
        assert_eq!(result.fx_rate, dec!(1350));
    }
}
