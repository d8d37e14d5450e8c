//! Coin symbols and their global reference identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Domestic market symbol (e.g. `BTC`) - newtype for type safety.
///
/// Always stored upper-cased so `btc` and `BTC` address the same asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Create a new `Symbol`, normalizing whitespace and case.
    pub fn new(symbol: impl AsRef<str>) -> Self {
        Self(symbol.as_ref().trim().to_ascii_uppercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Non-empty and ASCII alphanumeric, so safe to embed in a URL path.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Global reference identifier (a CoinGecko coin id such as `bitcoin`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceId(String);

impl ReferenceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ReferenceId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Static symbol → reference id table for the commonly traded KRW coins.
const KNOWN_MAPPINGS: &[(&str, &str)] = &[
    ("BTC", "bitcoin"),
    ("ETH", "ethereum"),
    ("XRP", "ripple"),
    ("SOL", "solana"),
    ("ADA", "cardano"),
    ("DOGE", "dogecoin"),
    ("AVAX", "avalanche-2"),
    ("DOT", "polkadot"),
    ("MATIC", "matic-network"),
    ("LINK", "chainlink"),
    ("UNI", "uniswap"),
    ("ATOM", "cosmos"),
    ("LTC", "litecoin"),
    ("BCH", "bitcoin-cash"),
    ("ETC", "ethereum-classic"),
    ("NEAR", "near"),
    ("APT", "aptos"),
    ("ARB", "arbitrum"),
    ("OP", "optimism"),
    ("SUI", "sui"),
    ("TRX", "tron"),
    ("SHIB", "shiba-inu"),
    ("PEPE", "pepe"),
    ("BNB", "binancecoin"),
    ("TON", "the-open-network"),
    ("STX", "blockstack"),
    ("SAND", "the-sandbox"),
    ("MANA", "decentraland"),
];

/// Bidirectional lookup over the static mapping table.
///
/// Symbols missing here are resolved at runtime through the reference
/// source's search endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolMapping;

impl SymbolMapping {
    /// Reference id for a domestic symbol, if statically known.
    #[must_use]
    pub fn reference_id(&self, symbol: &Symbol) -> Option<ReferenceId> {
        KNOWN_MAPPINGS
            .iter()
            .find(|(sym, _)| *sym == symbol.as_str())
            .map(|(_, id)| ReferenceId::new(*id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        KNOWN_MAPPINGS.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        KNOWN_MAPPINGS.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_is_normalized() {
        assert_eq!(Symbol::new(" btc ").as_str(), "BTC");
        assert_eq!(Symbol::from("Eth"), Symbol::new("ETH"));
    }

    #[test]
    fn known_symbol_resolves() {
        let mapping = SymbolMapping;
        assert_eq!(
            mapping.reference_id(&Symbol::new("avax")),
            Some(ReferenceId::new("avalanche-2"))
        );
        assert_eq!(
            mapping.reference_id(&Symbol::new("BTC")),
            Some(ReferenceId::new("bitcoin"))
        );
    }

    #[test]
    fn unknown_symbol_is_absent() {
        assert!(SymbolMapping.reference_id(&Symbol::new("WLD")).is_none());
    }

    #[test]
    fn every_table_entry_resolves() {
        let mapping = SymbolMapping;
        for (sym, id) in KNOWN_MAPPINGS {
            assert_eq!(
                mapping.reference_id(&Symbol::new(sym)),
                Some(ReferenceId::new(*id))
            );
        }
        assert_eq!(mapping.len(), 28);
    }

    #[test]
    fn well_formed_symbols() {
        assert!(Symbol::new("btc").is_well_formed());
        assert!(Symbol::new("1INCH").is_well_formed());
        assert!(!Symbol::new("  ").is_well_formed());
        assert!(!Symbol::new("BTC/../x").is_well_formed());
        assert!(!Symbol::new("BTC_KRW").is_well_formed());
    }
}
