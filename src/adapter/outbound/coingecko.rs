//! CoinGecko client (global reference index).
//!
//! - `GET {base}/simple/price?ids={id}&vs_currencies=usd` → `{"bitcoin": {"usd": 70000}}`
//! - `GET {base}/search?query={q}` → `{"coins": [{"id": "...", "symbol": "..."}]}`

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::http::JsonFetcher;
use crate::domain::{Currency, PriceQuote, ReferenceId, Source};
use crate::error::MarketDataError;
use crate::port::ReferencePriceSource;

type SimplePriceResponse = HashMap<String, HashMap<String, Decimal>>;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    coins: Vec<SearchCoin>,
}

#[derive(Debug, Deserialize)]
struct SearchCoin {
    id: String,
}

pub struct CoinGeckoClient {
    fetcher: JsonFetcher,
    base_url: String,
}

impl CoinGeckoClient {
    #[must_use]
    pub fn new(fetcher: JsonFetcher, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ReferencePriceSource for CoinGeckoClient {
    async fn fetch_reference_price(
        &self,
        reference_id: &ReferenceId,
    ) -> Result<PriceQuote, MarketDataError> {
        let response: SimplePriceResponse = self
            .fetcher
            .get_json(
                Source::CoinGecko,
                &self.url("simple/price"),
                &[("ids", reference_id.as_str()), ("vs_currencies", "usd")],
            )
            .await?;

        usd_quote(reference_id, &response)
    }

    async fn search(&self, query: &str) -> Result<Vec<ReferenceId>, MarketDataError> {
        let response: SearchResponse = self
            .fetcher
            .get_json(Source::CoinGecko, &self.url("search"), &[("query", query)])
            .await?;

        Ok(response
            .coins
            .into_iter()
            .map(|coin| ReferenceId::new(coin.id))
            .collect())
    }
}

fn usd_quote(
    reference_id: &ReferenceId,
    response: &SimplePriceResponse,
) -> Result<PriceQuote, MarketDataError> {
    let price = response
        .get(reference_id.as_str())
        .and_then(|prices| prices.get("usd"))
        .copied()
        .ok_or_else(|| {
            MarketDataError::unavailable(
                Source::CoinGecko,
                format!("no usd price for {reference_id}"),
            )
        })?;

    Ok(PriceQuote::new(
        reference_id.as_str(),
        price,
        Currency::Usd,
        Source::CoinGecko,
        Utc::now(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn decodes_simple_price() {
        let response: SimplePriceResponse =
            serde_json::from_str(r#"{"bitcoin": {"usd": 70000.5}}"#).unwrap();
        let quote = usd_quote(&ReferenceId::new("bitcoin"), &response).unwrap();
        assert_eq!(quote.price(), dec!(70000.5));
        assert_eq!(quote.currency(), Currency::Usd);
    }

    #[test]
    fn missing_id_is_unavailable() {
        let response: SimplePriceResponse = serde_json::from_str("{}").unwrap();
        let err = usd_quote(&ReferenceId::new("bitcoin"), &response).unwrap_err();
        assert_eq!(err.upstream(), Source::CoinGecko);
    }

    #[test]
    fn search_keeps_upstream_order() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"coins": [{"id": "worldcoin-wld", "symbol": "WLD"}, {"id": "wld-fake"}], "exchanges": []}"#,
        )
        .unwrap();
        let ids: Vec<_> = response.coins.into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["worldcoin-wld", "wld-fake"]);
    }
}
