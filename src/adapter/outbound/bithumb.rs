//! Bithumb public ticker client (domestic exchange B).
//!
//! `GET {base}/ticker/{SYMBOL}_KRW` returns `{"status": "0000", "data": {...}}`
//! with prices encoded as decimal strings.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::http::JsonFetcher;
use crate::domain::{Currency, PriceQuote, Source, Symbol};
use crate::error::MarketDataError;
use crate::port::DomesticPriceSource;

const STATUS_OK: &str = "0000";

#[derive(Debug, Deserialize)]
struct BithumbResponse {
    status: String,
    #[serde(default)]
    data: Option<BithumbTicker>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BithumbTicker {
    closing_price: Decimal,
}

pub struct BithumbClient {
    fetcher: JsonFetcher,
    base_url: String,
}

impl BithumbClient {
    #[must_use]
    pub fn new(fetcher: JsonFetcher, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl DomesticPriceSource for BithumbClient {
    async fn fetch_domestic_price(&self, symbol: &Symbol) -> Result<PriceQuote, MarketDataError> {
        if !symbol.is_well_formed() {
            return Err(MarketDataError::unavailable(
                Source::Bithumb,
                format!("invalid symbol '{symbol}'"),
            ));
        }
        let url = format!(
            "{}/ticker/{}_KRW",
            self.base_url.trim_end_matches('/'),
            symbol
        );
        let response: BithumbResponse = self.fetcher.get_json(Source::Bithumb, &url, &[]).await?;
        quote_from_response(symbol, response)
    }

    fn source(&self) -> Source {
        Source::Bithumb
    }
}

fn quote_from_response(
    symbol: &Symbol,
    response: BithumbResponse,
) -> Result<PriceQuote, MarketDataError> {
    if response.status != STATUS_OK {
        let reason = response
            .message
            .unwrap_or_else(|| format!("status {}", response.status));
        return Err(MarketDataError::unavailable(Source::Bithumb, reason));
    }

    let ticker = response
        .data
        .ok_or_else(|| MarketDataError::unavailable(Source::Bithumb, "missing ticker data"))?;

    Ok(PriceQuote::new(
        symbol.as_str(),
        ticker.closing_price,
        Currency::Krw,
        Source::Bithumb,
        Utc::now(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn decodes_string_price() {
        let response: BithumbResponse = serde_json::from_str(
            r#"{"status": "0000", "data": {"closing_price": "99950000", "units_traded": "12.5"}}"#,
        )
        .unwrap();
        let quote = quote_from_response(&Symbol::new("BTC"), response).unwrap();
        assert_eq!(quote.price(), dec!(99950000));
        assert_eq!(quote.source(), Source::Bithumb);
    }

    #[test]
    fn error_status_is_unavailable() {
        let response: BithumbResponse =
            serde_json::from_str(r#"{"status": "5500", "message": "Invalid Parameter"}"#).unwrap();
        let err = quote_from_response(&Symbol::new("NOPE"), response).unwrap_err();
        assert_eq!(err.upstream(), Source::Bithumb);
        assert!(err.to_string().contains("Invalid Parameter"));
    }

    #[tokio::test]
    async fn path_symbol_is_rejected_before_request() {
        let client = BithumbClient::new(JsonFetcher::default(), "http://127.0.0.1:9");
        let err = client
            .fetch_domestic_price(&Symbol::new("BTC/../x"))
            .await
            .unwrap_err();
        assert_eq!(err.upstream(), Source::Bithumb);
        assert!(err.to_string().contains("invalid symbol 'BTC/../X'"));
    }
}
