//! Exchange rate client for `open.er-api.com`.
//!
//! `GET {base}/{BASE}` → `{"result": "success", "rates": {"KRW": 1350.2, ...}}`

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::http::JsonFetcher;
use crate::domain::{Currency, Source};
use crate::error::MarketDataError;
use crate::port::FxRateSource;

#[derive(Debug, Deserialize)]
struct RatesResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    rates: HashMap<String, Decimal>,
}

pub struct ExchangeRateClient {
    fetcher: JsonFetcher,
    base_url: String,
}

impl ExchangeRateClient {
    #[must_use]
    pub fn new(fetcher: JsonFetcher, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl FxRateSource for ExchangeRateClient {
    async fn fetch_fx_rate(
        &self,
        base: Currency,
        quote: Currency,
    ) -> Result<Decimal, MarketDataError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), base.code());
        let response: RatesResponse = self.fetcher.get_json(Source::ExchangeRate, &url, &[]).await?;
        extract_rate(&response, quote)
    }
}

fn extract_rate(response: &RatesResponse, quote: Currency) -> Result<Decimal, MarketDataError> {
    if let Some(result) = response.result.as_deref() {
        if result != "success" {
            return Err(MarketDataError::unavailable(
                Source::ExchangeRate,
                format!("result {result}"),
            ));
        }
    }

    match response.rates.get(quote.code()).copied() {
        Some(rate) if rate > Decimal::ZERO => Ok(rate),
        Some(rate) => Err(MarketDataError::unavailable(
            Source::ExchangeRate,
            format!("non-positive {quote} rate {rate}"),
        )),
        None => Err(MarketDataError::unavailable(
            Source::ExchangeRate,
            format!("no {quote} rate"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn extracts_krw_rate() {
        let response: RatesResponse = serde_json::from_str(
            r#"{"result": "success", "base_code": "USD", "rates": {"USD": 1, "KRW": 1380.25}}"#,
        )
        .unwrap();
        assert_eq!(extract_rate(&response, Currency::Krw).unwrap(), dec!(1380.25));
    }

    #[test]
    fn error_result_is_unavailable() {
        let response: RatesResponse =
            serde_json::from_str(r#"{"result": "error", "error-type": "unsupported-code"}"#)
                .unwrap();
        assert!(extract_rate(&response, Currency::Krw).is_err());
    }

    #[test]
    fn missing_pair_is_unavailable() {
        let response: RatesResponse =
            serde_json::from_str(r#"{"result": "success", "rates": {"USD": 1}}"#).unwrap();
        let err = extract_rate(&response, Currency::Krw).unwrap_err();
        assert_eq!(err.upstream(), Source::ExchangeRate);
    }
}
