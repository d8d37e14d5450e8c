//! Upbit REST client (domestic exchange A).
//!
//! Serves the KRW spot price used for the premium and the exchange's own
//! market data: the market list, multi-market tickers, order books and
//! candles. All endpoints are public GETs returning JSON arrays.

mod dto;

use async_trait::async_trait;

use self::dto::{UpbitCandle, UpbitMarket, UpbitOrderbook, UpbitTicker};
use super::http::JsonFetcher;
use crate::domain::{
    Candle, CandleInterval, Currency, MarketCode, Orderbook, PriceQuote, Source, Symbol,
    MAX_CANDLES,
};
use crate::error::MarketDataError;
use crate::port::{DomesticPriceSource, ExchangeMarketData};

pub struct UpbitClient {
    fetcher: JsonFetcher,
    base_url: String,
}

impl UpbitClient {
    #[must_use]
    pub fn new(fetcher: JsonFetcher, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }

    async fn tickers(&self, markets: &str) -> Result<Vec<UpbitTicker>, MarketDataError> {
        self.fetcher
            .get_json(Source::Upbit, &self.endpoint("ticker"), &[("markets", markets)])
            .await
    }
}

#[async_trait]
impl DomesticPriceSource for UpbitClient {
    async fn fetch_domestic_price(&self, symbol: &Symbol) -> Result<PriceQuote, MarketDataError> {
        let expected = MarketCode::new(Currency::Krw, symbol);
        let tickers = self.tickers(expected.as_str()).await?;
        quote_for_market(&expected, tickers)
    }

    fn source(&self) -> Source {
        Source::Upbit
    }
}

#[async_trait]
impl ExchangeMarketData for UpbitClient {
    async fn list_markets(&self) -> Result<Vec<MarketCode>, MarketDataError> {
        let markets: Vec<UpbitMarket> = self
            .fetcher
            .get_json(
                Source::Upbit,
                &self.endpoint("market/all"),
                &[("isDetails", "false")],
            )
            .await?;
        Ok(markets
            .iter()
            .filter_map(|m| MarketCode::parse(&m.market))
            .collect())
    }

    async fn fetch_tickers(
        &self,
        markets: &[MarketCode],
    ) -> Result<Vec<PriceQuote>, MarketDataError> {
        if markets.is_empty() {
            return Ok(Vec::new());
        }
        let joined = markets
            .iter()
            .map(MarketCode::as_str)
            .collect::<Vec<_>>()
            .join(",");
        self.tickers(&joined)
            .await?
            .into_iter()
            .map(UpbitTicker::into_quote)
            .collect()
    }

    async fn fetch_orderbook(&self, market: &MarketCode) -> Result<Orderbook, MarketDataError> {
        let books: Vec<UpbitOrderbook> = self
            .fetcher
            .get_json(
                Source::Upbit,
                &self.endpoint("orderbook"),
                &[("markets", market.as_str())],
            )
            .await?;
        books
            .into_iter()
            .find(|b| b.market == market.as_str())
            .ok_or_else(|| {
                MarketDataError::unavailable(Source::Upbit, format!("no order book for {market}"))
            })?
            .into_orderbook()
    }

    async fn fetch_candles(
        &self,
        market: &MarketCode,
        interval: CandleInterval,
        count: u16,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let count = count.clamp(1, MAX_CANDLES).to_string();
        let candles: Vec<UpbitCandle> = self
            .fetcher
            .get_json(
                Source::Upbit,
                &self.endpoint(&format!("candles/{}", interval.path())),
                &[("market", market.as_str()), ("count", count.as_str())],
            )
            .await?;
        Ok(candles.into_iter().map(Candle::from).collect())
    }
}

fn quote_for_market(
    expected: &MarketCode,
    tickers: Vec<UpbitTicker>,
) -> Result<PriceQuote, MarketDataError> {
    tickers
        .into_iter()
        .find(|t| t.market == expected.as_str())
        .ok_or_else(|| {
            MarketDataError::unavailable(Source::Upbit, format!("no ticker for {expected}"))
        })?
        .into_quote()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn krw(symbol: &str) -> MarketCode {
        MarketCode::new(Currency::Krw, &Symbol::new(symbol))
    }

    #[test]
    fn picks_the_requested_market() {
        let tickers: Vec<UpbitTicker> = serde_json::from_str(
            r#"[
                {"market": "KRW-ETH", "trade_price": 5000000},
                {"market": "KRW-BTC", "trade_price": 100000000.0, "signed_change_rate": -0.004,
                 "high_price": 101000000.0, "low_price": 98000000.0, "acc_trade_price_24h": 150000000000.0}
            ]"#,
        )
        .unwrap();
        let quote = quote_for_market(&krw("btc"), tickers).unwrap();

        assert_eq!(quote.price(), dec!(100000000));
        assert_eq!(quote.source(), Source::Upbit);
        assert_eq!(quote.stats().unwrap().change_rate, dec!(-0.004));
    }

    #[test]
    fn empty_array_is_unavailable() {
        let err = quote_for_market(&krw("BTC"), Vec::new()).unwrap_err();
        assert_eq!(err.upstream(), Source::Upbit);
    }

    #[test]
    fn missing_price_fails_to_decode() {
        let decoded: Result<Vec<UpbitTicker>, _> =
            serde_json::from_str(r#"[{"market": "KRW-ETH"}]"#);
        assert!(decoded.is_err());
    }

    #[tokio::test]
    async fn no_markets_means_no_request() {
        let client = UpbitClient::new(JsonFetcher::default(), "http://127.0.0.1:9");
        assert!(client.fetch_tickers(&[]).await.unwrap().is_empty());
    }
}
