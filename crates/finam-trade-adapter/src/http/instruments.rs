/*
[INPUT]:  Instrument symbols, timeframes and intervals
[OUTPUT]: Market data (bars, quotes, trades, order book)
[POS]:    HTTP layer - market data endpoints (require JWT auth)
[UPDATE]: When adding market data endpoints or changing response format
*/

use crate::http::{FinamClient, Result};
use crate::types::{BarsRequest, BarsResponse, LastTradesResponse, OrderBookResponse, QuoteResponse};

/// Market data endpoints
#[derive(Debug, Clone, Copy)]
pub struct Instruments<'a> {
    client: &'a FinamClient,
}

impl<'a> Instruments<'a> {
    pub(crate) fn new(client: &'a FinamClient) -> Self {
        Self { client }
    }

    /// Get historical bars
    ///
    /// GET /v1/instruments/{symbol}/bars?timeframe={tf}&interval.start_time={start}&interval.end_time={end}
    pub async fn get_bars(&self, request: &BarsRequest) -> Result<BarsResponse> {
        self.client
            .get_json(
                &["instruments", &request.symbol, "bars"],
                &request.query_pairs(),
            )
            .await
    }

    /// GET /v1/instruments/{symbol}/quotes/latest
    pub async fn get_last_quote(&self, symbol: &str) -> Result<QuoteResponse> {
        self.client
            .get_json(&["instruments", symbol, "quotes", "latest"], &[])
            .await
    }

    /// GET /v1/instruments/{symbol}/trades/latest
    pub async fn get_last_trades(&self, symbol: &str) -> Result<LastTradesResponse> {
        self.client
            .get_json(&["instruments", symbol, "trades", "latest"], &[])
            .await
    }

    /// GET /v1/instruments/{symbol}/orderbook
    pub async fn get_order_book(&self, symbol: &str) -> Result<OrderBookResponse> {
        self.client
            .get_json(&["instruments", symbol, "orderbook"], &[])
            .await
    }
}
