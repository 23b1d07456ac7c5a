/*
[INPUT]:  Instrument symbols and account identifiers
[OUTPUT]: Exchanges, asset reference data, schedules and trading parameters
[POS]:    HTTP layer - asset endpoints (require JWT auth)
[UPDATE]: When adding asset endpoints or changing response format
*/

use crate::http::{FinamClient, Result};
use crate::types::{
    AssetDetails, AssetParams, AssetsResponse, ClockResponse, ExchangesResponse, OptionsChain,
    Schedule,
};

/// Asset reference endpoints
#[derive(Debug, Clone, Copy)]
pub struct Assets<'a> {
    client: &'a FinamClient,
}

impl<'a> Assets<'a> {
    pub(crate) fn new(client: &'a FinamClient) -> Self {
        Self { client }
    }

    /// GET /v1/exchanges
    pub async fn get_exchanges(&self) -> Result<ExchangesResponse> {
        self.client.get_json(&["exchanges"], &[]).await
    }

    /// GET /v1/assets
    pub async fn get_assets(&self) -> Result<AssetsResponse> {
        self.client.get_json(&["assets"], &[]).await
    }

    /// Server time
    ///
    /// GET /v1/assets/clock
    pub async fn get_clock(&self) -> Result<ClockResponse> {
        self.client.get_json(&["assets", "clock"], &[]).await
    }

    /// GET /v1/assets/{underlying_symbol}/options
    pub async fn get_options_chain(&self, underlying_symbol: &str) -> Result<OptionsChain> {
        self.client
            .get_json(&["assets", underlying_symbol, "options"], &[])
            .await
    }

    /// Trading sessions for an instrument
    ///
    /// GET /v1/assets/{symbol}/schedule
    pub async fn get_schedule(&self, instrument_symbol: &str) -> Result<Schedule> {
        self.client
            .get_json(&["assets", instrument_symbol, "schedule"], &[])
            .await
    }

    /// GET /v1/assets/{symbol}?account_id={account_id}
    pub async fn get_asset(&self, instrument_symbol: &str, account_id: &str) -> Result<AssetDetails> {
        self.client
            .get_json(
                &["assets", instrument_symbol],
                &[("account_id", account_id.to_string())],
            )
            .await
    }

    /// Margin and shortability of an instrument for an account
    ///
    /// GET /v1/assets/{symbol}/params?account_id={account_id}
    pub async fn get_asset_params(
        &self,
        instrument_symbol: &str,
        account_id: &str,
    ) -> Result<AssetParams> {
        self.client
            .get_json(
                &["assets", instrument_symbol, "params"],
                &[("account_id", account_id.to_string())],
            )
            .await
    }
}
