/*
[INPUT]:  Account identifiers and history filters
[OUTPUT]: Account state, transactions and executed trades
[POS]:    HTTP layer - account endpoints (require JWT auth)
[UPDATE]: When adding account endpoints or changing query parameters
*/

use crate::http::{FinamClient, Result};
use crate::types::{AccountInfo, TradesRequest, TradesResponse, TransactionsRequest, TransactionsResponse};

/// Account endpoints
#[derive(Debug, Clone, Copy)]
pub struct Account<'a> {
    client: &'a FinamClient,
}

impl<'a> Account<'a> {
    pub(crate) fn new(client: &'a FinamClient) -> Self {
        Self { client }
    }

    /// Query equity, positions and cash of an account
    ///
    /// GET /v1/accounts/{account_id}
    pub async fn get_account_info(&self, account_id: &str) -> Result<AccountInfo> {
        self.client.get_json(&["accounts", account_id], &[]).await
    }

    /// Query account transactions
    ///
    /// GET /v1/accounts/{account_id}/transactions?limit={limit}&interval.start_time={start}&interval.end_time={end}
    pub async fn get_transactions(
        &self,
        request: &TransactionsRequest,
    ) -> Result<TransactionsResponse> {
        self.client
            .get_json(
                &["accounts", &request.account_id, "transactions"],
                &request.query_pairs(),
            )
            .await
    }

    /// Query account trades
    ///
    /// GET /v1/accounts/{account_id}/trades?limit={limit}&interval.start_time={start}&interval.end_time={end}
    pub async fn get_trades(&self, request: &TradesRequest) -> Result<TradesResponse> {
        self.client
            .get_json(
                &["accounts", &request.account_id, "trades"],
                &request.query_pairs(),
            )
            .await
    }
}
