/*
[INPUT]:  Order requests and order identifiers
[OUTPUT]: Order states
[POS]:    HTTP layer - order endpoints (require JWT auth)
[UPDATE]: When adding order endpoints or changing order validation
*/

use tracing::info;

use crate::http::{FinamClient, Result};
use crate::types::{OrderRequest, OrderState, OrdersResponse};

/// Order management endpoints
#[derive(Debug, Clone, Copy)]
pub struct Orders<'a> {
    client: &'a FinamClient,
}

impl<'a> Orders<'a> {
    pub(crate) fn new(client: &'a FinamClient) -> Self {
        Self { client }
    }

    /// Place a new order
    ///
    /// POST /v1/accounts/{account_id}/orders
    /// Invalid orders are rejected locally without a request. Orders without
    /// a `client_order_id` get a generated one so a resent request can be
    /// matched to the original by the exchange.
    pub async fn place_order(&self, request: &OrderRequest) -> Result<OrderState> {
        request.validate()?;
        let request = request.clone().with_generated_client_order_id();
        let state: OrderState = self
            .client
            .post_json(&["accounts", &request.account_id, "orders"], &request)
            .await?;
        info!(
            order_id = %state.order_id,
            client_order_id = request.client_order_id.as_deref().unwrap_or_default(),
            symbol = %request.symbol,
            status = ?state.status,
            "order placed"
        );
        Ok(state)
    }

    /// GET /v1/accounts/{account_id}/orders/{order_id}
    pub async fn get_order(&self, account_id: &str, order_id: &str) -> Result<OrderState> {
        self.client
            .get_json(&["accounts", account_id, "orders", order_id], &[])
            .await
    }

    /// All orders of the current trading session
    ///
    /// GET /v1/accounts/{account_id}/orders
    pub async fn get_orders(&self, account_id: &str) -> Result<OrdersResponse> {
        self.client
            .get_json(&["accounts", account_id, "orders"], &[])
            .await
    }

    /// DELETE /v1/accounts/{account_id}/orders/{order_id}
    pub async fn cancel_order(&self, account_id: &str, order_id: &str) -> Result<OrderState> {
        let state: OrderState = self
            .client
            .delete_json(&["accounts", account_id, "orders", order_id])
            .await?;
        info!(order_id = %order_id, status = ?state.status, "order cancel requested");
        Ok(state)
    }
}
