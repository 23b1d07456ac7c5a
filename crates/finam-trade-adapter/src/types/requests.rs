/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::SecondsFormat;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{OrderType, Side, StopCondition, TimeFrame, TimeInForce};
use super::models::{DecimalValue, Interval};
use crate::http::{FinamError, Result};

/// Body of `POST sessions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRequest {
    pub secret: String,
}

/// Body of `POST sessions/details`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDetailsRequest {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionsRequest {
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,
}

impl TransactionsRequest {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            limit: None,
            interval: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = Some(interval);
        self
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        history_query(self.limit, self.interval.as_ref())
    }
}

/// Account trade history uses the same filter shape as transactions
pub type TradesRequest = TransactionsRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarsRequest {
    pub symbol: String,
    pub timeframe: TimeFrame,
    pub interval: Interval,
}

impl BarsRequest {
    pub fn new(symbol: impl Into<String>, timeframe: TimeFrame, interval: Interval) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe,
            interval,
        }
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("timeframe", self.timeframe.as_str().to_string())];
        params.extend(interval_query(&self.interval));
        params
    }
}

/// New order as sent to `POST accounts/{account_id}/orders`
///
/// The same shape is echoed back inside [`crate::types::OrderState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub account_id: String,
    pub symbol: String,
    pub quantity: DecimalValue,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub time_in_force: TimeInForce,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<DecimalValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<DecimalValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_condition: Option<StopCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
}

impl OrderRequest {
    fn base(
        account_id: impl Into<String>,
        symbol: impl Into<String>,
        side: Side,
        quantity: Decimal,
        order_type: OrderType,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            symbol: symbol.into(),
            quantity: quantity.into(),
            side,
            order_type,
            time_in_force: TimeInForce::Day,
            limit_price: None,
            stop_price: None,
            stop_condition: None,
            client_order_id: None,
        }
    }

    /// Market order valid for the trading day
    pub fn market(
        account_id: impl Into<String>,
        symbol: impl Into<String>,
        side: Side,
        quantity: Decimal,
    ) -> Self {
        Self::base(account_id, symbol, side, quantity, OrderType::Market)
    }

    /// Limit order valid for the trading day
    pub fn limit(
        account_id: impl Into<String>,
        symbol: impl Into<String>,
        side: Side,
        quantity: Decimal,
        limit_price: Decimal,
    ) -> Self {
        let mut order = Self::base(account_id, symbol, side, quantity, OrderType::Limit);
        order.limit_price = Some(limit_price.into());
        order
    }

    /// Stop-market order triggered when the last price crosses `stop_price`
    pub fn stop(
        account_id: impl Into<String>,
        symbol: impl Into<String>,
        side: Side,
        quantity: Decimal,
        stop_price: Decimal,
        stop_condition: StopCondition,
    ) -> Self {
        let mut order = Self::base(account_id, symbol, side, quantity, OrderType::Stop);
        order.stop_price = Some(stop_price.into());
        order.stop_condition = Some(stop_condition);
        order
    }

    pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force;
        self
    }

    pub fn with_client_order_id(mut self, client_order_id: impl Into<String>) -> Self {
        self.client_order_id = Some(client_order_id.into());
        self
    }

    /// Attach a random client order id unless one is already set
    pub fn with_generated_client_order_id(mut self) -> Self {
        if self.client_order_id.is_none() {
            self.client_order_id = Some(Uuid::new_v4().simple().to_string());
        }
        self
    }

    /// Reject orders the exchange would refuse before they leave the process
    pub fn validate(&self) -> Result<()> {
        if self.account_id.trim().is_empty() {
            return Err(FinamError::Config("order account_id is empty".to_string()));
        }
        if self.symbol.trim().is_empty() {
            return Err(FinamError::Config("order symbol is empty".to_string()));
        }
        if self.quantity.value <= Decimal::ZERO {
            return Err(FinamError::Config(format!(
                "order quantity must be positive, got {}",
                self.quantity.value
            )));
        }
        if self.side == Side::Unspecified {
            return Err(FinamError::Config("order side is unspecified".to_string()));
        }
        if self.order_type.needs_limit_price() {
            match self.limit_price {
                Some(price) if price.value > Decimal::ZERO => {}
                _ => {
                    return Err(FinamError::Config(
                        "limit orders require a positive limit_price".to_string(),
                    ));
                }
            }
        }
        if self.order_type.needs_stop_price() {
            match self.stop_price {
                Some(price) if price.value > Decimal::ZERO => {}
                _ => {
                    return Err(FinamError::Config(
                        "stop orders require a positive stop_price".to_string(),
                    ));
                }
            }
            if matches!(self.stop_condition, None | Some(StopCondition::Unspecified)) {
                return Err(FinamError::Config(
                    "stop orders require stop_condition".to_string(),
                ));
            }
        }
        Ok(())
    }
}

fn format_ts(ts: &chrono::DateTime<chrono::Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub(crate) fn interval_query(interval: &Interval) -> [(&'static str, String); 2] {
    [
        ("interval.start_time", format_ts(&interval.start_time)),
        ("interval.end_time", format_ts(&interval.end_time)),
    ]
}

fn history_query(limit: Option<u32>, interval: Option<&Interval>) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(l) = limit {
        params.push(("limit", l.to_string()));
    }
    if let Some(i) = interval {
        params.extend(interval_query(i));
    }
    params
}
