/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{OrderBookAction, OrderStatus, Side};
use super::requests::OrderRequest;

/// Decimal wrapped the way the API encodes it: `{"value": "123.45"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimalValue {
    #[serde(with = "rust_decimal::serde::str")]
    pub value: Decimal,
}

impl From<Decimal> for DecimalValue {
    fn from(value: Decimal) -> Self {
        Self { value }
    }
}

/// Amount of money split into whole units and nano units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub currency_code: String,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_i64_lenient",
        serialize_with = "serde_helpers::serialize_i64_as_str"
    )]
    pub units: i64,
    #[serde(default)]
    pub nanos: i32,
}

impl Money {
    /// Combine units and nanos into a single decimal amount
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from(self.units) + Decimal::new(i64::from(self.nanos), 9)
    }
}

/// Closed time range used by history endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl Interval {
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time,
        }
    }
}

// ### Sessions

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MdPermission {
    #[serde(default)]
    pub quote_level: String,
    #[serde(default)]
    pub delay_minutes: i32,
    #[serde(default)]
    pub mic: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub continent: Option<String>,
    #[serde(default)]
    pub worldwide: Option<bool>,
}

/// Metadata about the current session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDetails {
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub md_permissions: Vec<MdPermission>,
    #[serde(default)]
    pub account_ids: Vec<String>,
    #[serde(default)]
    pub readonly: bool,
}

// ### Account

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub quantity: DecimalValue,
    #[serde(default)]
    pub average_price: Option<DecimalValue>,
    #[serde(default)]
    pub current_price: Option<DecimalValue>,
    #[serde(default)]
    pub daily_pnl: Option<DecimalValue>,
    #[serde(default)]
    pub unrealized_pnl: Option<DecimalValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub account_id: String,
    #[serde(rename = "type", default)]
    pub account_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub equity: Option<DecimalValue>,
    #[serde(default)]
    pub unrealized_profit: Option<DecimalValue>,
    #[serde(default)]
    pub positions: Vec<Position>,
    #[serde(default)]
    pub cash: Vec<Money>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(default)]
    pub category: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub change: Option<Money>,
    #[serde(default)]
    pub transaction_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTrade {
    pub trade_id: String,
    pub symbol: String,
    pub price: DecimalValue,
    pub size: DecimalValue,
    pub side: Side,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
}

// ### Assets

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub mic: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub symbol: String,
    pub id: String,
    pub ticker: String,
    pub mic: String,
    #[serde(default)]
    pub isin: Option<String>,
    #[serde(rename = "type", default)]
    pub asset_type: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDetails {
    #[serde(default)]
    pub board: String,
    pub id: String,
    pub ticker: String,
    pub mic: String,
    #[serde(default)]
    pub isin: Option<String>,
    #[serde(rename = "type", default)]
    pub asset_type: String,
    pub name: String,
    #[serde(default)]
    pub decimals: u32,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_i64_lenient",
        serialize_with = "serde_helpers::serialize_i64_as_str"
    )]
    pub min_step: i64,
    #[serde(default)]
    pub lot_size: Option<DecimalValue>,
    #[serde(default)]
    pub expiration_date: Option<serde_json::Value>,
}

/// Whether a direction is tradeable and for how many days it is halted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub value: String,
    #[serde(default)]
    pub halted_days: i32,
}

impl Availability {
    pub fn is_available(&self) -> bool {
        self.value == "AVAILABLE"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetParams {
    pub symbol: String,
    pub account_id: String,
    #[serde(default)]
    pub tradeable: bool,
    #[serde(default)]
    pub longable: Option<Availability>,
    #[serde(default)]
    pub shortable: Option<Availability>,
    #[serde(default)]
    pub long_risk_rate: Option<DecimalValue>,
    #[serde(default)]
    pub long_collateral: Option<Money>,
    #[serde(default)]
    pub short_risk_rate: Option<DecimalValue>,
    #[serde(default)]
    pub short_collateral: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionContract {
    pub symbol: String,
    #[serde(rename = "type", default)]
    pub option_type: String,
    #[serde(default)]
    pub contract_size: Option<DecimalValue>,
    #[serde(default)]
    pub strike: Option<DecimalValue>,
    #[serde(default)]
    pub trade_last_day: Option<serde_json::Value>,
    #[serde(default)]
    pub expiration_last_day: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsChain {
    pub symbol: String,
    #[serde(default)]
    pub options: Vec<OptionContract>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "type")]
    pub session_type: String,
    pub interval: Interval,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub symbol: String,
    #[serde(default)]
    pub sessions: Vec<Session>,
}

// ### Market data

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: DecimalValue,
    pub high: DecimalValue,
    pub low: DecimalValue,
    pub close: DecimalValue,
    pub volume: DecimalValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub ask: Option<DecimalValue>,
    #[serde(default)]
    pub ask_size: Option<DecimalValue>,
    #[serde(default)]
    pub bid: Option<DecimalValue>,
    #[serde(default)]
    pub bid_size: Option<DecimalValue>,
    #[serde(default)]
    pub last: Option<DecimalValue>,
    #[serde(default)]
    pub last_size: Option<DecimalValue>,
    #[serde(default)]
    pub volume: Option<DecimalValue>,
    #[serde(default)]
    pub turnover: Option<DecimalValue>,
    #[serde(default)]
    pub open: Option<DecimalValue>,
    #[serde(default)]
    pub high: Option<DecimalValue>,
    #[serde(default)]
    pub low: Option<DecimalValue>,
    #[serde(default)]
    pub close: Option<DecimalValue>,
    #[serde(default)]
    pub change: Option<DecimalValue>,
}

impl Quote {
    /// Midpoint between best bid and best ask, when both are present
    pub fn mid_price(&self) -> Option<Decimal> {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) => Some((bid.value + ask.value) / Decimal::TWO),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastTrade {
    pub trade_id: String,
    #[serde(default)]
    pub mpid: String,
    pub timestamp: DateTime<Utc>,
    pub price: DecimalValue,
    pub size: DecimalValue,
    pub side: Side,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookRow {
    pub price: DecimalValue,
    #[serde(default)]
    pub sell_size: Option<DecimalValue>,
    #[serde(default)]
    pub buy_size: Option<DecimalValue>,
    pub action: OrderBookAction,
    #[serde(default)]
    pub mpid: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBook {
    #[serde(default)]
    pub rows: Vec<OrderBookRow>,
}

impl OrderBook {
    /// Highest price with resting buy size
    pub fn best_bid(&self) -> Option<Decimal> {
        self.rows
            .iter()
            .filter(|row| row.buy_size.is_some())
            .map(|row| row.price.value)
            .max()
    }

    /// Lowest price with resting sell size
    pub fn best_ask(&self) -> Option<Decimal> {
        self.rows
            .iter()
            .filter(|row| row.sell_size.is_some())
            .map(|row| row.price.value)
            .min()
    }
}

// ### Orders

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderState {
    pub order_id: String,
    #[serde(default)]
    pub exec_id: String,
    pub status: OrderStatus,
    pub order: OrderRequest,
    pub transact_at: DateTime<Utc>,
    #[serde(default)]
    pub accept_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub withdraw_at: Option<DateTime<Utc>>,
}

mod serde_helpers {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    /// int64 fields arrive as JSON strings, but some endpoints send plain numbers
    pub fn deserialize_i64_lenient<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(0);
        }

        if let Some(raw) = value.as_str() {
            if raw.trim().is_empty() {
                return Ok(0);
            }
            return raw.trim().parse().map_err(serde::de::Error::custom);
        }

        value
            .as_i64()
            .ok_or_else(|| serde::de::Error::custom("invalid int64 value"))
    }

    pub fn serialize_i64_as_str<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn money_accepts_string_and_numeric_units() {
        let from_str: Money =
            serde_json::from_value(json!({"currency_code": "RUB", "units": "12", "nanos": 500000000}))
                .expect("money should deserialize");
        let from_num: Money =
            serde_json::from_value(json!({"currency_code": "RUB", "units": 12, "nanos": 500000000}))
                .expect("money should deserialize");

        assert_eq!(from_str, from_num);
        assert_eq!(from_str.to_decimal(), dec!(12.5));
    }

    #[test]
    fn money_without_units_is_zero() {
        let money: Money = serde_json::from_value(json!({"currency_code": "USD", "nanos": 10}))
            .expect("money should deserialize");
        assert_eq!(money.units, 0);
        assert_eq!(money.to_decimal(), dec!(0.00000001));
    }

    #[test]
    fn decimal_value_reads_string_form() {
        let value: DecimalValue = serde_json::from_value(json!({"value": "301.15"})).unwrap();
        assert_eq!(value.value, dec!(301.15));
    }

    #[test]
    fn quote_mid_price_needs_both_sides() {
        let mut quote: Quote = serde_json::from_value(json!({
            "symbol": "SBER@MISX",
            "timestamp": "2025-01-01T10:00:00Z",
            "bid": {"value": "300.0"},
            "ask": {"value": "301.0"}
        }))
        .unwrap();
        assert_eq!(quote.mid_price(), Some(dec!(300.5)));

        quote.ask = None;
        assert_eq!(quote.mid_price(), None);
    }

    #[test]
    fn order_book_best_levels() {
        let book: OrderBook = serde_json::from_value(json!({
            "rows": [
                {"price": {"value": "101"}, "sell_size": {"value": "5"}, "action": "ACTION_ADD", "timestamp": "2025-01-01T10:00:00Z"},
                {"price": {"value": "102"}, "sell_size": {"value": "1"}, "action": "ACTION_ADD", "timestamp": "2025-01-01T10:00:00Z"},
                {"price": {"value": "100"}, "buy_size": {"value": "2"}, "action": "ACTION_ADD", "timestamp": "2025-01-01T10:00:00Z"},
                {"price": {"value": "99"}, "buy_size": {"value": "7"}, "action": "ACTION_UPDATE", "timestamp": "2025-01-01T10:00:00Z"}
            ]
        }))
        .unwrap();

        assert_eq!(book.best_bid(), Some(dec!(100)));
        assert_eq!(book.best_ask(), Some(dec!(101)));
    }

    #[test]
    fn availability_flags() {
        let available = Availability {
            value: "AVAILABLE".to_string(),
            halted_days: 0,
        };
        let not_available = Availability {
            value: "NOT_AVAILABLE".to_string(),
            halted_days: 3,
        };
        assert!(available.is_available());
        assert!(!not_available.is_available());
    }
}
