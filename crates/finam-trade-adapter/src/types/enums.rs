/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "SIDE_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "SIDE_BUY")]
    Buy,
    #[serde(rename = "SIDE_SELL")]
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    #[serde(rename = "ORDER_TYPE_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "ORDER_TYPE_MARKET")]
    Market,
    #[serde(rename = "ORDER_TYPE_LIMIT")]
    Limit,
    #[serde(rename = "ORDER_TYPE_STOP")]
    Stop,
    #[serde(rename = "ORDER_TYPE_STOP_LIMIT")]
    StopLimit,
    #[serde(rename = "ORDER_TYPE_MULTI_LEG")]
    MultiLeg,
}

impl OrderType {
    /// Whether the order carries a limit price
    pub fn needs_limit_price(self) -> bool {
        matches!(self, OrderType::Limit | OrderType::StopLimit)
    }

    /// Whether the order is triggered by a stop price
    pub fn needs_stop_price(self) -> bool {
        matches!(self, OrderType::Stop | OrderType::StopLimit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInForce {
    #[serde(rename = "TIME_IN_FORCE_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "TIME_IN_FORCE_DAY")]
    Day,
    #[serde(rename = "TIME_IN_FORCE_GOOD_TILL_CANCEL")]
    GoodTillCancel,
    #[serde(rename = "TIME_IN_FORCE_GOOD_TILL_CROSSING")]
    GoodTillCrossing,
    #[serde(rename = "TIME_IN_FORCE_EXT")]
    Ext,
    #[serde(rename = "TIME_IN_FORCE_ON_OPEN")]
    OnOpen,
    #[serde(rename = "TIME_IN_FORCE_ON_CLOSE")]
    OnClose,
    #[serde(rename = "TIME_IN_FORCE_IOC")]
    Ioc,
    #[serde(rename = "TIME_IN_FORCE_FOK")]
    Fok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopCondition {
    #[serde(rename = "STOP_CONDITION_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "STOP_CONDITION_LAST_UP")]
    LastUp,
    #[serde(rename = "STOP_CONDITION_LAST_DOWN")]
    LastDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "ORDER_STATUS_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "ORDER_STATUS_NEW")]
    New,
    #[serde(rename = "ORDER_STATUS_PARTIALLY_FILLED")]
    PartiallyFilled,
    #[serde(rename = "ORDER_STATUS_FILLED")]
    Filled,
    #[serde(rename = "ORDER_STATUS_DONE_FOR_DAY")]
    DoneForDay,
    #[serde(rename = "ORDER_STATUS_CANCELED", alias = "ORDER_STATUS_CANCELLED")]
    Canceled,
    #[serde(rename = "ORDER_STATUS_REPLACED")]
    Replaced,
    #[serde(rename = "ORDER_STATUS_PENDING_CANCEL")]
    PendingCancel,
    #[serde(rename = "ORDER_STATUS_REJECTED")]
    Rejected,
    #[serde(rename = "ORDER_STATUS_SUSPENDED")]
    Suspended,
    #[serde(rename = "ORDER_STATUS_PENDING_NEW")]
    PendingNew,
    #[serde(rename = "ORDER_STATUS_EXPIRED")]
    Expired,
    #[serde(rename = "ORDER_STATUS_FAILED")]
    Failed,
    #[serde(rename = "ORDER_STATUS_FORWARDING")]
    Forwarding,
    #[serde(rename = "ORDER_STATUS_WAIT")]
    Wait,
}

impl OrderStatus {
    /// Terminal statuses never change again
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Filled
                | OrderStatus::Canceled
                | OrderStatus::Rejected
                | OrderStatus::Expired
                | OrderStatus::Failed
                | OrderStatus::DoneForDay
        )
    }
}

/// Candle aggregation period for bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFrame {
    #[serde(rename = "TIME_FRAME_M1")]
    M1,
    #[serde(rename = "TIME_FRAME_M5")]
    M5,
    #[serde(rename = "TIME_FRAME_M15")]
    M15,
    #[serde(rename = "TIME_FRAME_M30")]
    M30,
    #[serde(rename = "TIME_FRAME_H1")]
    H1,
    #[serde(rename = "TIME_FRAME_H2")]
    H2,
    #[serde(rename = "TIME_FRAME_H4")]
    H4,
    #[serde(rename = "TIME_FRAME_H8")]
    H8,
    #[serde(rename = "TIME_FRAME_D")]
    D,
    #[serde(rename = "TIME_FRAME_W")]
    W,
    #[serde(rename = "TIME_FRAME_MN")]
    Mn,
    #[serde(rename = "TIME_FRAME_QR")]
    Qr,
}

impl TimeFrame {
    /// Wire name used in query strings
    pub fn as_str(self) -> &'static str {
        match self {
            TimeFrame::M1 => "TIME_FRAME_M1",
            TimeFrame::M5 => "TIME_FRAME_M5",
            TimeFrame::M15 => "TIME_FRAME_M15",
            TimeFrame::M30 => "TIME_FRAME_M30",
            TimeFrame::H1 => "TIME_FRAME_H1",
            TimeFrame::H2 => "TIME_FRAME_H2",
            TimeFrame::H4 => "TIME_FRAME_H4",
            TimeFrame::H8 => "TIME_FRAME_H8",
            TimeFrame::D => "TIME_FRAME_D",
            TimeFrame::W => "TIME_FRAME_W",
            TimeFrame::Mn => "TIME_FRAME_MN",
            TimeFrame::Qr => "TIME_FRAME_QR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderBookAction {
    #[serde(rename = "ACTION_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "ACTION_REMOVE")]
    Remove,
    #[serde(rename = "ACTION_ADD")]
    Add,
    #[serde(rename = "ACTION_UPDATE")]
    Update,
}
