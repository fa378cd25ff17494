//! Paper order representation.
//!
//! Orders never reach a matching engine: the dashboard stamps a draft
//! with an id, a timestamp and `Executed` the moment it is placed.
//! Take-profit / stop-loss are stored for display only.

use std::fmt;

use chrono::{DateTime, Local};

use crate::direction::Direction;

/// Opaque order identifier, `order-<unix millis>-<sequence>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(value: impl Into<String>) -> Self {
        OrderId(value.into())
    }

    /// Build an id from the placement time and a per-dashboard sequence.
    pub fn generate(timestamp: DateTime<Local>, sequence: u64) -> Self {
        OrderId(format!("order-{}-{}", timestamp.timestamp_millis(), sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Executed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Executed => "executed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// What the order panel hands to the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub asset_id: String,
    pub asset_symbol: String,
    pub direction: Direction,
    /// Notional in account currency.
    pub amount: f64,
    /// Execution price (the selected asset snapshot's price).
    pub price: f64,
    pub take_profit: Option<f64>,
    pub stop_loss: Option<f64>,
}

/// A placed order as kept in the recent-orders list.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub asset_id: String,
    pub asset_symbol: String,
    pub direction: Direction,
    pub amount: f64,
    pub price: f64,
    pub take_profit: Option<f64>,
    pub stop_loss: Option<f64>,
    pub timestamp: DateTime<Local>,
    pub status: OrderStatus,
}

impl Order {
    /// Stamp a draft. Paper orders execute immediately.
    pub fn from_draft(draft: OrderDraft, id: OrderId, timestamp: DateTime<Local>) -> Self {
        Order {
            id,
            asset_id: draft.asset_id,
            asset_symbol: draft.asset_symbol,
            direction: draft.direction,
            amount: draft.amount,
            price: draft.price,
            take_profit: draft.take_profit,
            stop_loss: draft.stop_loss,
            timestamp,
            status: OrderStatus::Executed,
        }
    }

    /// Merge the fields present in `update`; everything else is kept.
    pub fn apply(&mut self, update: &OrderUpdate) {
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(take_profit) = update.take_profit {
            self.take_profit = take_profit;
        }
        if let Some(stop_loss) = update.stop_loss {
            self.stop_loss = stop_loss;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

/// Partial order fields for `update-order`.
///
/// The stop levels are doubly optional: `Some(None)` clears a level,
/// `None` leaves it alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderUpdate {
    pub amount: Option<f64>,
    pub price: Option<f64>,
    pub take_profit: Option<Option<f64>>,
    pub stop_loss: Option<Option<f64>>,
    pub status: Option<OrderStatus>,
}

impl OrderUpdate {
    pub fn status(status: OrderStatus) -> Self {
        OrderUpdate {
            status: Some(status),
            ..OrderUpdate::default()
        }
    }
}
