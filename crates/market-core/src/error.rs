//! Error types for the simulated market core.
//!
//! Nothing here is retried or escalated: every variant ends up as a
//! user-visible notice in the terminal and a `warn!` line in the log.

use thiserror::Error;

use crate::order::OrderId;

/// Everything the core can reject.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarketError {
    /// An order was submitted before any asset was selected.
    #[error("please select an asset first")]
    NoAssetSelected,

    /// The order amount did not parse to a positive number.
    #[error("invalid order amount `{0}`")]
    InvalidAmount(String),

    /// A take-profit / stop-loss level did not parse to a positive number.
    #[error("invalid price level `{0}`")]
    InvalidPrice(String),

    /// `update-order` referenced an id that is not in the recent list.
    #[error("no order with id {0}")]
    UnknownOrder(OrderId),

    /// Lookup of an asset id that the registry does not know.
    #[error("no asset with id `{0}`")]
    UnknownAsset(String),

    /// The asset universe contains the same id twice.
    #[error("asset id `{0}` appears more than once")]
    DuplicateAsset(String),

    /// The asset universe is empty.
    #[error("asset universe is empty")]
    EmptyUniverse,

    #[error("unknown timeframe `{0}`")]
    UnknownTimeframe(String),

    #[error("unknown asset category `{0}`")]
    UnknownCategory(String),

    /// A chart load finished after a newer one had been requested.
    #[error("chart load {generation} superseded by {current}")]
    StaleChartLoad { generation: u64, current: u64 },

    /// A simulation setting is out of range.
    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, MarketError>;
