//! Messages between the panels and the dashboard container.
//!
//! - [`PanelMessage`]: what a panel asks the container to do.
//! - [`DashboardEvent`]: what the container reports back.
//!
//! These are in-process values; nothing here is ever serialized.

use crate::asset::Asset;
use crate::error::MarketError;
use crate::order::{Order, OrderDraft, OrderId, OrderUpdate};

/// A request from one of the panels.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelMessage {
    /// Asset list → container: the chosen asset snapshot.
    SelectAsset(Asset),

    /// Order panel → container: a draft to stamp and record.
    PlaceOrder(OrderDraft),

    /// Chart / order list → container: merge fields into an order.
    UpdateOrder { id: OrderId, update: OrderUpdate },
}

/// Outcome of processing a [`PanelMessage`].
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    AssetSelected(Asset),
    OrderPlaced(Order),
    OrderUpdated(Order),
    Rejected(MarketError),
}

impl PanelMessage {
    pub fn update_order(id: OrderId, update: OrderUpdate) -> Self {
        PanelMessage::UpdateOrder { id, update }
    }
}
