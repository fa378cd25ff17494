//! Dashboard container.
//!
//! Owns the transient session state shared by the panels:
//! - the selected asset snapshot,
//! - the recent-orders list (most recent first, capped),
//! - the paper balance.
//!
//! Panels talk to it through [`PanelMessage`]s. A placed order is
//! executed on the spot and its amount is taken off the balance; the
//! balance is allowed to go negative.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::asset::Asset;
use crate::error::{MarketError, Result};
use crate::messages::{DashboardEvent, PanelMessage};
use crate::order::{Order, OrderDraft, OrderId, OrderUpdate};

pub const DEFAULT_RECENT_ORDER_CAP: usize = 10;
pub const DEFAULT_STARTING_BALANCE: f64 = 10_000.0;

#[derive(Debug)]
pub struct Dashboard {
    selected: Option<Asset>,
    orders: VecDeque<Order>,
    balance: f64,
    order_cap: usize,
    next_sequence: u64,
}

impl Default for Dashboard {
    fn default() -> Self {
        Dashboard::new(DEFAULT_STARTING_BALANCE, DEFAULT_RECENT_ORDER_CAP)
    }
}

impl Dashboard {
    /// `order_cap` of zero is bumped to one.
    pub fn new(starting_balance: f64, order_cap: usize) -> Self {
        let order_cap = order_cap.max(1);
        Dashboard {
            selected: None,
            orders: VecDeque::with_capacity(order_cap + 1),
            balance: starting_balance,
            order_cap,
            next_sequence: 0,
        }
    }

    /// Process a single panel message and return the resulting events.
    pub fn process_message(&mut self, msg: PanelMessage) -> Vec<DashboardEvent> {
        match msg {
            PanelMessage::SelectAsset(asset) => {
                vec![DashboardEvent::AssetSelected(self.select_asset(asset).clone())]
            }
            PanelMessage::PlaceOrder(draft) => {
                vec![DashboardEvent::OrderPlaced(self.place_order(draft).clone())]
            }
            PanelMessage::UpdateOrder { id, update } => match self.update_order(&id, &update) {
                Ok(order) => vec![DashboardEvent::OrderUpdated(order.clone())],
                Err(err) => vec![DashboardEvent::Rejected(err)],
            },
        }
    }

    pub fn select_asset(&mut self, asset: Asset) -> &Asset {
        info!(asset = %asset.id, symbol = %asset.symbol, price = asset.price, "asset selected");
        self.selected.insert(asset)
    }

    /// Record a draft as an executed order, stamped now.
    pub fn place_order(&mut self, draft: OrderDraft) -> &Order {
        self.place_order_at(draft, Local::now())
    }

    pub fn place_order_at(&mut self, draft: OrderDraft, timestamp: DateTime<Local>) -> &Order {
        self.next_sequence += 1;
        let id = OrderId::generate(timestamp, self.next_sequence);

        self.balance -= draft.amount;

        let order = Order::from_draft(draft, id, timestamp);
        info!(
            order = %order.id,
            symbol = %order.asset_symbol,
            direction = order.direction.as_str(),
            amount = order.amount,
            price = order.price,
            balance = self.balance,
            "order executed"
        );

        self.orders.push_front(order);
        self.orders.truncate(self.order_cap);
        &self.orders[0]
    }

    /// Merge `update` into the order with `id`.
    pub fn update_order(&mut self, id: &OrderId, update: &OrderUpdate) -> Result<&Order> {
        let Some(order) = self.orders.iter_mut().find(|order| order.id == *id) else {
            warn!(order = %id, "update for unknown order");
            return Err(MarketError::UnknownOrder(id.clone()));
        };

        order.apply(update);
        info!(order = %order.id, status = order.status.as_str(), "order updated");
        Ok(&*order)
    }

    pub fn selected_asset(&self) -> Option<&Asset> {
        self.selected.as_ref()
    }

    /// Recent orders, most recent first.
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    pub fn order(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == *id)
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn order_cap(&self) -> usize {
        self.order_cap
    }
}
