// crates/market-terminal/src/app.rs

use chrono::{DateTime, Local, Utc};
use market_core::{
    Asset, AssetFilter, AssetRegistry, CandleGenerator, ChartState, Dashboard, DashboardEvent,
    Direction, LoadTicket, MarketError, OrderDraft, OrderForm, OrderStatus, OrderUpdate,
    PanelMessage, PriceTicker, SimRng, SimulationSettings, VolatilityCheck,
};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing(Field),
    /// Waiting for y/n on a high-volatility placement.
    Confirm,
}

/// Text field currently receiving keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Search,
    Amount,
    TakeProfit,
    StopLoss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Assets,
    Chart,
    Orders,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Last message shown in the status bar.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub at: DateTime<Local>,
}

pub struct App {
    // UI state
    pub input_mode: InputMode,
    pub current_panel: Panel,
    pub should_quit: bool,
    pub show_help: bool,
    pub notice: Option<Notice>,

    // Selection state
    pub selected_row: usize,
    pub selected_order_index: usize,

    // Input buffer
    pub input_buffer: String,
    pub input_cursor: usize,

    // Market state
    pub registry: AssetRegistry,
    pub filter: AssetFilter,
    pub dashboard: Dashboard,
    pub chart: ChartState,
    pub form: OrderForm,
    pending_draft: Option<OrderDraft>,

    // Simulation
    ticker: PriceTicker,
    generator: CandleGenerator,
    volatility: VolatilityCheck,
    candle_count: usize,
    load_delay: Duration,
    load_deadline: Option<Instant>,
    rng: SimRng,

    // Statistics
    pub tick_count: u64,
}

impl App {
    pub fn new(settings: &SimulationSettings) -> market_core::Result<Self> {
        Ok(Self {
            input_mode: InputMode::Normal,
            current_panel: Panel::Assets,
            should_quit: false,
            show_help: false,
            notice: None,
            selected_row: 0,
            selected_order_index: 0,
            input_buffer: String::new(),
            input_cursor: 0,
            registry: settings.registry()?,
            filter: AssetFilter::default(),
            dashboard: settings.dashboard(),
            chart: ChartState::default(),
            form: OrderForm::default(),
            pending_draft: None,
            ticker: settings.ticker(),
            generator: settings.candle_generator(),
            volatility: settings.volatility_check(),
            candle_count: settings.candle_count,
            load_delay: settings.chart_load_delay(),
            load_deadline: None,
            rng: settings.make_rng(),
            tick_count: 0,
        })
    }

    // -------------------------------------------------------------------------
    // Panels and selection
    // -------------------------------------------------------------------------

    pub fn next_panel(&mut self) {
        self.current_panel = match self.current_panel {
            Panel::Assets => Panel::Chart,
            Panel::Chart => Panel::Orders,
            Panel::Orders => Panel::Assets,
        };
    }

    pub fn prev_panel(&mut self) {
        self.current_panel = match self.current_panel {
            Panel::Assets => Panel::Orders,
            Panel::Chart => Panel::Assets,
            Panel::Orders => Panel::Chart,
        };
    }

    /// Assets passing the search box and category tab.
    pub fn visible_assets(&self) -> Vec<&Asset> {
        self.filter.apply(&self.registry)
    }

    /// Row under the cursor in the asset list.
    pub fn highlighted_asset(&self) -> Option<&Asset> {
        self.visible_assets().get(self.selected_row).copied()
    }

    pub fn move_selection_up(&mut self) {
        match self.current_panel {
            Panel::Assets => self.selected_row = self.selected_row.saturating_sub(1),
            Panel::Orders => self.selected_order_index = self.selected_order_index.saturating_sub(1),
            Panel::Chart => {}
        }
    }

    pub fn move_selection_down(&mut self) {
        match self.current_panel {
            Panel::Assets => {
                if self.selected_row < self.visible_assets().len().saturating_sub(1) {
                    self.selected_row += 1;
                }
            }
            Panel::Orders => {
                if self.selected_order_index < self.dashboard.order_count().saturating_sub(1) {
                    self.selected_order_index += 1;
                }
            }
            Panel::Chart => {}
        }
    }

    pub fn cycle_category(&mut self) {
        self.filter.category = self.filter.category.next();
        self.clamp_selection();
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_assets().len();
        self.selected_row = self.selected_row.min(len.saturating_sub(1));
    }

    // -------------------------------------------------------------------------
    // Asset selection and chart loading
    // -------------------------------------------------------------------------

    pub fn select_highlighted(&mut self) {
        if let Some(asset) = self.highlighted_asset().cloned() {
            self.select_asset(asset);
        }
    }

    pub fn select_asset_by_id(&mut self, id: &str) -> market_core::Result<()> {
        let asset = self.registry.require(id)?.clone();
        self.select_asset(asset);
        Ok(())
    }

    pub fn select_asset(&mut self, asset: Asset) {
        for event in self.dashboard.process_message(PanelMessage::SelectAsset(asset)) {
            if let DashboardEvent::AssetSelected(asset) = event {
                let ticket = self.chart.request(&asset);
                self.schedule_load(ticket);
                self.set_notice(
                    NoticeLevel::Info,
                    format!("Now viewing {} ({})", asset.name, asset.symbol),
                );
            }
        }
    }

    pub fn next_timeframe(&mut self) {
        self.change_timeframe(self.chart.timeframe().next());
    }

    pub fn prev_timeframe(&mut self) {
        self.change_timeframe(self.chart.timeframe().prev());
    }

    fn change_timeframe(&mut self, timeframe: market_core::Timeframe) {
        info!(timeframe = %timeframe, "timeframe changed");
        if let Some(ticket) = self.chart.set_timeframe(timeframe) {
            self.schedule_load(ticket);
        }
        self.set_notice(NoticeLevel::Info, format!("Timeframe changed to {timeframe}"));
    }

    /// A newer load replaces the deadline of an older one.
    fn schedule_load(&mut self, ticket: LoadTicket) {
        debug!(
            generation = ticket.generation,
            symbol = %ticket.symbol,
            timeframe = %ticket.timeframe,
            "chart load scheduled"
        );
        self.load_deadline = Some(Instant::now() + self.load_delay);
    }

    /// When the pending chart load is due, if any.
    pub fn load_deadline(&self) -> Option<Instant> {
        self.load_deadline
    }

    /// The simulated latency elapsed: generate and install the series.
    pub fn finish_chart_load(&mut self) {
        self.load_deadline = None;

        let Some(ticket) = self.chart.pending().cloned() else {
            return;
        };

        let candles = self.generator.generate(
            ticket.base_price,
            self.candle_count,
            ticket.timeframe,
            Utc::now(),
            &mut self.rng,
        );

        match self.chart.finish(ticket.generation, candles) {
            Ok(()) => debug!(
                generation = ticket.generation,
                symbol = %ticket.symbol,
                bars = self.chart.candles().len(),
                "chart loaded"
            ),
            Err(err) => warn!(error = %err, "chart load dropped"),
        }
    }

    // -------------------------------------------------------------------------
    // Price ticks
    // -------------------------------------------------------------------------

    pub fn on_tick(&mut self) {
        let next = self.ticker.tick(&self.registry, &mut self.rng);
        self.registry.replace_all(next);
        self.tick_count += 1;
        debug!(tick = self.tick_count, "prices updated");
    }

    // -------------------------------------------------------------------------
    // Order form
    // -------------------------------------------------------------------------

    pub fn set_direction(&mut self, direction: Direction) {
        self.form.set_direction(direction);
        self.current_panel = Panel::Orders;
    }

    pub fn increase_amount(&mut self) {
        self.form.increase_amount(self.dashboard.balance());
    }

    pub fn decrease_amount(&mut self) {
        self.form.decrease_amount(self.dashboard.balance());
    }

    pub fn toggle_take_profit(&mut self) {
        match self.dashboard.selected_asset().map(|asset| asset.price) {
            Some(price) => self.form.toggle_take_profit(price),
            None => self.reject(MarketError::NoAssetSelected),
        }
    }

    pub fn toggle_stop_loss(&mut self) {
        match self.dashboard.selected_asset().map(|asset| asset.price) {
            Some(price) => self.form.toggle_stop_loss(price),
            None => self.reject(MarketError::NoAssetSelected),
        }
    }

    /// Start typing into `field`, pre-filled with its current value.
    pub fn start_editing(&mut self, field: Field) {
        self.input_buffer = match field {
            Field::Search => self.filter.query.clone(),
            Field::Amount => format!("{}", self.form.amount()),
            Field::TakeProfit => self.form.take_profit().map(|p| format!("{p:.2}")).unwrap_or_default(),
            Field::StopLoss => self.form.stop_loss().map(|p| format!("{p:.2}")).unwrap_or_default(),
        };
        self.input_cursor = self.input_buffer.len();
        self.input_mode = InputMode::Editing(field);

        if field == Field::Search {
            self.current_panel = Panel::Assets;
        } else {
            self.current_panel = Panel::Orders;
        }
    }

    pub fn submit_input(&mut self) {
        let InputMode::Editing(field) = self.input_mode else {
            return;
        };

        let result = match field {
            Field::Search => Ok(()),
            Field::Amount => self.form.set_amount_input(&self.input_buffer),
            Field::TakeProfit => self.form.set_take_profit_input(&self.input_buffer),
            Field::StopLoss => self.form.set_stop_loss_input(&self.input_buffer),
        };

        if let Err(err) = result {
            self.reject(err);
        }

        self.input_buffer.clear();
        self.input_cursor = 0;
        self.input_mode = InputMode::Normal;
    }

    /// Leave the field without applying it. Escaping the search box
    /// clears the query.
    pub fn cancel_input(&mut self) {
        if self.input_mode == InputMode::Editing(Field::Search) {
            self.filter.query.clear();
            self.clamp_selection();
        }
        self.input_buffer.clear();
        self.input_cursor = 0;
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_char(&mut self, c: char) {
        self.input_buffer.insert(self.input_cursor, c);
        self.input_cursor += c.len_utf8();
        self.sync_search();
    }

    pub fn delete_char(&mut self) {
        if let Some(c) = self.input_buffer[..self.input_cursor].chars().next_back() {
            self.input_cursor -= c.len_utf8();
            self.input_buffer.remove(self.input_cursor);
            self.sync_search();
        }
    }

    // The asset list filters as the user types.
    fn sync_search(&mut self) {
        if self.input_mode == InputMode::Editing(Field::Search) {
            self.filter.query = self.input_buffer.clone();
            self.clamp_selection();
        }
    }

    // -------------------------------------------------------------------------
    // Placement
    // -------------------------------------------------------------------------

    pub fn place_order(&mut self) {
        let draft = match self.form.draft(self.dashboard.selected_asset()) {
            Ok(draft) => draft,
            Err(err) => return self.reject(err),
        };

        if self.volatility.roll(&mut self.rng) {
            info!(symbol = %draft.asset_symbol, "high volatility, asking for confirmation");
            self.set_notice(
                NoticeLevel::Info,
                format!(
                    "Market for {} is experiencing high volatility. Do you want to proceed?",
                    draft.asset_symbol
                ),
            );
            self.pending_draft = Some(draft);
            self.input_mode = InputMode::Confirm;
            return;
        }

        self.commit_order(draft);
    }

    /// Answer to the volatility prompt.
    pub fn confirm_pending(&mut self, proceed: bool) {
        self.input_mode = InputMode::Normal;

        let Some(draft) = self.pending_draft.take() else {
            return;
        };

        if proceed {
            self.commit_order(draft);
        } else {
            info!(symbol = %draft.asset_symbol, "placement aborted");
            self.set_notice(NoticeLevel::Info, "Order aborted");
        }
    }

    pub fn has_pending_confirmation(&self) -> bool {
        self.pending_draft.is_some()
    }

    fn commit_order(&mut self, draft: OrderDraft) {
        for event in self.dashboard.process_message(PanelMessage::PlaceOrder(draft)) {
            if let DashboardEvent::OrderPlaced(order) = event {
                self.set_notice(
                    NoticeLevel::Success,
                    format!(
                        "{} order for {}$ of {} has been executed",
                        order.direction.as_str(),
                        order.amount,
                        order.asset_symbol
                    ),
                );
            }
        }
        self.form.reset_levels();
        self.selected_order_index = 0;
    }

    /// Mark the highlighted recent order as cancelled.
    pub fn cancel_selected_order(&mut self) {
        let Some(id) = self
            .dashboard
            .orders()
            .nth(self.selected_order_index)
            .map(|order| order.id.clone())
        else {
            return;
        };

        let msg = PanelMessage::update_order(id, OrderUpdate::status(OrderStatus::Cancelled));
        for event in self.dashboard.process_message(msg) {
            match event {
                DashboardEvent::OrderUpdated(order) => self.set_notice(
                    NoticeLevel::Info,
                    format!("Order {} on {} cancelled", order.id, order.asset_symbol),
                ),
                DashboardEvent::Rejected(err) => self.reject(err),
                _ => {}
            }
        }
    }

    // -------------------------------------------------------------------------
    // Notices
    // -------------------------------------------------------------------------

    fn reject(&mut self, err: MarketError) {
        warn!(error = %err, "action rejected");
        let text = match err {
            MarketError::NoAssetSelected => "Please select an asset first".to_string(),
            other => other.to_string(),
        };
        self.set_notice(NoticeLevel::Error, text);
    }

    fn set_notice(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notice = Some(Notice {
            level,
            text: text.into(),
            at: Local::now(),
        });
    }

    /// Teardown: nothing may fire against this state any more.
    pub fn shutdown(&mut self) {
        self.load_deadline = None;
        if let Some(ticket) = self.chart.cancel() {
            debug!(generation = ticket.generation, "pending chart load cancelled");
        }
        self.pending_draft = None;
    }
}
