//! market-core
//!
//! Pure simulation logic behind the trading dashboard:
//! - asset snapshots, categories and the filtered registry
//! - the price random walk
//! - synthetic candle series and chart load state
//! - paper orders, the order form and the dashboard container
//!
//! No terminal, no runtime: timers live in the terminal crate, which
//! calls into this one on every tick.

pub mod asset;
pub mod candle;
pub mod category;
pub mod chart;
pub mod dashboard;
pub mod direction;
pub mod error;
pub mod messages;
pub mod order;
pub mod order_form;
pub mod registry;
pub mod settings;
pub mod ticker;
pub mod timeframe;

pub use asset::{default_assets, Asset, PriceMove};
pub use candle::{Candle, CandleGenerator};
pub use category::{AssetCategory, CategoryFilter};
pub use chart::{ChartState, LoadTicket};
pub use dashboard::Dashboard;
pub use direction::Direction;
pub use error::{MarketError, Result};
pub use messages::{DashboardEvent, PanelMessage};
pub use order::{Order, OrderDraft, OrderId, OrderStatus, OrderUpdate};
pub use order_form::{OrderForm, VolatilityCheck};
pub use registry::{AssetFilter, AssetRegistry};
pub use settings::{SimRng, SimulationSettings};
pub use ticker::PriceTicker;
pub use timeframe::Timeframe;
