//! Simulation settings.
//!
//! Every field has a default, so an empty `[simulation]` table (or no
//! config file at all) reproduces the stock dashboard. The terminal
//! crate layers the config file, environment and CLI flags on top.

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::asset::{default_assets, Asset};
use crate::candle::{CandleGenerator, DEFAULT_CANDLE_VOLATILITY, MAX_CANDLE_COUNT};
use crate::dashboard::{Dashboard, DEFAULT_RECENT_ORDER_CAP, DEFAULT_STARTING_BALANCE};
use crate::error::{MarketError, Result};
use crate::order_form::VolatilityCheck;
use crate::registry::AssetRegistry;
use crate::ticker::{PriceTicker, DEFAULT_PRICE_BAND};

/// RNG used for every random draw of the simulation.
pub type SimRng = ChaCha8Rng;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSettings {
    /// Period of the price random walk.
    pub tick_interval_ms: u64,

    /// Simulated latency before a chart series shows up.
    pub chart_load_delay_ms: u64,

    pub starting_balance: f64,

    /// Length of the recent-orders list.
    pub recent_order_cap: usize,

    /// Bars per generated series.
    pub candle_count: usize,

    /// Half-width of the per-tick price move, as a fraction of price.
    pub price_band: f64,

    /// Candle volatility, as a fraction of the base price.
    pub candle_volatility: f64,

    /// Chance that a placement asks for a volatility confirmation.
    pub volatility_prompt_probability: f64,

    /// Fixed seed for reproducible sessions; entropy when absent.
    pub seed: Option<u64>,

    pub assets: Vec<Asset>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            tick_interval_ms: 3_000,
            chart_load_delay_ms: 1_000,
            starting_balance: DEFAULT_STARTING_BALANCE,
            recent_order_cap: DEFAULT_RECENT_ORDER_CAP,
            candle_count: 100,
            price_band: DEFAULT_PRICE_BAND,
            candle_volatility: DEFAULT_CANDLE_VOLATILITY,
            volatility_prompt_probability: 0.2,
            seed: None,
            assets: default_assets(),
        }
    }
}

impl SimulationSettings {
    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(invalid("tick_interval_ms", "must be greater than zero"));
        }
        if self.recent_order_cap == 0 {
            return Err(invalid("recent_order_cap", "must be greater than zero"));
        }
        if self.candle_count > MAX_CANDLE_COUNT {
            return Err(invalid(
                "candle_count",
                format!("must be at most {MAX_CANDLE_COUNT}"),
            ));
        }
        if !self.starting_balance.is_finite() {
            return Err(invalid("starting_balance", "must be a finite number"));
        }
        if !(self.price_band.is_finite() && self.price_band > 0.0) {
            return Err(invalid("price_band", "must be a positive number"));
        }
        if !(self.candle_volatility.is_finite() && self.candle_volatility > 0.0) {
            return Err(invalid("candle_volatility", "must be a positive number"));
        }
        if !(0.0..=1.0).contains(&self.volatility_prompt_probability) {
            return Err(invalid(
                "volatility_prompt_probability",
                "must be between 0 and 1",
            ));
        }
        if let Some(asset) = self
            .assets
            .iter()
            .find(|asset| !(asset.price.is_finite() && asset.price > 0.0))
        {
            return Err(invalid(
                "assets",
                format!("asset `{}` needs a positive price", asset.id),
            ));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn chart_load_delay(&self) -> Duration {
        Duration::from_millis(self.chart_load_delay_ms)
    }

    pub fn make_rng(&self) -> SimRng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    pub fn registry(&self) -> Result<AssetRegistry> {
        AssetRegistry::new(self.assets.clone())
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(self.starting_balance, self.recent_order_cap)
    }

    pub fn ticker(&self) -> PriceTicker {
        PriceTicker::new(self.price_band)
    }

    pub fn candle_generator(&self) -> CandleGenerator {
        CandleGenerator::new(self.candle_volatility)
    }

    pub fn volatility_check(&self) -> VolatilityCheck {
        VolatilityCheck::new(self.volatility_prompt_probability)
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> MarketError {
    MarketError::InvalidSetting {
        name,
        reason: reason.into(),
    }
}
