//! Chart state: timeframe, candle series and the simulated load.
//!
//! Changing the asset or the timeframe starts a load identified by a
//! generation number. Only the load matching the current generation may
//! install its series, so a load overtaken by a newer request (or
//! cancelled on teardown) never touches the chart. An installed series
//! always replaces the previous one.

use crate::asset::Asset;
use crate::candle::{price_bounds, Candle};
use crate::error::{MarketError, Result};
use crate::timeframe::Timeframe;

/// Everything needed to produce the series once the load delay expires.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadTicket {
    pub generation: u64,
    pub asset_id: String,
    pub symbol: String,
    pub base_price: f64,
    pub timeframe: Timeframe,
}

#[derive(Debug, Default)]
pub struct ChartState {
    timeframe: Timeframe,
    subject: Option<Asset>,
    candles: Vec<Candle>,
    pending: Option<LoadTicket>,
    generation: u64,
}

impl ChartState {
    pub fn new(timeframe: Timeframe) -> Self {
        ChartState {
            timeframe,
            ..ChartState::default()
        }
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Asset snapshot the chart is drawn for.
    pub fn subject(&self) -> Option<&Asset> {
        self.subject.as_ref()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn pending(&self) -> Option<&LoadTicket> {
        self.pending.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Point the chart at a new asset snapshot.
    pub fn request(&mut self, asset: &Asset) -> LoadTicket {
        self.subject = Some(asset.clone());
        self.start_load(asset)
    }

    /// Switch timeframe; reloads only when an asset is shown.
    pub fn set_timeframe(&mut self, timeframe: Timeframe) -> Option<LoadTicket> {
        self.timeframe = timeframe;
        let asset = self.subject.clone()?;
        Some(self.start_load(&asset))
    }

    /// Install the series of load `generation`, replacing the old one.
    pub fn finish(&mut self, generation: u64, candles: Vec<Candle>) -> Result<()> {
        match &self.pending {
            Some(ticket) if ticket.generation == generation => {
                self.candles = candles;
                self.pending = None;
                Ok(())
            }
            _ => Err(MarketError::StaleChartLoad {
                generation,
                current: self.generation,
            }),
        }
    }

    /// Drop the pending load, if any.
    pub fn cancel(&mut self) -> Option<LoadTicket> {
        self.pending.take()
    }

    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        price_bounds(&self.candles)
    }

    fn start_load(&mut self, asset: &Asset) -> LoadTicket {
        self.generation += 1;

        let ticket = LoadTicket {
            generation: self.generation,
            asset_id: asset.id.clone(),
            symbol: asset.symbol.clone(),
            base_price: asset.price,
            timeframe: self.timeframe,
        };
        self.pending = Some(ticket.clone());
        ticket
    }
}
