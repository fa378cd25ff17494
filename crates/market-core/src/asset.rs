//! Asset snapshot and the built-in asset universe.
//!
//! An [`Asset`] is a value: every price tick produces a fresh snapshot
//! carrying the old price in `previous_price`, so the UI can flash the
//! direction of the last move without any extra bookkeeping.

use serde::{Deserialize, Serialize};

use crate::category::AssetCategory;

/// One tradable instrument as shown in the asset list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub price: f64,

    /// Price before the most recent tick; never read from config.
    #[serde(skip)]
    pub previous_price: Option<f64>,

    /// Displayed 24h change in percent. Static: ticks do not touch it.
    pub change_24h: f64,

    pub category: AssetCategory,
}

/// Direction of the last price move.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PriceMove {
    Up,
    Down,
    Flat,
}

impl Asset {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        price: f64,
        change_24h: f64,
        category: AssetCategory,
    ) -> Self {
        Asset {
            id: id.into(),
            name: name.into(),
            symbol: symbol.into(),
            price,
            previous_price: None,
            change_24h,
            category,
        }
    }

    /// Compare `price` against `previous_price`; `Flat` when there is none.
    pub fn price_move(&self) -> PriceMove {
        match self.previous_price {
            Some(prev) if self.price > prev => PriceMove::Up,
            Some(prev) if self.price < prev => PriceMove::Down,
            _ => PriceMove::Flat,
        }
    }

    /// Price with the category's precision (4 digits for Forex, else 2).
    pub fn formatted_price(&self) -> String {
        format_price(self.price, self.category)
    }

    /// `+2.35%` / `-1.23%`.
    pub fn formatted_change(&self) -> String {
        format!("{:+.2}%", self.change_24h)
    }

    /// Case-insensitive substring match on name or symbol.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_query(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.symbol.to_lowercase().contains(needle)
    }
}

pub fn format_price(price: f64, category: AssetCategory) -> String {
    format!("{:.*}", category.price_decimals(), price)
}

/// Round half away from zero to `decimals` digits.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Built-in universe used when the config does not list any assets.
pub fn default_assets() -> Vec<Asset> {
    vec![
        Asset::new("btc-usdt", "Bitcoin", "BTC/USDT", 62149.12, 2.35, AssetCategory::Crypto),
        Asset::new("eth-usdt", "Ethereum", "ETH/USDT", 3052.87, -1.23, AssetCategory::Crypto),
        Asset::new("aapl", "Apple Inc", "AAPL", 172.58, 0.87, AssetCategory::Stocks),
        Asset::new("msft", "Microsoft", "MSFT", 402.17, 1.12, AssetCategory::Stocks),
        Asset::new("eurusd", "Euro/USD", "EUR/USD", 1.0812, -0.24, AssetCategory::Forex),
        Asset::new("gbpusd", "GBP/USD", "GBP/USD", 1.2651, 0.16, AssetCategory::Forex),
        Asset::new("gold", "Gold", "XAU/USD", 2329.62, 0.82, AssetCategory::Forex),
        Asset::new("sol-usdt", "Solana", "SOL/USDT", 139.28, 5.42, AssetCategory::Crypto),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_move_follows_previous_price() {
        let mut asset = Asset::new("x", "X", "X/USD", 10.0, 0.0, AssetCategory::Stocks);
        assert_eq!(asset.price_move(), PriceMove::Flat);

        asset.previous_price = Some(9.5);
        assert_eq!(asset.price_move(), PriceMove::Up);

        asset.previous_price = Some(10.5);
        assert_eq!(asset.price_move(), PriceMove::Down);
    }

    #[test]
    fn change_is_signed() {
        let assets = default_assets();
        assert_eq!(assets[0].formatted_change(), "+2.35%");
        assert_eq!(assets[1].formatted_change(), "-1.23%");
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(1.081_249, 4), 1.0812);
        assert_eq!(round_to(172.585_1, 2), 172.59);
        assert_eq!(format_price(1.08, AssetCategory::Forex), "1.0800");
    }
}
