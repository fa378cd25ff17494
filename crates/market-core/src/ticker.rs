//! Price ticker: the random walk driving the asset list.
//!
//! Each tick moves every price by a uniform draw in `[-band, band)` of
//! itself and rounds to the category precision. There is no bound and
//! no mean reversion, so prices can drift arbitrarily far over a long
//! session.

use rand::Rng;

use crate::asset::{round_to, Asset};
use crate::registry::AssetRegistry;

/// Default half-width of the per-tick move (0.1%).
pub const DEFAULT_PRICE_BAND: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceTicker {
    band: f64,
}

impl Default for PriceTicker {
    fn default() -> Self {
        PriceTicker::new(DEFAULT_PRICE_BAND)
    }
}

impl PriceTicker {
    pub fn new(band: f64) -> Self {
        PriceTicker { band: band.abs() }
    }

    pub fn band(&self) -> f64 {
        self.band
    }

    /// New snapshot of `asset` one tick later.
    pub fn perturb<R: Rng + ?Sized>(&self, asset: &Asset, rng: &mut R) -> Asset {
        let drift = if self.band > 0.0 {
            rng.gen_range(-self.band..self.band)
        } else {
            0.0
        };
        let price = round_to(
            asset.price + asset.price * drift,
            asset.category.price_decimals(),
        );

        Asset {
            price,
            previous_price: Some(asset.price),
            ..asset.clone()
        }
    }

    /// Perturb every asset of the registry, in registry order.
    ///
    /// The caller swaps the result in with [`AssetRegistry::replace_all`].
    pub fn tick<R: Rng + ?Sized>(&self, registry: &AssetRegistry, rng: &mut R) -> Vec<Asset> {
        registry.iter().map(|asset| self.perturb(asset, rng)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::AssetCategory;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn move_stays_inside_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let ticker = PriceTicker::default();
        let asset = Asset::new("aapl", "Apple Inc", "AAPL", 172.58, 0.87, AssetCategory::Stocks);

        for _ in 0..500 {
            let next = ticker.perturb(&asset, &mut rng);
            // band plus half a cent of rounding
            assert!((next.price - asset.price).abs() <= 172.58 * 0.001 + 0.005);
            assert_eq!(next.previous_price, Some(172.58));
        }
    }

    #[test]
    fn zero_band_keeps_price() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let ticker = PriceTicker::new(0.0);
        let asset = Asset::new("gbpusd", "GBP/USD", "GBP/USD", 1.2651, 0.16, AssetCategory::Forex);

        let next = ticker.perturb(&asset, &mut rng);
        assert_eq!(next.price, 1.2651);
    }
}
