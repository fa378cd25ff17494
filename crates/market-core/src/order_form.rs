//! Order-entry form state.
//!
//! The amount limits are those of the input widget only: the min/max
//! bound the `+`/`-` steps, while a typed amount is accepted as long as
//! it is a positive number. Nothing checks the amount against the
//! balance.

use rand::Rng;

use crate::asset::Asset;
use crate::direction::Direction;
use crate::error::{MarketError, Result};
use crate::order::OrderDraft;

pub const MIN_ORDER_AMOUNT: f64 = 10.0;
pub const MAX_ORDER_AMOUNT: f64 = 10_000.0;
pub const AMOUNT_STEP: f64 = 10.0;
pub const DEFAULT_ORDER_AMOUNT: f64 = 100.0;

/// Distance of the suggested take-profit / stop-loss from the price.
const LEVEL_OFFSET: f64 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderForm {
    amount: f64,
    direction: Direction,
    take_profit: Option<f64>,
    stop_loss: Option<f64>,
}

impl Default for OrderForm {
    fn default() -> Self {
        OrderForm {
            amount: DEFAULT_ORDER_AMOUNT,
            direction: Direction::Buy,
            take_profit: None,
            stop_loss: None,
        }
    }
}

impl OrderForm {
    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn take_profit(&self) -> Option<f64> {
        self.take_profit
    }

    pub fn stop_loss(&self) -> Option<f64> {
        self.stop_loss
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Upper widget limit: 10 000 or the balance, whichever is lower.
    pub fn max_amount(balance: f64) -> f64 {
        MAX_ORDER_AMOUNT.min(balance)
    }

    pub fn increase_amount(&mut self, balance: f64) {
        self.amount = clamp_amount(self.amount + AMOUNT_STEP, balance);
    }

    pub fn decrease_amount(&mut self, balance: f64) {
        self.amount = clamp_amount(self.amount - AMOUNT_STEP, balance);
    }

    /// Typed amount from the input field.
    pub fn set_amount_input(&mut self, input: &str) -> Result<()> {
        self.amount = parse_positive(input)
            .ok_or_else(|| MarketError::InvalidAmount(input.trim().to_string()))?;
        Ok(())
    }

    /// Switch take-profit on (5% in the favourable direction) or off.
    pub fn toggle_take_profit(&mut self, reference_price: f64) {
        self.take_profit = match self.take_profit {
            Some(_) => None,
            None => Some(match self.direction {
                Direction::Buy => reference_price * (1.0 + LEVEL_OFFSET),
                Direction::Sell => reference_price * (1.0 - LEVEL_OFFSET),
            }),
        };
    }

    /// Switch stop-loss on (5% in the adverse direction) or off.
    pub fn toggle_stop_loss(&mut self, reference_price: f64) {
        self.stop_loss = match self.stop_loss {
            Some(_) => None,
            None => Some(match self.direction {
                Direction::Buy => reference_price * (1.0 - LEVEL_OFFSET),
                Direction::Sell => reference_price * (1.0 + LEVEL_OFFSET),
            }),
        };
    }

    pub fn set_take_profit_input(&mut self, input: &str) -> Result<()> {
        self.take_profit = Some(parse_level(input)?);
        Ok(())
    }

    pub fn set_stop_loss_input(&mut self, input: &str) -> Result<()> {
        self.stop_loss = Some(parse_level(input)?);
        Ok(())
    }

    /// Turn the form into a draft against the selected asset snapshot.
    pub fn draft(&self, selected: Option<&Asset>) -> Result<OrderDraft> {
        let asset = selected.ok_or(MarketError::NoAssetSelected)?;

        Ok(OrderDraft {
            asset_id: asset.id.clone(),
            asset_symbol: asset.symbol.clone(),
            direction: self.direction,
            amount: self.amount,
            price: asset.price,
            take_profit: self.take_profit,
            stop_loss: self.stop_loss,
        })
    }

    /// Clear the stop levels after a placement; amount and direction stay.
    pub fn reset_levels(&mut self) {
        self.take_profit = None;
        self.stop_loss = None;
    }
}

/// Random "high volatility" gate in front of a placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilityCheck {
    probability: f64,
}

impl Default for VolatilityCheck {
    fn default() -> Self {
        VolatilityCheck::new(0.2)
    }
}

impl VolatilityCheck {
    pub fn new(probability: f64) -> Self {
        let probability = if probability.is_finite() {
            probability.clamp(0.0, 1.0)
        } else {
            0.0
        };
        VolatilityCheck { probability }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// `true` when the user has to confirm before the order goes through.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.gen_bool(self.probability)
    }
}

// When the balance drops under the minimum, the minimum wins.
fn clamp_amount(value: f64, balance: f64) -> f64 {
    value.min(OrderForm::max_amount(balance)).max(MIN_ORDER_AMOUNT)
}

fn parse_positive(input: &str) -> Option<f64> {
    let value: f64 = input.trim().parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

fn parse_level(input: &str) -> Result<f64> {
    parse_positive(input).ok_or_else(|| MarketError::InvalidPrice(input.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::AssetCategory;

    fn btc() -> Asset {
        Asset::new("btc-usdt", "Bitcoin", "BTC/USDT", 100.0, 2.35, AssetCategory::Crypto)
    }

    #[test]
    fn steps_stay_inside_widget_limits() {
        let mut form = OrderForm::default();
        for _ in 0..20 {
            form.decrease_amount(10_000.0);
        }
        assert_eq!(form.amount(), MIN_ORDER_AMOUNT);

        for _ in 0..50 {
            form.increase_amount(150.0);
        }
        assert_eq!(form.amount(), 150.0);
    }

    #[test]
    fn minimum_wins_when_balance_is_tiny() {
        let mut form = OrderForm::default();
        form.decrease_amount(-500.0);
        assert_eq!(form.amount(), MIN_ORDER_AMOUNT);
    }

    #[test]
    fn typed_amount_ignores_widget_limits() {
        let mut form = OrderForm::default();
        form.set_amount_input("25000").unwrap();
        assert_eq!(form.amount(), 25_000.0);

        assert_eq!(
            form.set_amount_input("abc"),
            Err(MarketError::InvalidAmount("abc".to_string()))
        );
        assert!(form.set_amount_input("-5").is_err());
        assert_eq!(form.amount(), 25_000.0);
    }

    #[test]
    fn levels_depend_on_direction() {
        let mut form = OrderForm::default();
        form.toggle_take_profit(100.0);
        form.toggle_stop_loss(100.0);
        assert!((form.take_profit().unwrap() - 105.0).abs() < 1e-9);
        assert!((form.stop_loss().unwrap() - 95.0).abs() < 1e-9);

        form.reset_levels();
        form.set_direction(Direction::Sell);
        form.toggle_take_profit(100.0);
        form.toggle_stop_loss(100.0);
        assert!((form.take_profit().unwrap() - 95.0).abs() < 1e-9);
        assert!((form.stop_loss().unwrap() - 105.0).abs() < 1e-9);

        form.toggle_take_profit(100.0);
        assert_eq!(form.take_profit(), None);
    }

    #[test]
    fn draft_needs_an_asset() {
        let form = OrderForm::default();
        assert_eq!(form.draft(None), Err(MarketError::NoAssetSelected));

        let asset = btc();
        let draft = form.draft(Some(&asset)).unwrap();
        assert_eq!(draft.asset_symbol, "BTC/USDT");
        assert_eq!(draft.price, 100.0);
        assert_eq!(draft.amount, DEFAULT_ORDER_AMOUNT);
    }

    #[test]
    fn volatility_check_extremes() {
        use rand::SeedableRng;
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(3);

        assert!(!VolatilityCheck::new(0.0).roll(&mut rng));
        assert!(VolatilityCheck::new(1.0).roll(&mut rng));
        assert_eq!(VolatilityCheck::new(4.0).probability(), 1.0);
        assert_eq!(VolatilityCheck::new(f64::NAN).probability(), 0.0);
    }
}
