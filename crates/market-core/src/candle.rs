//! Synthetic candle series.
//!
//! Generation is a random walk seeded from a base price:
//! - bars run oldest to newest, the last one stamped `now`;
//! - each bar opens at the previous close (the first at the base price);
//! - high / low are the open plus / minus a random share of the
//!   volatility (a fixed fraction of the base price);
//! - close is the mean of open/high/low plus jitter of up to half the
//!   volatility either way.
//!
//! Close is not clamped into `[low, high]`, and nothing ties the series
//! to any real history: generating twice gives two different charts
//! unless the caller hands in identically seeded RNGs.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::timeframe::Timeframe;

/// Default volatility as a fraction of the base price (2%).
pub const DEFAULT_CANDLE_VOLATILITY: f64 = 0.02;

/// Longest series a generator produces.
pub const MAX_CANDLE_COUNT: usize = 10_000;

/// One OHLC bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    /// Lowest and highest value the bar reaches, close included.
    pub fn extent(&self) -> (f64, f64) {
        (self.low.min(self.close), self.high.max(self.close))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleGenerator {
    volatility_ratio: f64,
}

impl Default for CandleGenerator {
    fn default() -> Self {
        CandleGenerator::new(DEFAULT_CANDLE_VOLATILITY)
    }
}

impl CandleGenerator {
    pub fn new(volatility_ratio: f64) -> Self {
        CandleGenerator { volatility_ratio }
    }

    pub fn volatility_ratio(&self) -> f64 {
        self.volatility_ratio
    }

    /// Generate exactly `count` bars ending at `now`, `count` being
    /// capped at [`MAX_CANDLE_COUNT`].
    pub fn generate<R: Rng + ?Sized>(
        &self,
        base_price: f64,
        count: usize,
        timeframe: Timeframe,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Vec<Candle> {
        let count = count.min(MAX_CANDLE_COUNT);
        let volatility = base_price * self.volatility_ratio;
        let step = timeframe.seconds();

        let mut candles = Vec::with_capacity(count);
        let mut last_close = base_price;

        for i in 0..count {
            let bars_back = (count - 1 - i) as i64;
            let open = last_close;
            let high = open + rng.gen::<f64>() * volatility;
            let low = open - rng.gen::<f64>() * volatility;
            let close = (open + high + low) / 3.0 + (rng.gen::<f64>() * volatility - volatility / 2.0);

            candles.push(Candle {
                timestamp: now - Duration::seconds(step * bars_back),
                open,
                high,
                low,
                close,
            });

            last_close = close;
        }

        candles
    }
}

/// `(min, max)` over a series, or `None` when it is empty.
pub fn price_bounds(candles: &[Candle]) -> Option<(f64, f64)> {
    candles.iter().map(Candle::extent).reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 15, 0, 0).unwrap()
    }

    #[test]
    fn bars_chain_open_to_previous_close() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let candles = CandleGenerator::default().generate(
            3052.87,
            100,
            Timeframe::FifteenMinutes,
            now(),
            &mut rng,
        );

        assert_eq!(candles.len(), 100);
        assert_eq!(candles[0].open, 3052.87);
        for pair in candles.windows(2) {
            assert_eq!(pair[1].open, pair[0].close);
            assert_eq!((pair[1].timestamp - pair[0].timestamp).num_seconds(), 15 * 60);
        }
        assert_eq!(candles[99].timestamp, now());
    }

    #[test]
    fn high_and_low_bracket_open_within_volatility() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let base = 100.0;
        let volatility = base * DEFAULT_CANDLE_VOLATILITY;
        let candles = CandleGenerator::default().generate(base, 250, Timeframe::OneMinute, now(), &mut rng);

        for candle in &candles {
            assert!(candle.high >= candle.open && candle.high - candle.open <= volatility);
            assert!(candle.low <= candle.open && candle.open - candle.low <= volatility);
        }
    }

    #[test]
    fn longest_daily_series_reaches_back() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let generator = CandleGenerator::default();

        let candles = generator.generate(1.2651, MAX_CANDLE_COUNT, Timeframe::OneDay, now(), &mut rng);
        assert_eq!(candles.len(), MAX_CANDLE_COUNT);
        assert_eq!((now() - candles[0].timestamp).num_days(), MAX_CANDLE_COUNT as i64 - 1);

        let capped = generator.generate(1.2651, MAX_CANDLE_COUNT + 500, Timeframe::OneDay, now(), &mut rng);
        assert_eq!(capped.len(), MAX_CANDLE_COUNT);
        assert_eq!(capped.last().unwrap().timestamp, now());
    }

    #[test]
    fn zero_count_is_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let candles = CandleGenerator::default().generate(1.0, 0, Timeframe::OneDay, now(), &mut rng);
        assert!(candles.is_empty());
        assert_eq!(price_bounds(&candles), None);
    }

    #[test]
    fn same_seed_same_series() {
        let generator = CandleGenerator::default();
        let a = generator.generate(50.0, 20, Timeframe::OneHour, now(), &mut ChaCha8Rng::seed_from_u64(77));
        let b = generator.generate(50.0, 20, Timeframe::OneHour, now(), &mut ChaCha8Rng::seed_from_u64(77));
        assert_eq!(a, b);
    }
}
