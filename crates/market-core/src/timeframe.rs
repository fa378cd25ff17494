//! Chart timeframes (candle bucket widths).

use std::fmt;
use std::str::FromStr;

use chrono::Duration;

use crate::error::MarketError;

/// Bucket width of one candle, one minute through one day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Timeframe {
    #[default]
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    OneHour,
    FourHours,
    OneDay,
}

impl Timeframe {
    pub const ALL: [Timeframe; 6] = [
        Timeframe::OneMinute,
        Timeframe::FiveMinutes,
        Timeframe::FifteenMinutes,
        Timeframe::OneHour,
        Timeframe::FourHours,
        Timeframe::OneDay,
    ];

    pub fn seconds(self) -> i64 {
        match self {
            Timeframe::OneMinute => 60,
            Timeframe::FiveMinutes => 5 * 60,
            Timeframe::FifteenMinutes => 15 * 60,
            Timeframe::OneHour => 60 * 60,
            Timeframe::FourHours => 4 * 60 * 60,
            Timeframe::OneDay => 24 * 60 * 60,
        }
    }

    /// Time between two consecutive candles.
    pub fn duration(self) -> Duration {
        Duration::seconds(self.seconds())
    }

    /// Short code: `1m`, `5m`, `15m`, `1h`, `4h`, `1d`.
    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::OneMinute => "1m",
            Timeframe::FiveMinutes => "5m",
            Timeframe::FifteenMinutes => "15m",
            Timeframe::OneHour => "1h",
            Timeframe::FourHours => "4h",
            Timeframe::OneDay => "1d",
        }
    }

    /// Button label in the timeframe bar.
    pub fn label(self) -> &'static str {
        match self {
            Timeframe::OneMinute => "1 min",
            Timeframe::FiveMinutes => "5 min",
            Timeframe::FifteenMinutes => "15 min",
            Timeframe::OneHour => "1 hour",
            Timeframe::FourHours => "4 hour",
            Timeframe::OneDay => "1 day",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|tf| *tf == self)
            .unwrap_or_default()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::ALL
            .iter()
            .copied()
            .find(|tf| tf.as_str() == s.trim())
            .ok_or_else(|| MarketError::UnknownTimeframe(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycling_wraps_both_ways() {
        assert_eq!(Timeframe::OneMinute.prev(), Timeframe::OneDay);
        assert_eq!(Timeframe::OneDay.next(), Timeframe::OneMinute);
        assert_eq!(Timeframe::FifteenMinutes.next(), Timeframe::OneHour);

        let mut tf = Timeframe::default();
        for _ in 0..Timeframe::ALL.len() {
            tf = tf.prev();
        }
        assert_eq!(tf, Timeframe::OneMinute);
    }

    #[test]
    fn parses_short_codes() {
        assert_eq!("15m".parse::<Timeframe>(), Ok(Timeframe::FifteenMinutes));
        assert_eq!(" 4h ".parse::<Timeframe>(), Ok(Timeframe::FourHours));
        assert_eq!(
            "2h".parse::<Timeframe>(),
            Err(MarketError::UnknownTimeframe("2h".to_string()))
        );
    }

    #[test]
    fn spacing_matches_code() {
        assert_eq!(Timeframe::OneHour.duration().num_seconds(), 3_600);
        assert_eq!(Timeframe::OneDay.seconds(), 86_400);
        assert_eq!(Timeframe::FiveMinutes.to_string(), "5m");
        assert_eq!(Timeframe::OneHour.label(), "1 hour");
    }
}
