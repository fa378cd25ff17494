//! Direction (Buy / Sell) of a paper order.

/// Order direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Buy,
    Sell,
}

impl Direction {
    /// Upper-case label shown in the order panel and notices.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Buy => "BUY",
            Direction::Sell => "SELL",
        }
    }
}
