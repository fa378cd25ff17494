//! Asset categories and the category filter of the asset list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MarketError;

/// Closed set of asset categories.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Crypto,
    Stocks,
    Forex,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 3] = [
        AssetCategory::Crypto,
        AssetCategory::Stocks,
        AssetCategory::Forex,
    ];

    /// Decimal digits a price in this category is rounded and shown with.
    ///
    /// Forex quotes carry four digits, everything else two.
    pub fn price_decimals(self) -> usize {
        match self {
            AssetCategory::Forex => 4,
            AssetCategory::Crypto | AssetCategory::Stocks => 2,
        }
    }

    /// Lowercase name used in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            AssetCategory::Crypto => "crypto",
            AssetCategory::Stocks => "stocks",
            AssetCategory::Forex => "forex",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AssetCategory::Crypto => "Crypto",
            AssetCategory::Stocks => "Stocks",
            AssetCategory::Forex => "Forex",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AssetCategory {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "crypto" => Ok(AssetCategory::Crypto),
            "stocks" => Ok(AssetCategory::Stocks),
            "forex" => Ok(AssetCategory::Forex),
            _ => Err(MarketError::UnknownCategory(s.to_string())),
        }
    }
}

/// Category tab of the asset list: everything, or a single category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(AssetCategory),
}

impl CategoryFilter {
    pub fn matches(self, category: AssetCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }

    /// Next tab, wrapping `All -> Crypto -> Stocks -> Forex -> All`.
    pub fn next(self) -> Self {
        match self {
            CategoryFilter::All => CategoryFilter::Only(AssetCategory::Crypto),
            CategoryFilter::Only(AssetCategory::Crypto) => CategoryFilter::Only(AssetCategory::Stocks),
            CategoryFilter::Only(AssetCategory::Stocks) => CategoryFilter::Only(AssetCategory::Forex),
            CategoryFilter::Only(AssetCategory::Forex) => CategoryFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All Assets",
            CategoryFilter::Only(category) => category.label(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}
