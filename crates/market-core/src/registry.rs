//! Asset registry and the search / category filter over it.

use indexmap::IndexMap;

use crate::asset::Asset;
use crate::category::CategoryFilter;
use crate::error::{MarketError, Result};

/// Ordered set of assets keyed by id.
///
/// Insertion order is display order. Updates replace the whole set
/// (see [`AssetRegistry::replace_all`]) rather than mutating in place.
#[derive(Debug, Clone)]
pub struct AssetRegistry {
    assets: IndexMap<String, Asset>,
}

impl AssetRegistry {
    /// Build a registry from a non-empty list with unique ids.
    pub fn new(assets: Vec<Asset>) -> Result<Self> {
        if assets.is_empty() {
            return Err(MarketError::EmptyUniverse);
        }

        let mut map = IndexMap::with_capacity(assets.len());
        for asset in assets {
            if map.contains_key(&asset.id) {
                return Err(MarketError::DuplicateAsset(asset.id));
            }
            map.insert(asset.id.clone(), asset);
        }

        Ok(AssetRegistry { assets: map })
    }

    pub fn get(&self, id: &str) -> Option<&Asset> {
        self.assets.get(id)
    }

    /// Like [`get`](Self::get) but as an error for unknown ids.
    pub fn require(&self, id: &str) -> Result<&Asset> {
        self.get(id)
            .ok_or_else(|| MarketError::UnknownAsset(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.assets.values()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Swap in a fresh set of snapshots (e.g. the output of a price tick).
    pub fn replace_all(&mut self, assets: Vec<Asset>) {
        self.assets = assets
            .into_iter()
            .map(|asset| (asset.id.clone(), asset))
            .collect();
    }
}

/// Search box + category tab of the asset list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetFilter {
    pub query: String,
    pub category: CategoryFilter,
}

impl AssetFilter {
    pub fn new(query: impl Into<String>, category: CategoryFilter) -> Self {
        AssetFilter {
            query: query.into(),
            category,
        }
    }

    /// Assets visible under this filter, in registry order.
    ///
    /// An empty query matches everything; a query nothing matches yields
    /// an empty list.
    pub fn apply<'a>(&self, registry: &'a AssetRegistry) -> Vec<&'a Asset> {
        let needle = self.query.to_lowercase();

        registry
            .iter()
            .filter(|asset| needle.is_empty() || asset.matches_query(&needle))
            .filter(|asset| self.category.matches(asset.category))
            .collect()
    }
}
