//! Mover domain — gainers/losers ranking feeds.

#[cfg(feature = "http")]
pub mod client;
pub mod convert;

use crate::domain::asset::CanonicalAsset;
use serde::{Deserialize, Serialize};

pub use convert::normalize_movers;

pub const GAINERS_KEY: &str = "gainers";
pub const LOSERS_KEY: &str = "losers";

/// A movers feed, either one flat ranking or a gainers/losers split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoverSet {
    List {
        items: Vec<CanonicalAsset>,
    },
    Split {
        gainers: Vec<CanonicalAsset>,
        losers: Vec<CanonicalAsset>,
    },
}

impl Default for MoverSet {
    fn default() -> Self {
        MoverSet::List { items: Vec::new() }
    }
}

impl MoverSet {
    pub fn is_split(&self) -> bool {
        matches!(self, MoverSet::Split { .. })
    }

    /// Total number of assets across both sides.
    pub fn len(&self) -> usize {
        match self {
            MoverSet::List { items } => items.len(),
            MoverSet::Split { gainers, losers } => gainers.len() + losers.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every asset, gainers before losers for a split.
    pub fn iter(&self) -> impl Iterator<Item = &CanonicalAsset> {
        let (first, second): (&[CanonicalAsset], &[CanonicalAsset]) = match self {
            MoverSet::List { items } => (items.as_slice(), &[]),
            MoverSet::Split { gainers, losers } => (gainers.as_slice(), losers.as_slice()),
        };
        first.iter().chain(second.iter())
    }
}
