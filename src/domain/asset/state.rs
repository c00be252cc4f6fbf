//! Snapshot-feed state container — app-owned, crate-provided update logic.

use super::CanonicalAsset;
use crate::domain::mover::MoverSet;
use crate::shared::{AssetClass, Symbol};
use std::collections::HashMap;

/// Latest successful result of each one-shot snapshot feed.
///
/// Feeds that fail are simply not applied, so the previous value stays.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    most_active: Vec<CanonicalAsset>,
    movers: HashMap<AssetClass, MoverSet>,
    symbols: HashMap<AssetClass, Vec<Symbol>>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_most_active(&mut self, assets: Vec<CanonicalAsset>) {
        self.most_active = assets;
    }

    pub fn apply_movers(&mut self, class: AssetClass, movers: MoverSet) {
        self.movers.insert(class, movers);
    }

    pub fn apply_symbols(&mut self, class: AssetClass, symbols: Vec<Symbol>) {
        self.symbols.insert(class, symbols);
    }

    pub fn most_active(&self) -> &[CanonicalAsset] {
        &self.most_active
    }

    pub fn movers(&self, class: AssetClass) -> Option<&MoverSet> {
        self.movers.get(&class)
    }

    pub fn symbols(&self, class: AssetClass) -> &[Symbol] {
        self.symbols.get(&class).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.most_active.clear();
        self.movers.clear();
        self.symbols.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_most_active_replaces() {
        let mut state = DashboardState::new();
        state.apply_most_active(vec![CanonicalAsset::from_symbol("A")]);
        state.apply_most_active(vec![
            CanonicalAsset::from_symbol("B"),
            CanonicalAsset::from_symbol("C"),
        ]);
        assert_eq!(state.most_active().len(), 2);
        assert_eq!(state.most_active()[0].symbol.as_str(), "B");
    }

    #[test]
    fn test_movers_keyed_by_asset_class() {
        let mut state = DashboardState::new();
        state.apply_movers(
            AssetClass::Crypto,
            MoverSet::List {
                items: vec![CanonicalAsset::from_symbol("BTC/USD")],
            },
        );
        assert!(state.movers(AssetClass::UsEquity).is_none());
        assert_eq!(state.movers(AssetClass::Crypto).unwrap().len(), 1);
    }

    #[test]
    fn test_symbols_default_empty() {
        let mut state = DashboardState::new();
        assert!(state.symbols(AssetClass::UsEquity).is_empty());
        state.apply_symbols(AssetClass::UsEquity, vec![Symbol::from("AAPL")]);
        assert_eq!(state.symbols(AssetClass::UsEquity), [Symbol::from("AAPL")]);
        state.clear();
        assert!(state.symbols(AssetClass::UsEquity).is_empty());
    }
}
