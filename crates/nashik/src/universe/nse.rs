//! Watchlist of NSE-listed small and mid caps.

use std::collections::HashMap;

/// A watchlist company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constituent {
    /// Display name.
    pub name: String,
    /// Exchange ticker, with the `.NS` suffix.
    pub symbol: String,
}

impl Constituent {
    /// Create a new constituent.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
        }
    }
}

/// Fixed watchlist of NSE companies, in display order.
#[derive(Debug, Clone)]
pub struct NseWatchlist {
    constituents: Vec<Constituent>,
    name_to_symbol: HashMap<String, String>,
}

impl NseWatchlist {
    /// Create the watchlist with its default constituents.
    pub fn new() -> Self {
        let constituents = Self::default_constituents();
        let name_to_symbol = constituents
            .iter()
            .map(|c| (c.name.clone(), c.symbol.clone()))
            .collect();

        Self {
            constituents,
            name_to_symbol,
        }
    }

    /// Get all constituents.
    pub fn constituents(&self) -> &[Constituent] {
        &self.constituents
    }

    /// Get all symbols.
    pub fn symbols(&self) -> Vec<String> {
        self.constituents.iter().map(|c| c.symbol.clone()).collect()
    }

    /// Ticker for a display name.
    pub fn symbol_of(&self, name: &str) -> Option<&str> {
        self.name_to_symbol.get(name).map(String::as_str)
    }

    /// Display name for a ticker.
    pub fn name_of(&self, symbol: &str) -> Option<&str> {
        self.constituents
            .iter()
            .find(|c| c.symbol == symbol)
            .map(|c| c.name.as_str())
    }

    fn default_constituents() -> Vec<Constituent> {
        [
            ("KNR Constructions", "KNRCON.NS"),
            ("Jyoti Resins", "JYOTIRES.NS"),
            ("Maharashtra Seamless", "MAHSEAMLES.NS"),
            ("Vesuvius India", "VESUVIUS.NS"),
            ("Gujarat Pipavav", "GPPL.NS"),
            ("India Glycols", "INDIAGLYCO.NS"),
            ("Avantel", "AVANTEL.NS"),
            ("Gulf Oil Lubricants", "GULFOILLUB.NS"),
            ("Poddar Pigments", "PODDARMENT.NS"),
            ("DCX Systems", "DCXINDIA.NS"),
        ]
        .into_iter()
        .map(|(name, symbol)| Constituent::new(name, symbol))
        .collect()
    }
}

impl Default for NseWatchlist {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[test]
    fn test_watchlist_order() {
        let watchlist = NseWatchlist::new();
        let first = &watchlist.constituents()[0];
        let last = &watchlist.constituents()[9];
        assert_eq!(first.name, "KNR Constructions");
        assert_eq!(last.symbol, "DCXINDIA.NS");
    }

    #[test]
    fn test_symbols_unique() {
        let symbols = NseWatchlist::new().symbols();
        let unique: HashSet<_> = symbols.iter().collect();
        assert_eq!(unique.len(), symbols.len());
        assert!(symbols.iter().all(|s| s.ends_with(".NS")));
    }

    #[rstest]
    #[case("Gujarat Pipavav", "GPPL.NS")]
    #[case("Poddar Pigments", "PODDARMENT.NS")]
    #[case("Avantel", "AVANTEL.NS")]
    fn test_lookup(#[case] name: &str, #[case] symbol: &str) {
        let watchlist = NseWatchlist::new();
        assert_eq!(watchlist.symbol_of(name), Some(symbol));
        assert_eq!(watchlist.name_of(symbol), Some(name));
    }

    #[test]
    fn test_unknown_lookup() {
        let watchlist = NseWatchlist::default();
        assert_eq!(watchlist.symbol_of("Reliance"), None);
        assert_eq!(watchlist.name_of("RELIANCE.NS"), None);
    }
}
