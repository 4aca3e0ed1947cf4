//! Company universes.
//!
//! A universe is the list of companies a ranking is meant to cover. Fetching
//! their fundamentals happens outside the engine.

pub mod nse;

pub use nse::{Constituent, NseWatchlist};

/// Trait for company universes.
pub trait Universe {
    /// Get all symbols in the universe.
    fn symbols(&self) -> Vec<String>;

    /// Check if a symbol is in the universe.
    fn contains(&self, symbol: &str) -> bool {
        self.symbols().iter().any(|s| s == symbol)
    }

    /// Get the number of constituents.
    fn size(&self) -> usize {
        self.symbols().len()
    }
}

impl Universe for NseWatchlist {
    fn symbols(&self) -> Vec<String> {
        self.symbols()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universe_trait() {
        let universe = NseWatchlist::new();

        assert!(Universe::contains(&universe, "GPPL.NS"));
        assert!(!Universe::contains(&universe, "GPPL"));
        assert_eq!(universe.size(), 10);
    }
}
