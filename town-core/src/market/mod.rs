pub mod book;
pub mod orders;

pub use book::OrderBook;
pub use orders::{Listing, Treasury};

use crate::types::{CitizenId, Material, Money, Quantity};

// ============================================================================
// Market - One order book per material
// ============================================================================

/// The town market. Buyers are price takers: every purchase takes the
/// cheapest listing of the requested material.
#[derive(Debug, Clone, Default)]
pub struct Market {
    books: [OrderBook; Material::COUNT],
}

impl Market {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buy the cheapest unit of `material`.
    ///
    /// Returns `None` when nothing is listed; the market is left untouched.
    /// Otherwise the listing is consumed, its price credited to the producer
    /// through `treasury`, and the price returned so the caller can pay it.
    pub fn buy(&mut self, material: Material, treasury: &mut impl Treasury) -> Option<Money> {
        let listing = self.books[material.index()].pop_cheapest()?;
        let delivered = treasury.credit(listing.producer, listing.price);

        #[cfg(feature = "instrument")]
        tracing::debug!(
            target: "market",
            material = material.name(),
            price = listing.price,
            producer = listing.producer.0,
            delivered = delivered,
        );
        let _ = delivered; // Suppress unused warning when feature disabled

        Some(listing.price)
    }

    /// List `quantity` units of `material` at `price`, attributed to `producer`
    pub fn sell(&mut self, material: Material, quantity: Quantity, price: Money, producer: CitizenId) {
        let book = &mut self.books[material.index()];
        for _ in 0..quantity {
            book.insert(Listing { producer, price });
        }
    }

    pub fn cheapest(&self, material: Material) -> Option<Listing> {
        self.books[material.index()].cheapest()
    }

    /// Total cost of the `quantity` cheapest units, `None` if not enough are listed
    pub fn quote(&self, material: Material, quantity: Quantity) -> Option<Money> {
        self.books[material.index()].quote(quantity)
    }

    pub fn listed(&self, material: Material) -> usize {
        self.books[material.index()].len()
    }

    pub fn total_listed(&self) -> usize {
        self.books.iter().map(OrderBook::len).sum()
    }

    pub fn book(&self, material: Material) -> &OrderBook {
        &self.books[material.index()]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    /// Plain id -> money ledger standing in for a population
    #[derive(Default)]
    struct Ledger(HashMap<CitizenId, Money>);

    impl Treasury for Ledger {
        fn credit(&mut self, producer: CitizenId, amount: Money) -> bool {
            match self.0.get_mut(&producer) {
                Some(money) => {
                    *money += amount;
                    true
                }
                None => false,
            }
        }
    }

    #[test]
    fn test_buy_from_empty_book() {
        let mut market = Market::new();
        let mut ledger = Ledger::default();

        assert_eq!(market.buy(Material::Iron, &mut ledger), None);
        assert_eq!(market.total_listed(), 0);
    }

    #[test]
    fn test_buy_pays_producer() {
        let producer = CitizenId(1);
        let mut market = Market::new();
        let mut ledger = Ledger::default();
        ledger.0.insert(producer, 100);

        market.sell(Material::Iron, 3, 5, producer);
        assert_eq!(market.buy(Material::Iron, &mut ledger), Some(5));

        assert_eq!(ledger.0[&producer], 105);
        assert_eq!(market.listed(Material::Iron), 2);
    }

    #[test]
    fn test_books_are_independent() {
        let mut market = Market::new();
        let mut ledger = Ledger::default();
        market.sell(Material::Wheat, 2, 7, CitizenId(3));

        assert_eq!(market.buy(Material::Bread, &mut ledger), None);
        assert_eq!(market.listed(Material::Wheat), 2);
        assert_eq!(market.cheapest(Material::Wheat).map(|l| l.price), Some(7));
    }

    #[test]
    fn test_sale_to_missing_producer_still_completes() {
        let mut market = Market::new();
        let mut ledger = Ledger::default();
        market.sell(Material::Tools, 1, 40, CitizenId(99));

        assert_eq!(market.buy(Material::Tools, &mut ledger), Some(40));
        assert!(ledger.0.is_empty());
        assert_eq!(market.listed(Material::Tools), 0);
    }

    #[test]
    fn test_quote_uses_cheapest_units() {
        let mut market = Market::new();
        market.sell(Material::Iron, 2, 30, CitizenId(1));
        market.sell(Material::Iron, 1, 10, CitizenId(2));

        assert_eq!(market.quote(Material::Iron, 2), Some(40));
        assert_eq!(market.quote(Material::Iron, 4), None);
    }
}
