// Price-ordered order book for a single material

use std::collections::BTreeMap;

use crate::types::{CitizenId, Money, Quantity};

use super::orders::Listing;

/// Unsold listings of one material, ordered by ascending price.
///
/// Keys are `(price, seq)` so equal prices leave in insertion order and
/// iteration always matches extraction order.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    listings: BTreeMap<(Money, u64), CitizenId>,
    next_seq: u64,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, listing: Listing) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.listings.insert((listing.price, seq), listing.producer);
    }

    /// Remove and return the cheapest listing
    pub fn pop_cheapest(&mut self) -> Option<Listing> {
        self.listings
            .pop_first()
            .map(|((price, _), producer)| Listing { producer, price })
    }

    pub fn cheapest(&self) -> Option<Listing> {
        self.listings
            .first_key_value()
            .map(|((price, _), producer)| Listing {
                producer: *producer,
                price: *price,
            })
    }

    /// Total price of the `quantity` cheapest listings, or `None` if fewer are listed.
    pub fn quote(&self, quantity: Quantity) -> Option<Money> {
        let quantity = quantity as usize;
        if quantity > self.listings.len() {
            return None;
        }
        Some(self.listings.keys().take(quantity).map(|(price, _)| price).sum())
    }

    /// Listings in the order buyers will receive them
    pub fn iter(&self) -> impl Iterator<Item = Listing> + '_ {
        self.listings
            .iter()
            .map(|((price, _), producer)| Listing {
                producer: *producer,
                price: *price,
            })
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(producer: u32, price: Money) -> Listing {
        Listing {
            producer: CitizenId(producer),
            price,
        }
    }

    #[test]
    fn test_pops_in_price_order() {
        let mut book = OrderBook::new();
        for price in [30, 10, 20, 10, 50] {
            book.insert(listing(1, price));
        }

        let prices: Vec<Money> = std::iter::from_fn(|| book.pop_cheapest())
            .map(|l| l.price)
            .collect();
        assert_eq!(prices, vec![10, 10, 20, 30, 50]);
        assert!(book.pop_cheapest().is_none());
    }

    #[test]
    fn test_equal_prices_leave_in_insertion_order() {
        let mut book = OrderBook::new();
        book.insert(listing(1, 15));
        book.insert(listing(2, 15));
        book.insert(listing(3, 15));

        assert_eq!(book.pop_cheapest().unwrap().producer, CitizenId(1));
        assert_eq!(book.pop_cheapest().unwrap().producer, CitizenId(2));
        assert_eq!(book.pop_cheapest().unwrap().producer, CitizenId(3));
    }

    #[test]
    fn test_quote_sums_cheapest_units() {
        let mut book = OrderBook::new();
        for price in [40, 12, 25] {
            book.insert(listing(7, price));
        }

        assert_eq!(book.quote(0), Some(0));
        assert_eq!(book.quote(2), Some(37));
        assert_eq!(book.quote(3), Some(77));
        assert_eq!(book.quote(4), None);
    }

    #[test]
    fn test_quote_matches_extraction_sequence() {
        let mut book = OrderBook::new();
        for price in [90, 11, 54, 11, 23, 70, 23] {
            book.insert(listing(2, price));
        }

        let quoted = book.quote(4).unwrap();
        let extracted: Money = (0..4).map(|_| book.pop_cheapest().unwrap().price).sum();
        assert_eq!(quoted, extracted);
    }

    #[test]
    fn test_cheapest_does_not_remove() {
        let mut book = OrderBook::new();
        assert!(book.cheapest().is_none());
        book.insert(listing(4, 8));
        assert_eq!(book.cheapest(), Some(listing(4, 8)));
        assert_eq!(book.len(), 1);
    }
}
