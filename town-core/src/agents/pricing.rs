// Asking-price discovery for freshly produced goods

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::market::Listing;
use crate::types::{CitizenId, Money};

pub const DEFAULT_PRICE_FLOOR: Money = 10;
pub const DEFAULT_PRICE_JITTER: Money = 10;
pub const DEFAULT_OPENING_BAND: (Money, Money) = (50, 150);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingRules {
    /// No listing is ever created below this price
    pub floor: Money,
    /// Undercut/overshoot range around a competitor's cheapest listing
    pub jitter: Money,
    /// Inclusive range an empty book's first price is drawn from
    pub opening_band: (Money, Money),
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            floor: DEFAULT_PRICE_FLOOR,
            jitter: DEFAULT_PRICE_JITTER,
            opening_band: DEFAULT_OPENING_BAND,
        }
    }
}

/// Price a seller asks for its output given the current cheapest listing.
///
/// - nothing listed: uniform draw from the opening band
/// - cheapest listing is the seller's own: keep its price
/// - cheapest listing is a competitor's: its price plus a uniform integer in
///   `[-jitter, jitter]`
///
/// The result is clamped to the floor.
pub fn asking_price<R: Rng>(
    rules: &PricingRules,
    cheapest: Option<Listing>,
    seller: CitizenId,
    rng: &mut R,
) -> Money {
    let price = match cheapest {
        None => {
            let (low, high) = rules.opening_band;
            rng.random_range(low..=high)
        }
        Some(listing) if listing.producer == seller => listing.price,
        Some(listing) => {
            let jitter = rules.jitter.max(0);
            listing
                .price
                .saturating_add(rng.random_range(-jitter..=jitter))
        }
    };
    price.max(rules.floor)
}
