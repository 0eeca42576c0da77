use crate::types::{CitizenId, Money};

// === LISTINGS & PAYMENT ===

/// One unit of a material offered for sale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Listing {
    pub producer: CitizenId,
    pub price: Money,
}

/// Where the proceeds of a sale go.
///
/// The market only knows producers by id; whoever owns the citizens decides
/// how a credit reaches them. Returns `false` when the producer no longer
/// exists and the payment is forfeited.
pub trait Treasury {
    fn credit(&mut self, producer: CitizenId, amount: Money) -> bool;
}
