use std::collections::HashMap;

use rand::Rng;

use crate::config::TownConfig;
use crate::market::{Market, Treasury};
use crate::production::{Profession, Schematic};
use crate::survival::{SurvivalRules, is_starving};
use crate::types::{CitizenId, Hunger, Material, Money, ProfessionId, Quantity};

use super::pricing::{PricingRules, asking_price};

pub const DEFAULT_MONEY: Money = 100;

// === OUTCOMES ===

/// Result of one production attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkOutcome {
    /// Inputs were bought and the output listed
    Produced {
        spent: Money,
        material: Material,
        quantity: Quantity,
        price: Money,
    },
    /// Inputs missing from the market or too expensive; nothing happened
    Unaffordable,
    /// The citizen's schematic could not be resolved
    Idle,
}

/// What a citizen did during one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayOutcome {
    pub ate: Option<Material>,
    pub work: WorkOutcome,
}

// === CITIZEN ===

/// A single agent: earns by producing, spends on inputs and food.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citizen {
    pub id: CitizenId,
    pub profession: ProfessionId,
    /// Index into the profession's schematics
    pub schematic: usize,
    pub money: Money,
    pub hunger: Hunger,
}

impl Citizen {
    pub fn new(id: CitizenId, profession: ProfessionId) -> Self {
        Self {
            id,
            profession,
            schematic: 0,
            money: DEFAULT_MONEY,
            hunger: 0,
        }
    }

    pub fn with_money(mut self, money: Money) -> Self {
        self.money = money;
        self
    }

    pub fn with_hunger(mut self, hunger: Hunger) -> Self {
        self.hunger = hunger;
        self
    }

    /// Switch to another schematic of the citizen's profession.
    /// Returns false (and changes nothing) if `index` is out of range.
    pub fn set_schematic(&mut self, profession: &Profession, index: usize) -> bool {
        if profession.schematic(index).is_none() {
            return false;
        }
        self.schematic = index;
        true
    }

    pub fn is_alive(&self) -> bool {
        !is_starving(self.hunger)
    }

    /// Buy one unit, paying its producer. `others` holds every citizen
    /// except this one.
    pub fn buy<T: Treasury + ?Sized>(
        &mut self,
        market: &mut Market,
        material: Material,
        others: &mut T,
    ) -> Option<Money> {
        let mut payees = Counterparties {
            me: &mut *self,
            others,
        };
        let price = market.buy(material, &mut payees)?;
        self.money -= price;
        Some(price)
    }

    /// Whether every input of `schematic` is listed in full and the cheapest
    /// units together cost no more than the citizen holds.
    pub fn can_afford(&self, schematic: &Schematic, market: &Market) -> bool {
        let mut total: Money = 0;
        for (material, quantity) in schematic.requirements() {
            match market.quote(material, quantity) {
                Some(cost) => total += cost,
                None => return false,
            }
        }
        total <= self.money
    }

    /// Eat if hungry: buy the cheapest listed food when it costs strictly
    /// less than the citizen's money. Returns the food eaten.
    pub fn feed<T: Treasury + ?Sized>(
        &mut self,
        market: &mut Market,
        others: &mut T,
        survival: &SurvivalRules,
    ) -> Option<Material> {
        if !is_starving(self.hunger) {
            return None;
        }

        // First food wins on equal price
        let (food, price) = survival
            .foods
            .iter()
            .filter_map(|f| market.cheapest(f.material).map(|l| (*f, l.price)))
            .min_by_key(|(_, price)| *price)?;

        if price >= self.money {
            return None;
        }

        self.buy(market, food.material, others)?;
        self.hunger = survival.gain(self.hunger, food.nutrition);
        Some(food.material)
    }

    /// Run one production cycle of `schematic`.
    ///
    /// Inputs are bought unit by unit from the cheapest listings, then the
    /// whole output is listed at a single asking price.
    pub fn work<T: Treasury + ?Sized, R: Rng>(
        &mut self,
        schematic: &Schematic,
        market: &mut Market,
        others: &mut T,
        pricing: &PricingRules,
        rng: &mut R,
    ) -> WorkOutcome {
        if !self.can_afford(schematic, market) {
            return WorkOutcome::Unaffordable;
        }

        let mut spent: Money = 0;
        for (material, quantity) in schematic.requirements() {
            for _ in 0..quantity {
                match self.buy(market, material, others) {
                    Some(price) => spent += price,
                    None => break,
                }
            }
        }

        let (material, quantity) = schematic.output;
        let price = asking_price(pricing, market.cheapest(material), self.id, rng);
        market.sell(material, quantity, price, self.id);

        WorkOutcome::Produced {
            spent,
            material,
            quantity,
            price,
        }
    }

    /// The daily routine: hunger decays, a hungry citizen tries to eat, then
    /// the citizen works. Death is judged by the caller afterwards.
    pub fn live_day<T: Treasury + ?Sized, R: Rng>(
        &mut self,
        schematic: Option<&Schematic>,
        market: &mut Market,
        others: &mut T,
        config: &TownConfig,
        rng: &mut R,
    ) -> DayOutcome {
        self.hunger = config.survival.decay(self.hunger);
        let ate = self.feed(market, others, &config.survival);
        let work = match schematic {
            Some(schematic) => self.work(schematic, market, others, &config.pricing, rng),
            None => WorkOutcome::Idle,
        };
        DayOutcome { ate, work }
    }
}

// === PAYMENT ROUTING ===

/// Routes a credit to the acting citizen when it bought its own listing,
/// and to the rest of the population otherwise.
struct Counterparties<'a, T: Treasury + ?Sized> {
    me: &'a mut Citizen,
    others: &'a mut T,
}

impl<T: Treasury + ?Sized> Treasury for Counterparties<'_, T> {
    fn credit(&mut self, producer: CitizenId, amount: Money) -> bool {
        if producer == self.me.id {
            self.me.money += amount;
            true
        } else {
            self.others.credit(producer, amount)
        }
    }
}

impl Treasury for HashMap<CitizenId, Citizen> {
    fn credit(&mut self, producer: CitizenId, amount: Money) -> bool {
        match self.get_mut(&producer) {
            Some(citizen) => {
                citizen.money += amount;
                true
            }
            None => false,
        }
    }
}
