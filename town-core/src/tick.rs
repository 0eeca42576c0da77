// One simulated day: shuffled citizen turns against a shared market

use std::collections::HashMap;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::agents::{Citizen, WorkOutcome};
use crate::config::TownConfig;
use crate::market::{Market, Treasury};
use crate::types::{CitizenId, Money};

/// Counters accumulated while processing a day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayTally {
    pub processed: u32,
    pub deaths: u32,
    pub meals: u32,
    pub productions: u32,
}

/// Everyone but the citizen whose turn it is: those still waiting for their
/// turn and those already carried into tomorrow.
struct Population<'a> {
    waiting: &'a mut HashMap<CitizenId, Citizen>,
    settled: &'a mut HashMap<CitizenId, Citizen>,
}

impl Treasury for Population<'_> {
    fn credit(&mut self, producer: CitizenId, amount: Money) -> bool {
        self.waiting.credit(producer, amount) || self.settled.credit(producer, amount)
    }
}

/// Give every citizen exactly one turn, in a uniformly shuffled order.
///
/// Each citizen is detached from `citizens` for its turn and only carried
/// into the returned next-day set if it is still fed afterwards. Listings of
/// the starved stay on the market; their proceeds are forfeited.
pub fn run_citizen_turns<R: Rng>(
    day: u64,
    citizens: HashMap<CitizenId, Citizen>,
    market: &mut Market,
    config: &TownConfig,
    rng: &mut R,
) -> (HashMap<CitizenId, Citizen>, DayTally) {
    let mut waiting = citizens;
    let mut settled = HashMap::with_capacity(waiting.len());
    let mut tally = DayTally::default();

    // Sorting first makes the shuffle depend on the seed alone
    let mut order: Vec<CitizenId> = waiting.keys().copied().collect();
    order.sort_unstable();
    order.shuffle(rng);

    for id in order {
        let Some(mut citizen) = waiting.remove(&id) else {
            continue;
        };
        tally.processed += 1;

        let schematic = config
            .catalog
            .get(citizen.profession)
            .and_then(|p| p.schematic(citizen.schematic));

        let outcome = {
            let mut others = Population {
                waiting: &mut waiting,
                settled: &mut settled,
            };
            citizen.live_day(schematic, market, &mut others, config, rng)
        };

        if let Some(food) = outcome.ate {
            tally.meals += 1;
            #[cfg(feature = "instrument")]
            tracing::info!(
                target: "feed",
                day = day,
                citizen = citizen.id.0,
                material = food.name(),
                hunger = citizen.hunger,
                money = citizen.money,
            );
            let _ = food;
        }

        if let WorkOutcome::Produced {
            spent,
            material,
            quantity,
            price,
        } = outcome.work
        {
            tally.productions += 1;
            #[cfg(feature = "instrument")]
            tracing::info!(
                target: "production",
                day = day,
                citizen = citizen.id.0,
                profession = citizen.profession.0,
                material = material.name(),
                quantity = quantity,
                price = price,
                spent = spent,
            );
            let _ = (spent, material, quantity, price);
        }

        if citizen.is_alive() {
            settled.insert(id, citizen);
        } else {
            tally.deaths += 1;
            #[cfg(feature = "instrument")]
            tracing::info!(
                target: "death",
                day = day,
                citizen = citizen.id.0,
                profession = citizen.profession.0,
                hunger = citizen.hunger,
                money = citizen.money,
            );
        }
    }

    let _ = day; // Suppress unused warning when feature disabled
    (settled, tally)
}

/// Whether the end of `day` (1-based count of days completed) brings a spawn wave
pub fn spawn_due(days_completed: u64, interval: u64) -> bool {
    interval > 0 && days_completed > 0 && days_completed % interval == 0
}
