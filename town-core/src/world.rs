// Town state: market, live population and the day loop

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::agents::Citizen;
use crate::config::{ConfigError, TownConfig};
use crate::market::Market;
use crate::production::{Catalog, Schematic};
use crate::report::{DayReport, PriceQuote, ProfessionCount};
use crate::tick::{run_citizen_turns, spawn_due};
use crate::types::{CitizenId, Material, Money, ProfessionId};

/// Complete state of one town
#[derive(Debug, Clone)]
pub struct Town {
    /// Days completed so far
    pub day: u64,
    pub market: Market,
    pub citizens: HashMap<CitizenId, Citizen>,

    config: TownConfig,
    rng: StdRng,
    /// Most recent observed cheapest price per material
    last_prices: [Option<Money>; Material::COUNT],
    next_citizen_id: u32,
}

impl Town {
    /// Build a town from a validated config and settle its starting roster
    pub fn new(config: TownConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// The default town (standard catalog and roster) with the given seed
    pub fn standard(seed: u64) -> Self {
        Self::build(TownConfig::default().with_seed(seed))
    }

    fn build(config: TownConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        let roster: Vec<(ProfessionId, u32)> = config
            .roster
            .iter()
            .filter_map(|entry| {
                config
                    .catalog
                    .find(&entry.profession)
                    .map(|id| (id, entry.count))
            })
            .collect();

        let mut town = Self {
            day: 0,
            market: Market::new(),
            citizens: HashMap::new(),
            config,
            rng,
            last_prices: [None; Material::COUNT],
            next_citizen_id: 0,
        };
        for (profession, count) in roster {
            town.populate(profession, count);
        }
        town
    }

    pub fn config(&self) -> &TownConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.config.catalog
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    // === Citizen Management ===

    /// Add a citizen with starting money and hunger, returns its ID.
    /// Fails if the profession is unknown or has nothing to produce.
    pub fn add_citizen(&mut self, profession: ProfessionId) -> Option<CitizenId> {
        self.config.catalog.get(profession)?.default_schematic()?;

        let id = CitizenId::new(self.next_citizen_id);
        self.next_citizen_id += 1;

        let citizen = Citizen::new(id, profession)
            .with_money(self.config.starting_money)
            .with_hunger(self.config.starting_hunger);
        self.citizens.insert(id, citizen);
        Some(id)
    }

    /// Add `count` citizens of one profession
    pub fn populate(&mut self, profession: ProfessionId, count: u32) -> Vec<CitizenId> {
        (0..count)
            .map_while(|_| self.add_citizen(profession))
            .collect()
    }

    /// Add citizens with uniformly random professions
    pub fn spawn(&mut self, count: u32) -> Vec<CitizenId> {
        let professions = self.config.catalog.len();
        if professions == 0 {
            return Vec::new();
        }
        (0..count)
            .filter_map(|_| {
                let pick = self.rng.random_range(0..professions);
                self.add_citizen(ProfessionId::new(pick as u32))
            })
            .collect()
    }

    pub fn get_citizen(&self, id: CitizenId) -> Option<&Citizen> {
        self.citizens.get(&id)
    }

    pub fn get_citizen_mut(&mut self, id: CitizenId) -> Option<&mut Citizen> {
        self.citizens.get_mut(&id)
    }

    /// The schematic a citizen currently runs
    pub fn schematic_of(&self, id: CitizenId) -> Option<&Schematic> {
        let citizen = self.citizens.get(&id)?;
        self.config
            .catalog
            .get(citizen.profession)?
            .schematic(citizen.schematic)
    }

    pub fn population(&self) -> usize {
        self.citizens.len()
    }

    /// Head count per profession, in catalog order (zero counts included)
    pub fn population_by_profession(&self) -> Vec<(ProfessionId, usize)> {
        let mut counts = vec![0usize; self.config.catalog.len()];
        for citizen in self.citizens.values() {
            if let Some(slot) = counts.get_mut(citizen.profession.index()) {
                *slot += 1;
            }
        }
        counts
            .into_iter()
            .enumerate()
            .map(|(idx, n)| (ProfessionId::new(idx as u32), n))
            .collect()
    }

    // === Price Observation ===

    /// Cheapest listed price, falling back to the last observed one
    pub fn price(&self, material: Material) -> Option<Money> {
        self.market
            .cheapest(material)
            .map(|l| l.price)
            .or(self.last_prices[material.index()])
    }

    /// Record the current state of the town as the start of `self.day`
    pub fn observe(&mut self) -> DayReport {
        let prices: Vec<PriceQuote> = Material::all()
            .map(|material| {
                if let Some(listing) = self.market.cheapest(material) {
                    self.last_prices[material.index()] = Some(listing.price);
                }
                PriceQuote {
                    material,
                    price: self.last_prices[material.index()],
                    listed: self.market.listed(material),
                }
            })
            .collect();

        let professions: Vec<ProfessionCount> = self
            .population_by_profession()
            .into_iter()
            .filter_map(|(id, count)| {
                self.config.catalog.get(id).map(|p| ProfessionCount {
                    profession: p.name.clone(),
                    count,
                })
            })
            .collect();

        #[cfg(feature = "instrument")]
        {
            for quote in &prices {
                tracing::info!(
                    target: "prices",
                    day = self.day,
                    material = quote.material.name(),
                    price = quote.price.unwrap_or(0),
                    known = quote.price.is_some(),
                    listed = quote.listed as u64,
                );
            }
            for entry in &professions {
                tracing::info!(
                    target: "professions",
                    day = self.day,
                    profession = entry.profession.as_str(),
                    count = entry.count as u64,
                );
            }
            tracing::info!(
                target: "population",
                day = self.day,
                population = self.citizens.len() as u64,
                listed = self.market.total_listed() as u64,
            );
        }

        DayReport {
            day: self.day,
            prices,
            population: self.citizens.len(),
            professions,
            deaths: 0,
            births: 0,
            meals: 0,
            productions: 0,
        }
    }

    // === Simulation Day ===

    /// Run one day.
    ///
    /// Phases:
    /// 0. Observation - prices and head counts at the start of the day
    /// 1. Turns - every citizen once, shuffled; the starved are dropped
    /// 2. Spawn - every `spawn_interval` days a batch of random newcomers
    pub fn run_day(&mut self) -> DayReport {
        let mut report = self.observe();

        let citizens = std::mem::take(&mut self.citizens);
        let (survivors, tally) = run_citizen_turns(
            self.day,
            citizens,
            &mut self.market,
            &self.config,
            &mut self.rng,
        );
        self.citizens = survivors;
        self.day += 1;

        let births = if spawn_due(self.day, self.config.spawn_interval) {
            let spawned = self.spawn(self.config.spawn_batch);
            #[cfg(feature = "instrument")]
            tracing::info!(
                target: "spawn",
                day = report.day,
                count = spawned.len() as u64,
                population = self.citizens.len() as u64,
            );
            spawned.len() as u32
        } else {
            0
        };

        report.deaths = tally.deaths;
        report.births = births;
        report.meals = tally.meals;
        report.productions = tally.productions;
        report
    }

    /// Run `days` days, returning one report per day
    pub fn run(&mut self, days: u64) -> Vec<DayReport> {
        (0..days).map(|_| self.run_day()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::production::Profession;

    #[test]
    fn test_standard_town_roster() {
        let town = Town::standard(1);
        assert_eq!(town.population(), 8);
        assert_eq!(town.name(), "Köping");

        let farmer = town.catalog().find("Farmer").unwrap();
        let counts: HashMap<ProfessionId, usize> =
            town.population_by_profession().into_iter().collect();
        assert_eq!(counts[&farmer], 5);
        assert!(town.citizens.values().all(|c| c.money == 100 && c.hunger == 0));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = TownConfig::default();
        config.catalog.add(Profession::new("Idler"));
        assert!(Town::new(config).is_err());
    }

    #[test]
    fn test_add_citizen_ids_unique_and_checked() {
        let mut town = Town::standard(1);
        let a = town.add_citizen(ProfessionId(0)).unwrap();
        let b = town.add_citizen(ProfessionId(0)).unwrap();
        assert_ne!(a, b);
        assert!(town.add_citizen(ProfessionId(42)).is_none());
        assert_eq!(town.population(), 10);
        assert_eq!(town.schematic_of(a).unwrap().output_material(), Material::Tools);
    }

    #[test]
    fn test_spawn_assigns_catalog_professions() {
        let mut town = Town::standard(3);
        let spawned = town.spawn(50);
        assert_eq!(spawned.len(), 50);
        for id in spawned {
            let citizen = town.get_citizen(id).unwrap();
            assert!(town.catalog().get(citizen.profession).is_some());
        }
    }

    #[test]
    fn test_price_falls_back_to_last_observed() {
        let mut town = Town::standard(1);
        town.citizens.clear();
        assert_eq!(town.price(Material::Iron), None);

        town.market.sell(Material::Iron, 1, 33, CitizenId(900));
        let report = town.observe();
        assert_eq!(report.price(Material::Iron), Some(33));

        let mut nobody: HashMap<CitizenId, Citizen> = HashMap::new();
        town.market.buy(Material::Iron, &mut nobody);
        assert_eq!(town.price(Material::Iron), Some(33));
        let report = town.observe();
        assert_eq!(report.price(Material::Iron), Some(33));
        assert_eq!(report.prices[Material::Iron.index()].listed, 0);
    }

    #[test]
    fn test_same_seed_same_history() {
        let mut a = Town::standard(77);
        let mut b = Town::standard(77);
        assert_eq!(a.run(60), b.run(60));
    }
}
