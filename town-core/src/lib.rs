//! A closed town economy.
//!
//! Citizens with professions buy inputs from a per-material order book,
//! produce, and list their output; hunger forces them to buy food and
//! starvation removes them. New citizens arrive in periodic waves.
//!
//! Module structure:
//! - types       Material registry, IDs and aliases
//! - production  Schematics, professions and the catalog
//! - market      Price-ordered order books and the payment seam
//! - agents      Citizens and asking-price discovery
//! - survival    Hunger decay, feeding and starvation rules
//! - config      Town configuration and validation
//! - tick        One day of shuffled citizen turns
//! - world       The town and its day loop
//! - report      Per-day observations and snapshots

use wasm_bindgen::prelude::*;

pub mod agents;
pub mod config;
pub mod market;
pub mod production;
pub mod report;
pub mod survival;
pub mod tick;
pub mod types;
pub mod world;

#[cfg(feature = "instrument")]
pub use instrument;

pub use agents::{Citizen, DayOutcome, PricingRules, WorkOutcome, asking_price};
pub use config::{ConfigError, RosterEntry, TownConfig};
pub use market::{Listing, Market, OrderBook, Treasury};
pub use production::{Catalog, Profession, Schematic};
pub use report::{DayReport, PriceQuote, ProfessionCount, TownSnapshot};
pub use survival::{FoodConfig, SurvivalRules, is_starving};
pub use tick::{DayTally, run_citizen_turns, spawn_due};
pub use types::{CitizenId, Hunger, Material, Money, ProfessionId, Quantity};
pub use world::Town;

// ============================================================================
// WASM API - Town simulation
// ============================================================================

#[wasm_bindgen]
pub struct TownSimulation {
    town: Town,
    reports: Vec<DayReport>,
}

#[wasm_bindgen]
impl TownSimulation {
    /// The default town, seeded
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Self {
        // Better panic messages in browser console
        console_error_panic_hook::set_once();

        Self {
            town: Town::standard(seed),
            reports: Vec::new(),
        }
    }

    /// Create a town from a JSON `TownConfig`; missing fields take defaults
    #[wasm_bindgen]
    pub fn from_config_json(config_json: &str) -> Result<TownSimulation, JsError> {
        console_error_panic_hook::set_once();

        let town = TownConfig::from_json(config_json)
            .and_then(Town::new)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self::from_town(town))
    }

    /// Advance the simulation by one day
    #[wasm_bindgen]
    pub fn advance_day(&mut self) -> DayReport {
        let report = self.town.run_day();
        self.reports.push(report.clone());
        report
    }

    /// Advance several days, returning the population afterwards
    #[wasm_bindgen]
    pub fn run_days(&mut self, days: u32) -> usize {
        for _ in 0..days {
            let report = self.town.run_day();
            self.reports.push(report);
        }
        self.town.population()
    }

    #[wasm_bindgen]
    pub fn get_day(&self) -> u64 {
        self.town.day
    }

    #[wasm_bindgen]
    pub fn get_population(&self) -> usize {
        self.town.population()
    }

    /// Get a snapshot of the current state for rendering
    #[wasm_bindgen]
    pub fn get_snapshot(&self) -> TownSnapshot {
        self.snapshot()
    }

    /// Every report so far, as a plain JS array
    #[wasm_bindgen]
    pub fn get_reports(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.reports).map_err(|e| JsError::new(&e.to_string()))
    }
}

impl TownSimulation {
    pub fn from_town(town: Town) -> Self {
        Self {
            town,
            reports: Vec::new(),
        }
    }

    pub fn town(&self) -> &Town {
        &self.town
    }

    pub fn reports(&self) -> &[DayReport] {
        &self.reports
    }

    fn snapshot(&self) -> TownSnapshot {
        let town = &self.town;
        TownSnapshot {
            name: town.name().to_string(),
            day: town.day,
            population: town.population(),
            prices: Material::all()
                .map(|material| PriceQuote {
                    material,
                    price: town.price(material),
                    listed: town.market.listed(material),
                })
                .collect(),
            professions: town
                .population_by_profession()
                .into_iter()
                .filter_map(|(id, count)| {
                    town.catalog().get(id).map(|p| ProfessionCount {
                        profession: p.name.clone(),
                        count,
                    })
                })
                .collect(),
            listed: town.market.total_listed(),
        }
    }
}
