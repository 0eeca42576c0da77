// Per-day observations handed to telemetry and the wasm boundary

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::types::{Material, Money};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct PriceQuote {
    pub material: Material,
    /// Cheapest listed price, or the last one seen if the book is empty.
    /// `None` until the material has been listed at least once.
    pub price: Option<Money>,
    pub listed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct ProfessionCount {
    pub profession: String,
    pub count: usize,
}

/// State at the start of a day plus what happened during it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct DayReport {
    pub day: u64,
    pub prices: Vec<PriceQuote>,
    pub population: usize,
    pub professions: Vec<ProfessionCount>,
    /// Citizens who starved at the end of this day
    pub deaths: u32,
    /// Citizens spawned at the end of this day
    pub births: u32,
    pub meals: u32,
    pub productions: u32,
}

impl DayReport {
    pub fn price(&self, material: Material) -> Option<Money> {
        self.prices
            .iter()
            .find(|q| q.material == material)
            .and_then(|q| q.price)
    }

    pub fn profession_count(&self, profession: &str) -> usize {
        self.professions
            .iter()
            .find(|p| p.profession == profession)
            .map(|p| p.count)
            .unwrap_or(0)
    }

    /// Population carried into the next day
    pub fn closing_population(&self) -> usize {
        self.population - self.deaths as usize + self.births as usize
    }
}

/// Current state of a town for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct TownSnapshot {
    pub name: String,
    pub day: u64,
    pub population: usize,
    pub prices: Vec<PriceQuote>,
    pub professions: Vec<ProfessionCount>,
    pub listed: usize,
}
