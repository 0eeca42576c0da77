// Town configuration: every tunable the simulation reads, loadable from JSON

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::agents::{DEFAULT_MONEY, PricingRules};
use crate::production::Catalog;
use crate::survival::SurvivalRules;
use crate::types::{Hunger, Material, Money};

pub const DEFAULT_SPAWN_INTERVAL: u64 = 100;
pub const DEFAULT_SPAWN_BATCH: u32 = 10;

/// Initial head count for one profession.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub profession: String,
    pub count: u32,
}

impl RosterEntry {
    pub fn new(profession: impl Into<String>, count: u32) -> Self {
        Self {
            profession: profession.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TownConfig {
    pub name: String,
    /// Seeds the town's only random source
    pub seed: u64,
    pub starting_money: Money,
    pub starting_hunger: Hunger,
    pub survival: SurvivalRules,
    pub pricing: PricingRules,
    /// Days between spawn waves; 0 disables spawning
    pub spawn_interval: u64,
    pub spawn_batch: u32,
    pub catalog: Catalog,
    pub roster: Vec<RosterEntry>,
}

impl Default for TownConfig {
    fn default() -> Self {
        Self {
            name: "Köping".to_string(),
            seed: 0,
            starting_money: DEFAULT_MONEY,
            starting_hunger: 0,
            survival: SurvivalRules::default(),
            pricing: PricingRules::default(),
            spawn_interval: DEFAULT_SPAWN_INTERVAL,
            spawn_batch: DEFAULT_SPAWN_BATCH,
            catalog: Catalog::standard(),
            roster: vec![
                RosterEntry::new("Baker", 1),
                RosterEntry::new("Farmer", 5),
                RosterEntry::new("Blacksmith", 1),
                RosterEntry::new("Miner", 1),
            ],
        }
    }
}

impl TownConfig {
    /// Parse and validate. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TownConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for (_, profession) in self.catalog.iter() {
            if profession.schematics.is_empty() {
                return Err(ConfigError::EmptyProfession(profession.name.clone()));
            }
        }
        for entry in &self.roster {
            if self.catalog.find(&entry.profession).is_none() {
                return Err(ConfigError::UnknownProfession(entry.profession.clone()));
            }
        }

        let mut seen = HashSet::new();
        for food in &self.survival.foods {
            if !seen.insert(food.material) {
                return Err(ConfigError::DuplicateFood(food.material));
            }
            if food.nutrition <= 0 {
                return Err(ConfigError::NonPositiveNutrition(food.material));
            }
        }

        let pricing = &self.pricing;
        let (low, high) = pricing.opening_band;
        if low > high {
            return Err(ConfigError::InvalidPriceBand { low, high });
        }
        if pricing.floor <= 0 {
            return Err(ConfigError::NonPositiveFloor(pricing.floor));
        }
        if pricing.jitter < 0 {
            return Err(ConfigError::NegativeJitter(pricing.jitter));
        }
        Ok(())
    }
}

// === ERRORS ===

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid town config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog has no professions")]
    EmptyCatalog,
    #[error("profession {0} has no schematics")]
    EmptyProfession(String),
    #[error("roster names unknown profession {0}")]
    UnknownProfession(String),
    #[error("food {0} listed twice")]
    DuplicateFood(Material),
    #[error("food {0} must restore a positive amount of hunger")]
    NonPositiveNutrition(Material),
    #[error("opening price band {low}..={high} is empty")]
    InvalidPriceBand { low: Money, high: Money },
    #[error("price floor {0} must be positive")]
    NonPositiveFloor(Money),
    #[error("price jitter {0} must not be negative")]
    NegativeJitter(Money),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::production::{Profession, Schematic};
    use crate::survival::FoodConfig;

    #[test]
    fn test_default_config_is_valid() {
        let config = TownConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.roster.iter().map(|r| r.count).sum::<u32>(), 8);
        assert_eq!(config.spawn_interval, 100);
        assert_eq!(config.spawn_batch, 10);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = TownConfig::from_json(r#"{"seed": 9, "spawn_batch": 3}"#).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.spawn_batch, 3);
        assert_eq!(config.starting_money, DEFAULT_MONEY);
        assert_eq!(config.catalog, Catalog::standard());
    }

    #[test]
    fn test_custom_catalog_from_json() {
        let json = r#"{
            "catalog": [
                {"name": "Miller", "schematics": [{"inputs": {"WHEAT": 2}, "output": ["BREAD", 1]}]},
                {"name": "Farmer", "schematics": [{"output": ["WHEAT", 4]}]}
            ],
            "roster": [{"profession": "miller", "count": 2}],
            "survival": {"foods": [{"material": "BREAD", "nutrition": 40}]}
        }"#;
        let config = TownConfig::from_json(json).unwrap();

        assert_eq!(config.catalog.len(), 2);
        assert_eq!(config.survival.nutrition(Material::Bread), Some(40));
        assert_eq!(config.survival.nutrition(Material::Wheat), None);
        assert_eq!(config.survival.hunger_decay, 5);
    }

    #[test]
    fn test_rejects_profession_without_schematic() {
        let mut config = TownConfig::default();
        config.catalog.add(Profession::new("Idler"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyProfession(name)) if name == "Idler"
        ));
    }

    #[test]
    fn test_rejects_unknown_roster_profession() {
        let mut config = TownConfig::default();
        config.roster.push(RosterEntry::new("Alchemist", 1));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownProfession(_))
        ));
    }

    #[test]
    fn test_rejects_bad_foods_and_bands() {
        let mut config = TownConfig::default();
        config.survival.foods.push(FoodConfig {
            material: Material::Bread,
            nutrition: 5,
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateFood(Material::Bread))
        ));

        let mut config = TownConfig::default();
        config.survival.foods = vec![FoodConfig {
            material: Material::Iron,
            nutrition: 0,
        }];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveNutrition(Material::Iron))
        ));

        let mut config = TownConfig::default();
        config.pricing.opening_band = (150, 50);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPriceBand { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_floor_and_jitter() {
        let mut config = TownConfig::default();
        config.pricing.floor = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveFloor(0))
        ));

        let mut config = TownConfig::default();
        config.pricing.jitter = Money::MIN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeJitter(Money::MIN))
        ));

        let err = TownConfig::from_json(r#"{"pricing": {"jitter": -3}}"#).unwrap_err();
        assert_eq!(err.to_string(), "price jitter -3 must not be negative");
        assert!(TownConfig::from_json(r#"{"pricing": {"floor": -1}}"#).is_err());
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let config = TownConfig {
            catalog: Catalog::new(),
            roster: Vec::new(),
            ..TownConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyCatalog)));

        let mut one = Catalog::new();
        one.add(Profession::new("Farmer").with_schematic(Schematic::new(Material::Wheat, 1)));
        let config = TownConfig {
            catalog: one,
            roster: Vec::new(),
            ..TownConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = TownConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("invalid town config"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
