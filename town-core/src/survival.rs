//! Hunger and starvation rules.
//!
//! Hunger drops by a fixed amount every day. A citizen whose hunger is at or
//! below zero tries to eat; one still at or below zero when the day is over
//! starves and leaves the town.

use serde::{Deserialize, Serialize};

use crate::types::{Hunger, Material};

pub const DEFAULT_HUNGER_DECAY: Hunger = 5;
pub const DEFAULT_HUNGER_CAP: Hunger = 100;

/// A material that can be eaten and how much hunger one unit restores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodConfig {
    pub material: Material,
    pub nutrition: Hunger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurvivalRules {
    /// Hunger lost every day
    pub hunger_decay: Hunger,
    /// Gains that would push hunger past this value reset it to zero
    pub hunger_cap: Hunger,
    /// Edible materials, in order of preference on equal price
    pub foods: Vec<FoodConfig>,
}

impl Default for SurvivalRules {
    fn default() -> Self {
        Self {
            hunger_decay: DEFAULT_HUNGER_DECAY,
            hunger_cap: DEFAULT_HUNGER_CAP,
            foods: vec![
                FoodConfig {
                    material: Material::Bread,
                    nutrition: 30,
                },
                FoodConfig {
                    material: Material::Wheat,
                    nutrition: 10,
                },
            ],
        }
    }
}

impl SurvivalRules {
    pub fn nutrition(&self, material: Material) -> Option<Hunger> {
        self.foods
            .iter()
            .find(|f| f.material == material)
            .map(|f| f.nutrition)
    }

    /// Hunger after eating `nutrition`.
    ///
    /// Overflowing the cap does not saturate: the counter wraps back to zero.
    pub fn gain(&self, hunger: Hunger, nutrition: Hunger) -> Hunger {
        let fed = hunger.saturating_add(nutrition);
        if fed > self.hunger_cap { 0 } else { fed }
    }

    pub fn decay(&self, hunger: Hunger) -> Hunger {
        hunger.saturating_sub(self.hunger_decay)
    }
}

/// True when a citizen must eat, and the death condition at the end of a day
pub fn is_starving(hunger: Hunger) -> bool {
    hunger <= 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gain_within_cap() {
        let rules = SurvivalRules::default();
        assert_eq!(rules.gain(-2, 30), 28);
        assert_eq!(rules.gain(70, 30), 100);
    }

    #[test]
    fn test_gain_past_cap_resets_to_zero() {
        let rules = SurvivalRules::default();
        assert_eq!(rules.gain(90, 30), 0);
        assert_eq!(rules.gain(0, 101), 0);
    }

    #[test]
    fn test_decay_has_no_floor() {
        let rules = SurvivalRules::default();
        let mut hunger = 3;
        for _ in 0..10 {
            hunger = rules.decay(hunger);
        }
        assert_eq!(hunger, -47);
        assert!(is_starving(hunger));
    }

    #[test]
    fn test_starvation_threshold() {
        assert!(is_starving(0));
        assert!(is_starving(-1));
        assert!(!is_starving(1));
    }

    #[test]
    fn test_default_foods() {
        let rules = SurvivalRules::default();
        assert_eq!(rules.nutrition(Material::Bread), Some(30));
        assert_eq!(rules.nutrition(Material::Wheat), Some(10));
        assert_eq!(rules.nutrition(Material::Iron), None);
    }
}
