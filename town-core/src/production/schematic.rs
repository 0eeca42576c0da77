// Schematic definitions: what a citizen consumes and what it makes

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Material, Quantity};

// === SCHEMATIC ===

/// A production recipe.
///
/// One run consumes every input quantity from the market and lists
/// `output.1` units of `output.0`. Primary producers have no inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schematic {
    #[serde(default)]
    pub inputs: BTreeMap<Material, Quantity>,
    pub output: (Material, Quantity),
}

impl Schematic {
    pub fn new(output: Material, quantity: Quantity) -> Self {
        Self {
            inputs: BTreeMap::new(),
            output: (output, quantity),
        }
    }

    /// Add a required input. Repeating a material adds to its quantity.
    pub fn with_input(mut self, material: Material, quantity: Quantity) -> Self {
        *self.inputs.entry(material).or_insert(0) += quantity;
        self
    }

    pub fn output_material(&self) -> Material {
        self.output.0
    }

    pub fn output_quantity(&self) -> Quantity {
        self.output.1
    }

    /// Inputs with a non-zero requirement, in material order
    pub fn requirements(&self) -> impl Iterator<Item = (Material, Quantity)> + '_ {
        self.inputs
            .iter()
            .filter(|(_, qty)| **qty > 0)
            .map(|(m, q)| (*m, *q))
    }

    pub fn is_primary(&self) -> bool {
        self.requirements().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schematic_builder() {
        let schematic = Schematic::new(Material::Bread, 2).with_input(Material::Wheat, 3);

        assert_eq!(schematic.output_material(), Material::Bread);
        assert_eq!(schematic.output_quantity(), 2);
        assert_eq!(schematic.inputs.get(&Material::Wheat), Some(&3));
        assert!(!schematic.is_primary());
    }

    #[test]
    fn test_repeated_inputs_accumulate() {
        let schematic = Schematic::new(Material::Tools, 1)
            .with_input(Material::Iron, 1)
            .with_input(Material::Iron, 1);

        assert_eq!(schematic.inputs.get(&Material::Iron), Some(&2));
        assert_eq!(schematic.requirements().count(), 1);
    }

    #[test]
    fn test_zero_quantity_inputs_are_not_requirements() {
        let schematic = Schematic::new(Material::Wheat, 3).with_input(Material::Tools, 0);
        assert!(schematic.is_primary());
    }

    #[test]
    fn test_schematic_from_json() {
        let schematic: Schematic =
            serde_json::from_str(r#"{"inputs": {"IRON": 2}, "output": ["TOOLS", 1]}"#).unwrap();
        assert_eq!(
            schematic,
            Schematic::new(Material::Tools, 1).with_input(Material::Iron, 2)
        );

        let farm: Schematic = serde_json::from_str(r#"{"output": ["WHEAT", 3]}"#).unwrap();
        assert!(farm.is_primary());
    }
}
