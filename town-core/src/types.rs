// Core ID types, aliases and the material registry

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

// === TYPE ALIASES ===

/// Credits held by citizens and asked for listings.
pub type Money = i64;
/// Survival counter. Unbounded below, soft-capped above.
pub type Hunger = i32;
pub type Quantity = u32;

// === NEWTYPE IDS ===

/// Stable identity of a citizen. Never reused within a town.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CitizenId(pub u32);

impl CitizenId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Index of a profession in the town's catalog.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ProfessionId(pub u32);

impl ProfessionId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ============================================================================
// Materials - The closed set of tradeable goods
// ============================================================================

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Tsify,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum Material {
    Iron,
    Tools,
    Wheat,
    Bread,
}

impl Material {
    pub const COUNT: usize = 4;

    /// Returns an iterator over all materials in declaration order
    pub fn all() -> impl Iterator<Item = Material> {
        [
            Material::Iron,
            Material::Tools,
            Material::Wheat,
            Material::Bread,
        ]
        .into_iter()
    }

    /// Dense index, used for per-material tables
    pub fn index(self) -> usize {
        match self {
            Material::Iron => 0,
            Material::Tools => 1,
            Material::Wheat => 2,
            Material::Bread => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Material::Iron => "IRON",
            Material::Tools => "TOOLS",
            Material::Wheat => "WHEAT",
            Material::Bread => "BREAD",
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_dense_and_ordered() {
        let indices: Vec<usize> = Material::all().map(Material::index).collect();
        assert_eq!(indices, (0..Material::COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn materials_serialize_as_upper_case_names() {
        let json = serde_json::to_string(&Material::Bread).unwrap();
        assert_eq!(json, "\"BREAD\"");
        let back: Material = serde_json::from_str("\"IRON\"").unwrap();
        assert_eq!(back, Material::Iron);
    }
}
