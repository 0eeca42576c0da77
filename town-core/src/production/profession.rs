// Professions and the catalog shared by every citizen in a town

use serde::{Deserialize, Serialize};

use crate::types::{Material, ProfessionId};

use super::Schematic;

// === PROFESSION ===

/// A named role. The first schematic is the one new citizens start with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profession {
    pub name: String,
    pub schematics: Vec<Schematic>,
}

impl Profession {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schematics: Vec::new(),
        }
    }

    pub fn with_schematic(mut self, schematic: Schematic) -> Self {
        self.schematics.push(schematic);
        self
    }

    pub fn add_schematic(&mut self, schematic: Schematic) {
        self.schematics.push(schematic);
    }

    pub fn default_schematic(&self) -> Option<&Schematic> {
        self.schematics.first()
    }

    pub fn schematic(&self, index: usize) -> Option<&Schematic> {
        self.schematics.get(index)
    }
}

// === CATALOG ===

/// Every profession available in a town, addressed by [`ProfessionId`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    professions: Vec<Profession>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four trades of the default town: iron and wheat are gathered,
    /// tools and bread are made from them.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        catalog.add(
            Profession::new("Blacksmith")
                .with_schematic(Schematic::new(Material::Tools, 1).with_input(Material::Iron, 2)),
        );
        catalog.add(Profession::new("Farmer").with_schematic(Schematic::new(Material::Wheat, 3)));
        catalog.add(
            Profession::new("Baker")
                .with_schematic(Schematic::new(Material::Bread, 2).with_input(Material::Wheat, 3)),
        );
        catalog.add(Profession::new("Miner").with_schematic(Schematic::new(Material::Iron, 3)));
        catalog
    }

    pub fn add(&mut self, profession: Profession) -> ProfessionId {
        let id = ProfessionId::new(self.professions.len() as u32);
        self.professions.push(profession);
        id
    }

    pub fn get(&self, id: ProfessionId) -> Option<&Profession> {
        self.professions.get(id.index())
    }

    /// Look up a profession by name (case-insensitive)
    pub fn find(&self, name: &str) -> Option<ProfessionId> {
        self.professions
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
            .map(|idx| ProfessionId::new(idx as u32))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProfessionId, &Profession)> {
        self.professions
            .iter()
            .enumerate()
            .map(|(idx, p)| (ProfessionId::new(idx as u32), p))
    }

    pub fn len(&self) -> usize {
        self.professions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.professions.is_empty()
    }
}
