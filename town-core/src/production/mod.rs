pub mod profession;
pub mod schematic;

pub use profession::{Catalog, Profession};
pub use schematic::Schematic;
