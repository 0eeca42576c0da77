pub mod citizen;
pub mod pricing;

pub use citizen::*;
pub use pricing::*;
