//! Item system: weapons, consumables, catalogs, and generation.

pub mod catalog;
pub mod generation;
pub mod inventory;
pub mod types;

pub use catalog::*;
pub use generation::*;
pub use types::*;
