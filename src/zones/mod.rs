//! Area and monster content tables.
//!
//! Read-only reference data consumed by the generators; the live copy a
//! session reads lives in `GameRules`.

mod data;
mod monsters;

pub use data::*;
pub use monsters::*;
