//! TapQuest - deterministic rules core of a tap-driven incremental RPG.
//!
//! Character progression, area/event traversal, enemy and weapon generation,
//! and battle resolution, all as pure transitions over immutable state. A
//! presentation layer owns the current `GameState` and feeds it back in.
//! Randomness is always passed in as `&mut impl Rng`.

pub mod character;
pub mod combat;
pub mod core;
pub mod element;
pub mod items;
pub mod map;
pub mod rules;
pub mod simulator;
pub mod zones;
