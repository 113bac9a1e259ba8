//! Player character: stats, levelling, and HP bookkeeping.

pub mod player;

pub use player::*;
