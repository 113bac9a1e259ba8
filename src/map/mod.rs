//! Area traversal: pre-rolled event sequences, lookahead, and advancement.

pub mod events;
pub mod logic;
pub mod types;

pub use events::*;
pub use logic::*;
pub use types::*;
