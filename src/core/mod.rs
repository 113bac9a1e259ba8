//! Core game state and session logic.

pub mod constants;
pub mod game_logic;
pub mod game_state;
pub mod numbers;

pub use game_logic::*;
pub use game_state::*;
