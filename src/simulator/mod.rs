//! Game balance simulator for Monte Carlo analysis.
//!
//! Plays thousands of seeded sessions through the same session API a UI
//! would call, then aggregates:
//! - Clear rate
//! - Where runs die
//! - Final level and action counts

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{run_simulation, simulate_single_run, RunStats};
