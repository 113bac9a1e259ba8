//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of sessions to play
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Maximum session actions per run before timeout
    pub max_actions_per_run: u64,

    /// Player actions between two enemy attacks
    pub taps_per_enemy_attack: u32,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            max_actions_per_run: 200_000,
            taps_per_enemy_attack: 3,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small seeded batch for smoke checks.
    pub fn quick(seed: u64) -> Self {
        Self {
            num_runs: 20,
            seed: Some(seed),
            max_actions_per_run: 50_000,
            ..Default::default()
        }
    }
}
