//! Errors raised while loading or validating a rule set.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("failed to parse rules: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("rules define no areas")]
    NoAreas,

    #[error("area ids must run 1..n in order: expected {expected}, found {found}")]
    AreaIdOutOfSequence { expected: u32, found: u32 },

    #[error("area {area}: element distribution sums to {sum}, expected 1.0")]
    DistributionSum { area: u32, sum: f64 },

    #[error("area {area}: event weights sum to {sum}, expected 1.0")]
    EventWeightSum { area: u32, sum: f64 },

    #[error("area {area}: {table} contains a negative weight")]
    NegativeWeight { area: u32, table: &'static str },

    #[error("area {area}: individual variation range {min}..{max} is invalid")]
    InvalidVariation { area: u32, min: f64, max: f64 },

    #[error("area {area}: {field} must be positive, got {value}")]
    InvalidMultiplier {
        area: u32,
        field: &'static str,
        value: f64,
    },

    #[error("area {area}: abnormal rate {rate} is outside 0..=1")]
    InvalidAbnormalRate { area: u32, rate: f64 },

    #[error("steps per area must be at least 2, got {0}")]
    TooFewSteps(u32),

    #[error("area {area} has more than one boss")]
    DuplicateBoss { area: u32 },
}

pub type RulesResult<T> = std::result::Result<T, RulesError>;
