//! Replaceable rule set.
//!
//! Every generator and session transition reads its tables through a
//! `GameRules`. The built-in tables come from `GameRules::standard()`; a
//! different balance can be loaded from JSON, where any omitted field keeps
//! its standard value.

mod error;

pub use error::{RulesError, RulesResult};

use std::borrow::Cow;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants::{
    INITIAL_HEAL_COUNT, PREP_HEAL_PERCENT, PROBABILITY_EPSILON, STEPS_PER_AREA,
    TREASURE_HEAL_PERCENT,
};
use crate::items::{standard_weapons, ItemPrices, WeaponEntry};
use crate::zones::{standard_areas, standard_monsters, AreaConfig, MonsterEntry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub steps_per_area: u32,
    pub initial_heal_count: u32,
    pub prep_heal_percent: u32,
    pub treasure_heal_percent: u32,
    pub areas: Vec<AreaConfig>,
    pub monsters: Vec<MonsterEntry>,
    pub weapons: Vec<WeaponEntry>,
    pub prices: ItemPrices,
}

impl Default for GameRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl GameRules {
    pub fn standard() -> Self {
        Self {
            steps_per_area: STEPS_PER_AREA,
            initial_heal_count: INITIAL_HEAL_COUNT,
            prep_heal_percent: PREP_HEAL_PERCENT,
            treasure_heal_percent: TREASURE_HEAL_PERCENT,
            areas: standard_areas(),
            monsters: standard_monsters(),
            weapons: standard_weapons(),
            prices: ItemPrices::default(),
        }
    }

    /// Parses a rule set from JSON and validates it.
    pub fn from_json(json: &str) -> RulesResult<Self> {
        let rules: GameRules = serde_json::from_str(json)?;
        rules.validate()?;
        debug!(
            areas = rules.areas.len(),
            steps = rules.steps_per_area,
            "loaded rules"
        );
        Ok(rules)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Number of areas; the last one holds the final boss.
    pub fn area_count(&self) -> u32 {
        self.areas.len() as u32
    }

    pub fn is_final_area(&self, area_id: u32) -> bool {
        area_id >= self.area_count()
    }

    /// Looks up an area by id.
    ///
    /// Ids past the table resolve to the last area; an empty table yields a
    /// neutral area, so lookups never fail.
    pub fn area(&self, area_id: u32) -> Cow<'_, AreaConfig> {
        match self
            .areas
            .iter()
            .find(|a| a.id == area_id)
            .or_else(|| self.areas.last())
        {
            Some(area) => Cow::Borrowed(area),
            None => Cow::Owned(AreaConfig::neutral(area_id)),
        }
    }

    pub fn validate(&self) -> RulesResult<()> {
        if self.steps_per_area < 2 {
            return Err(RulesError::TooFewSteps(self.steps_per_area));
        }
        if self.areas.is_empty() {
            return Err(RulesError::NoAreas);
        }

        for (index, area) in self.areas.iter().enumerate() {
            let expected = index as u32 + 1;
            if area.id != expected {
                return Err(RulesError::AreaIdOutOfSequence {
                    expected,
                    found: area.id,
                });
            }
            validate_area(area)?;
        }

        let mut boss_areas = HashSet::new();
        for boss in self.monsters.iter().filter(|m| m.is_boss) {
            for &area in &boss.area_ids {
                if !boss_areas.insert(area) {
                    return Err(RulesError::DuplicateBoss { area });
                }
            }
        }

        Ok(())
    }
}

fn validate_area(area: &AreaConfig) -> RulesResult<()> {
    let id = area.id;

    let distribution = area.element_distribution.as_array();
    if distribution.iter().any(|w| *w < 0.0) {
        return Err(RulesError::NegativeWeight {
            area: id,
            table: "element distribution",
        });
    }
    let sum = area.element_distribution.total();
    if (sum - 1.0).abs() > PROBABILITY_EPSILON {
        return Err(RulesError::DistributionSum { area: id, sum });
    }

    let events = &area.events;
    if events.battle < 0.0 || events.treasure < 0.0 || events.shop < 0.0 {
        return Err(RulesError::NegativeWeight {
            area: id,
            table: "event weights",
        });
    }
    let sum = events.total();
    if (sum - 1.0).abs() > PROBABILITY_EPSILON {
        return Err(RulesError::EventWeightSum { area: id, sum });
    }

    for (field, value) in [
        ("hp_multiplier", area.hp_multiplier),
        ("atk_multiplier", area.atk_multiplier),
        ("reward_multiplier", area.reward_multiplier),
        ("boss_multiplier", area.boss_multiplier),
    ] {
        if !(value > 0.0 && value.is_finite()) {
            return Err(RulesError::InvalidMultiplier {
                area: id,
                field,
                value,
            });
        }
    }

    let variation = area.individual_variation;
    if !(variation.min > 0.0 && variation.min <= variation.max && variation.max.is_finite()) {
        return Err(RulesError::InvalidVariation {
            area: id,
            min: variation.min,
            max: variation.max,
        });
    }

    if !(0.0..=1.0).contains(&area.abnormal_rate) {
        return Err(RulesError::InvalidAbnormalRate {
            area: id,
            rate: area.abnormal_rate,
        });
    }

    Ok(())
}
