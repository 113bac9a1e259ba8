use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::character::Player;
use crate::element::Element;
use crate::items::Weapon;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub element: Element,
    pub hp: BigInt,
    pub max_hp: BigInt,
    pub atk: BigInt,
    pub exp_reward: BigInt,
    pub gold_reward: BigInt,
    /// HP multiplier tier of a rare spawn; `None` for ordinary enemies.
    pub abnormal_tier: Option<u32>,
    pub is_boss: bool,
}

impl Enemy {
    pub fn is_abnormal(&self) -> bool {
        self.abnormal_tier.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleResult {
    Ongoing,
    Victory,
    Defeat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleState {
    pub player: Player,
    pub enemy: Enemy,
    pub result: BattleResult,
    pub turn_count: u32,
    /// Rolled on victory; equipping it is a separate choice.
    pub dropped_weapon: Option<Weapon>,
    pub is_guarding: bool,
    /// Pending one-shot bonus for the next player attack.
    pub guard_counter: bool,
    pub perfect_guard: bool,
    /// Weapon element before the first repaint this battle.
    pub original_weapon_element: Option<Element>,
}

impl BattleState {
    pub fn is_ongoing(&self) -> bool {
        self.result == BattleResult::Ongoing
    }
}

pub fn create_battle_state(player: Player, enemy: Enemy) -> BattleState {
    BattleState {
        player,
        enemy,
        result: BattleResult::Ongoing,
        turn_count: 0,
        dropped_weapon: None,
        is_guarding: false,
        guard_counter: false,
        perfect_guard: false,
        original_weapon_element: None,
    }
}
