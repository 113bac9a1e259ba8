use serde::{Deserialize, Serialize};

use crate::character::Player;
use crate::combat::BattleState;
use crate::items::{ShopItem, Weapon};
use crate::map::UpcomingEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Exploration,
    BattlePrep,
    Battle,
    TreasureSelect,
    Shop,
    AreaMove,
    GameOver,
    GameClear,
}

impl Phase {
    /// Run has ended and only a restart applies.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver | Phase::GameClear)
    }
}

/// The whole session.
///
/// Transitions never mutate a `GameState`; they return a new one. While a
/// battle runs, the live player is the one inside `battle`; it is copied back
/// to `player` when the battle is finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    pub current_area: u32,
    /// 1-based; step 1 is the arrival square.
    pub current_step: u32,
    pub area_events: Vec<UpcomingEvent>,
    pub upcoming_events: Vec<UpcomingEvent>,
    pub phase: Phase,
    pub heal_count: u32,
    pub battle: Option<BattleState>,
    pub treasure_offer: Option<Weapon>,
    pub shop_items: Vec<ShopItem>,
}

impl GameState {
    /// The player as they currently stand, inside or outside a battle.
    pub fn active_player(&self) -> &Player {
        self.battle.as_ref().map_or(&self.player, |b| &b.player)
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step as usize >= self.area_events.len()
    }
}
