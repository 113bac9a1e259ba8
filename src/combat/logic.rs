//! Battle state machine.
//!
//! Every transition takes the current `BattleState` and returns a `Cow`:
//! `Borrowed` when the action does not apply (battle already decided, item
//! not held, already guarding), `Owned` with the next state otherwise.

use std::borrow::Cow;

use num_bigint::BigInt;
use num_traits::One;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::types::{BattleResult, BattleState, Enemy};
use crate::character::{add_exp, heal, is_dead, take_damage, Player};
use crate::core::constants::{
    ABNORMAL_EXP_MULTIPLIER, GUARD_COUNTER_DIVISOR, GUARD_DAMAGE_DIVISOR, HEAL_ITEM_PERCENT,
};
use crate::core::numbers::{at_least_one, non_negative, percent_of_min1};
use crate::element::{advantage, multiplier_ratio, Element};
use crate::items::generate_weapon_drop;
use crate::items::inventory::{has, remove_one};
use crate::items::ItemKind;
use crate::rules::GameRules;

/// A consumable used mid-battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ItemUse {
    ElementChange { element: Element },
    PerfectGuard,
    Heal,
}

impl ItemUse {
    pub fn kind(self) -> ItemKind {
        match self {
            ItemUse::ElementChange { .. } => ItemKind::ElementChange,
            ItemUse::PerfectGuard => ItemKind::PerfectGuard,
            ItemUse::Heal => ItemKind::Heal40,
        }
    }
}

/// `(atk + weapon bonus) × affinity`, at least 1.
///
/// Disadvantage divides by 10 instead of multiplying by 0.1.
pub fn player_damage(player: &Player, enemy: &Enemy) -> BigInt {
    let (numerator, divisor) = multiplier_ratio(advantage(player.weapon.element, enemy.element));
    at_least_one(player.total_attack() * BigInt::from(numerator) / BigInt::from(divisor))
}

/// Extra damage granted by a pending guard counter: 10% of the enemy's max HP.
pub fn guard_counter_bonus(enemy: &Enemy) -> BigInt {
    at_least_one(&enemy.max_hp / BigInt::from(GUARD_COUNTER_DIVISOR))
}

/// Damage a guarded hit deals: 10% of enemy ATK, at least 1.
pub fn guarded_damage(enemy: &Enemy) -> BigInt {
    at_least_one(&enemy.atk / BigInt::from(GUARD_DAMAGE_DIVISOR))
}

pub fn player_attack(state: &BattleState) -> Cow<'_, BattleState> {
    if !state.is_ongoing() {
        return Cow::Borrowed(state);
    }

    let mut damage = player_damage(&state.player, &state.enemy);
    if state.guard_counter {
        damage += guard_counter_bonus(&state.enemy);
    }

    let mut next = state.clone();
    next.enemy.hp = non_negative(&state.enemy.hp - &damage);
    next.turn_count += 1;
    next.guard_counter = false;
    trace!(%damage, enemy_hp = %next.enemy.hp, "player attack");
    Cow::Owned(next)
}

pub fn activate_guard(state: &BattleState) -> Cow<'_, BattleState> {
    if !state.is_ongoing() || state.is_guarding {
        return Cow::Borrowed(state);
    }

    let mut next = state.clone();
    next.is_guarding = true;
    next.guard_counter = false;
    Cow::Owned(next)
}

/// The enemy's automatic attack.
///
/// Perfect guard blocks everything; a normal guard takes 10% and cannot drop
/// HP below 1. Both consume the guard and arm a counter.
pub fn enemy_attack(state: &BattleState) -> Cow<'_, BattleState> {
    if !state.is_ongoing() {
        return Cow::Borrowed(state);
    }

    let mut next = state.clone();
    if state.perfect_guard {
        next.perfect_guard = false;
        next.is_guarding = false;
        next.guard_counter = true;
        trace!("enemy attack nullified");
    } else if state.is_guarding {
        let damage = guarded_damage(&state.enemy);
        next.player.hp = at_least_one(&state.player.hp - &damage);
        next.is_guarding = false;
        next.guard_counter = true;
        trace!(%damage, player_hp = %next.player.hp, "guarded enemy attack");
    } else {
        next.player = take_damage(&state.player, &state.enemy.atk);
        trace!(damage = %state.enemy.atk, player_hp = %next.player.hp, "enemy attack");
    }
    Cow::Owned(next)
}

/// Repaints the weapon for the rest of the battle.
///
/// The pre-change element is remembered on first use only.
pub fn use_element_change_item(state: &BattleState, element: Element) -> Cow<'_, BattleState> {
    if !state.is_ongoing() || !has(&state.player.items, ItemKind::ElementChange) {
        return Cow::Borrowed(state);
    }

    let mut next = state.clone();
    next.original_weapon_element = state
        .original_weapon_element
        .or(Some(state.player.weapon.element));
    next.player.weapon.element = element;
    next.player.items = remove_one(&state.player.items, ItemKind::ElementChange).into_owned();
    Cow::Owned(next)
}

pub fn use_perfect_guard_item(state: &BattleState) -> Cow<'_, BattleState> {
    if !state.is_ongoing() || !has(&state.player.items, ItemKind::PerfectGuard) {
        return Cow::Borrowed(state);
    }

    let mut next = state.clone();
    next.perfect_guard = true;
    next.player.items = remove_one(&state.player.items, ItemKind::PerfectGuard).into_owned();
    Cow::Owned(next)
}

/// Restores 40% of max HP (min 1).
pub fn use_heal_item(state: &BattleState) -> Cow<'_, BattleState> {
    if !state.is_ongoing() || !has(&state.player.items, ItemKind::Heal40) {
        return Cow::Borrowed(state);
    }

    let amount = percent_of_min1(&state.player.max_hp, HEAL_ITEM_PERCENT);
    let mut next = state.clone();
    next.player = heal(&state.player, &amount);
    next.player.items = remove_one(&state.player.items, ItemKind::Heal40).into_owned();
    Cow::Owned(next)
}

pub fn use_item(state: &BattleState, item: ItemUse) -> Cow<'_, BattleState> {
    match item {
        ItemUse::ElementChange { element } => use_element_change_item(state, element),
        ItemUse::PerfectGuard => use_perfect_guard_item(state),
        ItemUse::Heal => use_heal_item(state),
    }
}

/// Settles the result from current HP. Player death is checked first, so a
/// double knockout is a defeat.
pub fn check_battle_result(state: &BattleState) -> Cow<'_, BattleState> {
    let result = if is_dead(&state.player) {
        BattleResult::Defeat
    } else if state.enemy.hp < BigInt::one() {
        BattleResult::Victory
    } else {
        BattleResult::Ongoing
    };

    if result == state.result {
        return Cow::Borrowed(state);
    }
    debug!(
        ?result,
        enemy = %state.enemy.name,
        turns = state.turn_count,
        "battle decided"
    );
    let mut next = state.clone();
    next.result = result;
    Cow::Owned(next)
}

/// Puts back the element the weapon had before any repaint this battle.
pub fn restore_weapon_element(state: &BattleState) -> Cow<'_, BattleState> {
    match state.original_weapon_element {
        Some(element) => {
            let mut next = state.clone();
            next.player.weapon.element = element;
            next.original_weapon_element = None;
            Cow::Owned(next)
        }
        None => Cow::Borrowed(state),
    }
}

/// Grants EXP and gold for a victory, restores the weapon element, and rolls
/// a weapon drop.
///
/// Abnormal enemies pay 100× EXP regardless of tier. A state that already
/// carries a drop has been rewarded and is returned unchanged.
pub fn process_battle_rewards<'a>(
    state: &'a BattleState,
    rules: &GameRules,
    area_id: u32,
    rng: &mut impl Rng,
) -> Cow<'a, BattleState> {
    if state.result != BattleResult::Victory || state.dropped_weapon.is_some() {
        return Cow::Borrowed(state);
    }

    let exp = if state.enemy.is_abnormal() {
        &state.enemy.exp_reward * BigInt::from(ABNORMAL_EXP_MULTIPLIER)
    } else {
        state.enemy.exp_reward.clone()
    };

    let mut player = add_exp(&state.player, &exp);
    player.gold += &state.enemy.gold_reward;

    let mut next = state.clone();
    next.player = player;
    let mut next = restore_weapon_element(&next).into_owned();
    next.dropped_weapon = Some(generate_weapon_drop(rules, area_id, rng));

    debug!(
        %exp,
        gold = %state.enemy.gold_reward,
        level = next.player.level,
        "battle rewards granted"
    );
    Cow::Owned(next)
}
