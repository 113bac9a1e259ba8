//! Autoplay of whole sessions through the public session API.
//!
//! Scripted policy: heal in prep below half HP, guard when the next hit would
//! be lethal, otherwise attack. Better weapons are always taken.

use num_bigint::BigInt;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use super::config::SimConfig;
use super::report::SimReport;
use crate::character::Player;
use crate::combat::{BattleResult, BattleState, ItemUse};
use crate::core::{
    battle_attack, battle_enemy_turn, battle_guard, battle_use_item, confirm_area_move,
    create_new_game, explore, finish_battle, heal_in_prep, is_noop, process_shop_leave,
    process_shop_purchase, process_treasure_heal, process_treasure_weapon, start_battle,
    GameState, Phase, WeaponChoice,
};
use crate::element::{advantage, Advantage};
use crate::items::inventory::{count, has};
use crate::items::ItemKind;
use crate::rules::GameRules;

/// Heal before a fight below this share of max HP.
const PREP_HEAL_THRESHOLD_PERCENT: u32 = 50;
/// Drink a potion mid-battle below this share of max HP.
const POTION_THRESHOLD_PERCENT: u32 = 30;
const MAX_POTIONS: usize = 3;
const MAX_SHIELDS: usize = 1;

/// Outcome of one simulated session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub cleared: bool,
    pub died: bool,
    pub final_area: u32,
    pub final_step: u32,
    pub final_level: u32,
    pub actions: u64,
    pub battles_won: u64,
    pub abnormal_kills: u64,
    pub weapons_equipped: u64,
    pub heals_used: u64,
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig, rules: &GameRules) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_single_run(config, rules, &mut rng);

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {} at area {} step {}, level {}, {} wins, {} actions",
                run_idx + 1,
                config.num_runs,
                if run.cleared {
                    "cleared"
                } else if run.died {
                    "died"
                } else {
                    "timed out"
                },
                run.final_area,
                run.final_step,
                run.final_level,
                run.battles_won,
                run.actions
            );
        }
        all_runs.push(run);
    }

    SimReport::from_runs(all_runs, rules.area_count(), config.max_actions_per_run)
}

/// Counters accumulated while a session is played.
#[derive(Default)]
struct RunTracker {
    battles_won: u64,
    abnormal_kills: u64,
    weapons_equipped: u64,
    heals_used: u64,
    taps_since_enemy: u32,
}

/// Plays one session from a fresh game until it ends or runs out of actions.
pub fn simulate_single_run(
    config: &SimConfig,
    rules: &GameRules,
    rng: &mut impl Rng,
) -> RunStats {
    let mut state = create_new_game(rules, rng);
    let mut tracker = RunTracker::default();
    let mut actions = 0;

    while actions < config.max_actions_per_run && !state.phase.is_terminal() {
        actions += 1;
        match play_action(&state, rules, rng, config, &mut tracker) {
            Some(next) => state = next,
            None => break,
        }
    }

    let player = state.active_player();
    RunStats {
        cleared: state.phase == Phase::GameClear,
        died: state.phase == Phase::GameOver,
        final_area: state.current_area,
        final_step: state.current_step,
        final_level: player.level,
        actions,
        battles_won: tracker.battles_won,
        abnormal_kills: tracker.abnormal_kills,
        weapons_equipped: tracker.weapons_equipped,
        heals_used: tracker.heals_used,
    }
}

fn below_percent(player: &Player, percent: u32) -> bool {
    &player.hp * BigInt::from(100u32) < &player.max_hp * BigInt::from(percent)
}

/// One policy decision. `None` means the session is stuck.
fn play_action(
    state: &GameState,
    rules: &GameRules,
    rng: &mut impl Rng,
    config: &SimConfig,
    tracker: &mut RunTracker,
) -> Option<GameState> {
    let next = match state.phase {
        Phase::Exploration => explore(state, rules, rng),
        Phase::BattlePrep => {
            if state.heal_count > 0 && below_percent(&state.player, PREP_HEAL_THRESHOLD_PERCENT) {
                tracker.heals_used += 1;
                heal_in_prep(state, rules)
            } else {
                tracker.taps_since_enemy = 0;
                start_battle(state, rules, rng)
            }
        }
        Phase::Battle => return play_battle_turn(state, rules, rng, config, tracker),
        Phase::TreasureSelect => match &state.treasure_offer {
            Some(offer) if offer.attack_bonus > state.player.weapon.attack_bonus => {
                tracker.weapons_equipped += 1;
                process_treasure_weapon(state, offer)
            }
            _ => process_treasure_heal(state, rules),
        },
        Phase::Shop => match shop_pick(state) {
            Some((kind, price)) => process_shop_purchase(state, kind, &price),
            None => process_shop_leave(state),
        },
        Phase::AreaMove => confirm_area_move(state),
        Phase::GameOver | Phase::GameClear => return None,
    };

    if is_noop(&next) {
        None
    } else {
        Some(next.into_owned())
    }
}

/// Potions first, then one shield, while gold allows.
fn shop_pick(state: &GameState) -> Option<(ItemKind, BigInt)> {
    let items = &state.player.items;
    let wanted = [
        (ItemKind::Heal40, count(items, ItemKind::Heal40) < MAX_POTIONS),
        (ItemKind::PerfectGuard, count(items, ItemKind::PerfectGuard) < MAX_SHIELDS),
    ];
    wanted
        .iter()
        .filter(|(_, want)| *want)
        .find_map(|(kind, _)| {
            state
                .shop_items
                .iter()
                .find(|s| s.item.kind == *kind && state.player.gold >= s.price)
                .map(|s| (*kind, s.price.clone()))
        })
}

enum BattleMove {
    Attack,
    Guard,
    Item(ItemUse),
}

fn choose_battle_move(battle: &BattleState, enemy_attacks_next: bool) -> BattleMove {
    let player = &battle.player;
    let enemy = &battle.enemy;

    if has(&player.items, ItemKind::Heal40) && below_percent(player, POTION_THRESHOLD_PERCENT) {
        return BattleMove::Item(ItemUse::Heal);
    }

    let protected = battle.is_guarding || battle.perfect_guard;
    if enemy_attacks_next && !protected && enemy.atk >= player.hp {
        return if has(&player.items, ItemKind::PerfectGuard) {
            BattleMove::Item(ItemUse::PerfectGuard)
        } else {
            BattleMove::Guard
        };
    }

    if advantage(player.weapon.element, enemy.element) == Advantage::Disadvantage
        && has(&player.items, ItemKind::ElementChange)
    {
        return BattleMove::Item(ItemUse::ElementChange {
            element: enemy.element.beaten_by(),
        });
    }

    BattleMove::Attack
}

fn play_battle_turn(
    state: &GameState,
    rules: &GameRules,
    rng: &mut impl Rng,
    config: &SimConfig,
    tracker: &mut RunTracker,
) -> Option<GameState> {
    let battle = state.battle.as_ref()?;

    if !battle.is_ongoing() {
        if battle.result == BattleResult::Victory {
            tracker.battles_won += 1;
            if battle.enemy.is_abnormal() {
                tracker.abnormal_kills += 1;
            }
        }
        let choice = match &battle.dropped_weapon {
            Some(drop) if drop.attack_bonus > battle.player.weapon.attack_bonus => {
                tracker.weapons_equipped += 1;
                WeaponChoice::Equip
            }
            _ => WeaponChoice::Keep,
        };
        return Some(finish_battle(state, rules, rng, choice).into_owned());
    }

    let enemy_attacks_next = tracker.taps_since_enemy + 1 >= config.taps_per_enemy_attack;
    let acted = match choose_battle_move(battle, enemy_attacks_next) {
        BattleMove::Attack => battle_attack(state, rules, rng),
        BattleMove::Guard => battle_guard(state, rules, rng),
        BattleMove::Item(item) => battle_use_item(state, rules, rng, item),
    }
    .into_owned();

    tracker.taps_since_enemy += 1;
    if tracker.taps_since_enemy < config.taps_per_enemy_attack {
        return Some(acted);
    }
    tracker.taps_since_enemy = 0;
    Some(battle_enemy_turn(&acted, rules, rng).into_owned())
}
