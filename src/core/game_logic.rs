//! Session phase machine.
//!
//! Each operation takes the current `GameState` and returns a `Cow`. An
//! action that does not apply to the current phase (or lacks what it needs,
//! such as gold or heal charges) returns `Cow::Borrowed` with the input, so
//! callers can detect "nothing happened" by identity.

use std::borrow::Cow;

use num_bigint::BigInt;
use num_traits::Signed;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::game_state::{GameState, Phase};
use crate::character::{create_initial_player, heal, is_dead};
use crate::combat::{
    activate_guard, check_battle_result, create_battle_state, enemy_attack, generate_boss,
    generate_enemy, player_attack, process_battle_rewards, use_item, BattleResult, BattleState,
    ItemUse,
};
use crate::core::constants::BOSS_CLEAR_HEAL_BONUS;
use crate::core::numbers::percent_of_min1;
use crate::items::inventory::add_item;
use crate::items::{generate_shop_items, generate_weapon_drop, ItemKind, Weapon};
use crate::map::{
    advance_area, advance_step, current_event, generate_area_events, generate_upcoming_events,
    UpcomingEvent,
};
use crate::rules::GameRules;

/// What to do with a weapon dropped by a defeated enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeaponChoice {
    Equip,
    Keep,
}

/// True when a transition left the state untouched.
pub fn is_noop<T: ToOwned + ?Sized>(result: &Cow<'_, T>) -> bool {
    matches!(result, Cow::Borrowed(_))
}

/// A fresh session standing on step 1 of area 1.
pub fn create_new_game(rules: &GameRules, rng: &mut impl Rng) -> GameState {
    let player = create_initial_player(rng);
    let area_events = generate_area_events(rules, 1, rng);
    debug!(weapon_element = player.weapon.element.name(), "new game");
    GameState {
        player,
        current_area: 1,
        current_step: 1,
        upcoming_events: generate_upcoming_events(&area_events, 1),
        area_events,
        phase: Phase::Exploration,
        heal_count: rules.initial_heal_count,
        battle: None,
        treasure_offer: None,
        shop_items: Vec::new(),
    }
}

/// Starts over after the run has ended.
pub fn restart<'a>(
    state: &'a GameState,
    rules: &GameRules,
    rng: &mut impl Rng,
) -> Cow<'a, GameState> {
    if !state.phase.is_terminal() {
        return Cow::Borrowed(state);
    }
    Cow::Owned(create_new_game(rules, rng))
}

fn with_phase(state: &GameState, phase: Phase) -> GameState {
    debug!(from = ?state.phase, to = ?phase, "phase change");
    GameState {
        phase,
        ..state.clone()
    }
}

/// Branches on the event committed to the current step.
pub fn process_event<'a>(
    state: &'a GameState,
    rules: &GameRules,
    rng: &mut impl Rng,
) -> Cow<'a, GameState> {
    if state.phase != Phase::Exploration {
        return Cow::Borrowed(state);
    }

    match current_event(state) {
        Some(UpcomingEvent::Battle { .. } | UpcomingEvent::Boss { .. }) => {
            Cow::Owned(with_phase(state, Phase::BattlePrep))
        }
        Some(UpcomingEvent::Treasure) => {
            let offer = generate_weapon_drop(rules, state.current_area, rng);
            Cow::Owned(GameState {
                treasure_offer: Some(offer),
                ..with_phase(state, Phase::TreasureSelect)
            })
        }
        Some(UpcomingEvent::Shop) => Cow::Owned(GameState {
            shop_items: generate_shop_items(rules, state.current_area),
            ..with_phase(state, Phase::Shop)
        }),
        None => Cow::Borrowed(state),
    }
}

/// Steps forward and resolves the new square.
pub fn explore<'a>(
    state: &'a GameState,
    rules: &GameRules,
    rng: &mut impl Rng,
) -> Cow<'a, GameState> {
    if state.phase != Phase::Exploration || state.is_last_step() {
        return Cow::Borrowed(state);
    }

    let advanced = advance_step(state).into_owned();
    Cow::Owned(process_event(&advanced, rules, rng).into_owned())
}

/// Spends one heal charge before a fight.
pub fn heal_in_prep<'a>(state: &'a GameState, rules: &GameRules) -> Cow<'a, GameState> {
    if state.phase != Phase::BattlePrep || state.heal_count == 0 {
        return Cow::Borrowed(state);
    }

    let amount = percent_of_min1(&state.player.max_hp, rules.prep_heal_percent);
    Cow::Owned(GameState {
        player: heal(&state.player, &amount),
        heal_count: state.heal_count - 1,
        ..state.clone()
    })
}

/// Materialises the enemy for the current step and opens the battle.
pub fn start_battle<'a>(
    state: &'a GameState,
    rules: &GameRules,
    rng: &mut impl Rng,
) -> Cow<'a, GameState> {
    if state.phase != Phase::BattlePrep {
        return Cow::Borrowed(state);
    }

    let enemy = match current_event(state) {
        Some(UpcomingEvent::Battle { enemy_element }) => {
            generate_enemy(rules, state.current_area, Some(enemy_element), rng)
        }
        Some(UpcomingEvent::Boss { enemy_element }) => {
            generate_boss(rules, state.current_area, Some(enemy_element), rng)
        }
        _ => return Cow::Borrowed(state),
    };

    debug!(
        area = state.current_area,
        step = state.current_step,
        enemy = %enemy.name,
        hp = %enemy.max_hp,
        boss = enemy.is_boss,
        "battle start"
    );
    Cow::Owned(GameState {
        battle: Some(create_battle_state(state.player.clone(), enemy)),
        ..with_phase(state, Phase::Battle)
    })
}

/// Runs one battle transition, then settles the result and grants rewards
/// on victory.
fn apply_battle_action<'a, F>(
    state: &'a GameState,
    rules: &GameRules,
    rng: &mut impl Rng,
    action: F,
) -> Cow<'a, GameState>
where
    F: for<'b> FnOnce(&'b BattleState) -> Cow<'b, BattleState>,
{
    let Some(battle) = state.battle.as_ref().filter(|_| state.phase == Phase::Battle) else {
        return Cow::Borrowed(state);
    };

    let acted = action(battle);
    if is_noop(&acted) {
        return Cow::Borrowed(state);
    }
    let settled = check_battle_result(&acted);
    let rewarded = process_battle_rewards(&settled, rules, state.current_area, rng);

    Cow::Owned(GameState {
        battle: Some(rewarded.into_owned()),
        ..state.clone()
    })
}

pub fn battle_attack<'a>(
    state: &'a GameState,
    rules: &GameRules,
    rng: &mut impl Rng,
) -> Cow<'a, GameState> {
    apply_battle_action(state, rules, rng, player_attack)
}

pub fn battle_guard<'a>(
    state: &'a GameState,
    rules: &GameRules,
    rng: &mut impl Rng,
) -> Cow<'a, GameState> {
    apply_battle_action(state, rules, rng, activate_guard)
}

/// The enemy's timed attack. Safe to fire after the battle is decided.
pub fn battle_enemy_turn<'a>(
    state: &'a GameState,
    rules: &GameRules,
    rng: &mut impl Rng,
) -> Cow<'a, GameState> {
    apply_battle_action(state, rules, rng, enemy_attack)
}

pub fn battle_use_item<'a>(
    state: &'a GameState,
    rules: &GameRules,
    rng: &mut impl Rng,
    item: ItemUse,
) -> Cow<'a, GameState> {
    apply_battle_action(state, rules, rng, |battle| use_item(battle, item))
}

/// Leaves the result screen of a decided battle.
pub fn finish_battle<'a>(
    state: &'a GameState,
    rules: &GameRules,
    rng: &mut impl Rng,
    choice: WeaponChoice,
) -> Cow<'a, GameState> {
    let Some(battle) = state.battle.as_ref().filter(|_| state.phase == Phase::Battle) else {
        return Cow::Borrowed(state);
    };

    match battle.result {
        BattleResult::Ongoing => Cow::Borrowed(state),
        BattleResult::Defeat => handle_death(state),
        BattleResult::Victory => {
            let mut battle = battle.clone();
            if choice == WeaponChoice::Equip {
                if let Some(weapon) = battle.dropped_weapon.take() {
                    debug!(weapon = %weapon.name, bonus = %weapon.attack_bonus, "equipped drop");
                    battle.player.weapon = weapon;
                }
            }
            let chosen = GameState {
                battle: Some(battle),
                ..state.clone()
            };
            Cow::Owned(handle_battle_victory(&chosen, rules, rng).into_owned())
        }
    }
}

/// Returns to the map after a won battle, or clears the boss on the last
/// step.
pub fn handle_battle_victory<'a>(
    state: &'a GameState,
    rules: &GameRules,
    rng: &mut impl Rng,
) -> Cow<'a, GameState> {
    let Some(battle) = state
        .battle
        .as_ref()
        .filter(|b| state.phase == Phase::Battle && b.result == BattleResult::Victory)
    else {
        return Cow::Borrowed(state);
    };

    let back = GameState {
        player: battle.player.clone(),
        battle: None,
        ..with_phase(state, Phase::Exploration)
    };
    if back.is_last_step() {
        Cow::Owned(handle_boss_clear(&back, rules, rng).into_owned())
    } else {
        Cow::Owned(back)
    }
}

/// After the boss of an area falls: the final area ends the run, any other
/// moves on to the next area and grants a heal charge.
///
/// Only applies to the post-battle exploration state on the last step.
pub fn handle_boss_clear<'a>(
    state: &'a GameState,
    rules: &GameRules,
    rng: &mut impl Rng,
) -> Cow<'a, GameState> {
    if state.phase != Phase::Exploration || state.battle.is_some() || !state.is_last_step() {
        return Cow::Borrowed(state);
    }

    if rules.is_final_area(state.current_area) {
        debug!(level = state.player.level, "game clear");
        return Cow::Owned(with_phase(state, Phase::GameClear));
    }

    let moved = advance_area(state, rules, rng);
    Cow::Owned(GameState {
        heal_count: moved.heal_count + BOSS_CLEAR_HEAL_BONUS,
        ..with_phase(&moved, Phase::AreaMove)
    })
}

pub fn confirm_area_move(state: &GameState) -> Cow<'_, GameState> {
    if state.phase != Phase::AreaMove {
        return Cow::Borrowed(state);
    }
    Cow::Owned(with_phase(state, Phase::Exploration))
}

/// Ends the run after a lost battle. The player inside the battle is kept as
/// the final snapshot.
pub fn handle_death(state: &GameState) -> Cow<'_, GameState> {
    let lost = state
        .battle
        .as_ref()
        .is_some_and(|b| b.result == BattleResult::Defeat || is_dead(&b.player));
    if state.phase != Phase::Battle || !lost {
        return Cow::Borrowed(state);
    }
    debug!(area = state.current_area, step = state.current_step, "game over");
    Cow::Owned(GameState {
        player: state.active_player().clone(),
        battle: None,
        ..with_phase(state, Phase::GameOver)
    })
}

pub fn is_game_clear(state: &GameState) -> bool {
    state.phase == Phase::GameClear
}

/// Buys one item. `price` must match the listed price for `kind`.
pub fn process_shop_purchase<'a>(
    state: &'a GameState,
    kind: ItemKind,
    price: &BigInt,
) -> Cow<'a, GameState> {
    let listed = state
        .shop_items
        .iter()
        .any(|s| s.item.kind == kind && s.price == *price);
    if state.phase != Phase::Shop || !listed || price.is_negative() || state.player.gold < *price
    {
        return Cow::Borrowed(state);
    }

    let mut player = state.player.clone();
    player.gold -= price;
    player.items = add_item(&player.items, kind);
    Cow::Owned(GameState {
        player,
        ..state.clone()
    })
}

pub fn process_shop_leave(state: &GameState) -> Cow<'_, GameState> {
    if state.phase != Phase::Shop {
        return Cow::Borrowed(state);
    }
    Cow::Owned(GameState {
        shop_items: Vec::new(),
        ..with_phase(state, Phase::Exploration)
    })
}

pub fn process_treasure_heal<'a>(state: &'a GameState, rules: &GameRules) -> Cow<'a, GameState> {
    if state.phase != Phase::TreasureSelect {
        return Cow::Borrowed(state);
    }

    let amount = percent_of_min1(&state.player.max_hp, rules.treasure_heal_percent);
    Cow::Owned(GameState {
        player: heal(&state.player, &amount),
        treasure_offer: None,
        ..with_phase(state, Phase::Exploration)
    })
}

/// Takes the offered treasure weapon, replacing the equipped one.
pub fn process_treasure_weapon<'a>(state: &'a GameState, weapon: &Weapon) -> Cow<'a, GameState> {
    if state.phase != Phase::TreasureSelect || state.treasure_offer.as_ref() != Some(weapon) {
        return Cow::Borrowed(state);
    }

    let mut player = state.player.clone();
    player.weapon = weapon.clone();
    Cow::Owned(GameState {
        player,
        treasure_offer: None,
        ..with_phase(state, Phase::Exploration)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::inventory::count;
    use num_traits::Zero;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn in_phase(phase: Phase) -> GameState {
        let rules = GameRules::standard();
        let mut rng = create_test_rng();
        GameState {
            phase,
            ..create_new_game(&rules, &mut rng)
        }
    }

    #[test]
    fn test_new_game() {
        let state = in_phase(Phase::Exploration);
        assert_eq!(state.current_area, 1);
        assert_eq!(state.current_step, 1);
        assert_eq!(state.area_events.len(), 8);
        assert_eq!(state.upcoming_events, state.area_events[1..4].to_vec());
        assert_eq!(state.heal_count, 3);
        assert!(state.battle.is_none());
    }

    #[test]
    fn test_restart_only_when_run_ended() {
        let rules = GameRules::standard();
        let mut rng = create_test_rng();
        let playing = in_phase(Phase::Exploration);
        assert!(is_noop(&restart(&playing, &rules, &mut rng)));

        let over = GameState {
            current_area: 5,
            ..in_phase(Phase::GameOver)
        };
        let fresh = restart(&over, &rules, &mut rng);
        assert_eq!(fresh.phase, Phase::Exploration);
        assert_eq!(fresh.current_area, 1);
    }

    #[test]
    fn test_process_event_branches() {
        let rules = GameRules::standard();
        let mut rng = create_test_rng();
        let base = in_phase(Phase::Exploration);

        let mut battle = base.clone();
        battle.area_events[0] = UpcomingEvent::Battle {
            enemy_element: crate::element::Element::Water,
        };
        assert_eq!(process_event(&battle, &rules, &mut rng).phase, Phase::BattlePrep);

        let mut treasure = base.clone();
        treasure.area_events[0] = UpcomingEvent::Treasure;
        let next = process_event(&treasure, &rules, &mut rng);
        assert_eq!(next.phase, Phase::TreasureSelect);
        assert!(next.treasure_offer.is_some());

        let mut shop = base;
        shop.area_events[0] = UpcomingEvent::Shop;
        let next = process_event(&shop, &rules, &mut rng);
        assert_eq!(next.phase, Phase::Shop);
        assert_eq!(next.shop_items.len(), 3);
    }

    #[test]
    fn test_heal_in_prep_spends_charge() {
        let rules = GameRules::standard();
        let mut state = in_phase(Phase::BattlePrep);
        state.player.hp = BigInt::from(5);
        let next = heal_in_prep(&state, &rules);
        assert_eq!(next.player.hp, BigInt::from(40));
        assert_eq!(next.heal_count, 2);
    }

    #[test]
    fn test_heal_in_prep_without_charges_is_noop() {
        let rules = GameRules::standard();
        let state = GameState {
            heal_count: 0,
            ..in_phase(Phase::BattlePrep)
        };
        assert!(is_noop(&heal_in_prep(&state, &rules)));
        let exploring = in_phase(Phase::Exploration);
        assert!(is_noop(&heal_in_prep(&exploring, &rules)));
    }

    #[test]
    fn test_shop_purchase_requires_gold() {
        let rules = GameRules::standard();
        let mut state = in_phase(Phase::Shop);
        state.shop_items = generate_shop_items(&rules, 1);
        state.player.gold = BigInt::from(25);
        let price = BigInt::from(20);
        let bought = process_shop_purchase(&state, ItemKind::Heal40, &price).into_owned();
        assert_eq!(bought.player.gold, BigInt::from(5));
        assert_eq!(count(&bought.player.items, ItemKind::Heal40), 1);

        let again = process_shop_purchase(&bought, ItemKind::Heal40, &price);
        assert!(std::ptr::eq(&*again, &bought));
    }

    #[test]
    fn test_shop_purchase_rejects_unlisted_price() {
        let rules = GameRules::standard();
        let mut state = in_phase(Phase::Shop);
        state.shop_items = generate_shop_items(&rules, 1);
        state.player.gold = BigInt::from(1_000);

        assert!(is_noop(&process_shop_purchase(&state, ItemKind::Heal40, &BigInt::from(0))));
        assert!(is_noop(&process_shop_purchase(
            &state,
            ItemKind::PerfectGuard,
            &BigInt::from(20)
        )));

        state.shop_items.clear();
        assert!(is_noop(&process_shop_purchase(&state, ItemKind::Heal40, &BigInt::from(20))));
    }

    #[test]
    fn test_shop_purchase_outside_shop_is_noop() {
        let mut state = in_phase(Phase::Exploration);
        state.player.gold = BigInt::from(1_000);
        assert!(is_noop(&process_shop_purchase(
            &state,
            ItemKind::PerfectGuard,
            &BigInt::from(1)
        )));
    }

    #[test]
    fn test_shop_leave() {
        let state = in_phase(Phase::Shop);
        assert_eq!(process_shop_leave(&state).phase, Phase::Exploration);
        assert!(is_noop(&process_shop_leave(&in_phase(Phase::Battle))));
    }

    #[test]
    fn test_treasure_choices() {
        let rules = GameRules::standard();
        let mut state = in_phase(Phase::TreasureSelect);
        state.player.hp = BigInt::from(1);
        let healed = process_treasure_heal(&state, &rules);
        assert_eq!(healed.player.hp, BigInt::from(36));
        assert_eq!(healed.phase, Phase::Exploration);

        let blade = Weapon::new("Found Blade", crate::element::Element::Earth, BigInt::from(9));
        state.treasure_offer = Some(blade.clone());
        let armed = process_treasure_weapon(&state, &blade);
        assert_eq!(armed.player.weapon, blade);
        assert_eq!(armed.phase, Phase::Exploration);
        assert!(armed.treasure_offer.is_none());
    }

    #[test]
    fn test_treasure_weapon_must_be_the_offer() {
        let mut state = in_phase(Phase::TreasureSelect);
        state.treasure_offer = Some(Weapon::new(
            "Found Blade",
            crate::element::Element::Earth,
            BigInt::from(9),
        ));
        let forged = Weapon::new("Forged Blade", crate::element::Element::Earth, BigInt::from(999));
        assert!(is_noop(&process_treasure_weapon(&state, &forged)));

        state.treasure_offer = None;
        assert!(is_noop(&process_treasure_weapon(&state, &forged)));
    }

    #[test]
    fn test_confirm_area_move() {
        assert_eq!(
            confirm_area_move(&in_phase(Phase::AreaMove)).phase,
            Phase::Exploration
        );
        assert!(is_noop(&confirm_area_move(&in_phase(Phase::Shop))));
    }

    fn in_battle(rules: &GameRules, rng: &mut ChaCha8Rng) -> GameState {
        let mut prep = in_phase(Phase::BattlePrep);
        prep.area_events[0] = UpcomingEvent::Battle {
            enemy_element: crate::element::Element::Water,
        };
        start_battle(&prep, rules, rng).into_owned()
    }

    #[test]
    fn test_handle_death_outside_lost_battle_is_noop() {
        let rules = GameRules::standard();
        let mut rng = create_test_rng();
        for phase in [Phase::Exploration, Phase::Shop, Phase::BattlePrep, Phase::AreaMove] {
            assert!(is_noop(&handle_death(&in_phase(phase))));
        }

        let fighting = in_battle(&rules, &mut rng);
        assert_eq!(fighting.phase, Phase::Battle);
        assert!(is_noop(&handle_death(&fighting)));
    }

    #[test]
    fn test_handle_death_after_defeat() {
        let rules = GameRules::standard();
        let mut rng = create_test_rng();
        let mut state = in_battle(&rules, &mut rng);
        if let Some(battle) = state.battle.as_mut() {
            battle.enemy.atk = BigInt::from(1_000);
        }
        let lost = battle_enemy_turn(&state, &rules, &mut rng).into_owned();
        assert_eq!(lost.battle.as_ref().unwrap().result, BattleResult::Defeat);

        let dead = handle_death(&lost);
        assert_eq!(dead.phase, Phase::GameOver);
        assert!(dead.battle.is_none());
        assert!(dead.player.hp.is_zero());
        assert!(is_noop(&handle_death(&dead)));
    }

    #[test]
    fn test_boss_clear_moves_area_and_grants_heal() {
        let rules = GameRules::standard();
        let mut rng = create_test_rng();
        let state = GameState {
            current_step: 8,
            heal_count: 0,
            ..in_phase(Phase::Exploration)
        };
        let next = handle_boss_clear(&state, &rules, &mut rng);
        assert_eq!(next.phase, Phase::AreaMove);
        assert_eq!(next.current_area, 2);
        assert_eq!(next.current_step, 1);
        assert_eq!(next.heal_count, 1);
    }

    #[test]
    fn test_boss_clear_before_boss_is_beaten_is_noop() {
        let rules = GameRules::standard();
        let mut rng = create_test_rng();
        let prep = GameState {
            current_step: 8,
            ..in_phase(Phase::BattlePrep)
        };
        assert!(is_noop(&handle_boss_clear(&prep, &rules, &mut rng)));

        let fighting = start_battle(&prep, &rules, &mut rng).into_owned();
        assert_eq!(fighting.phase, Phase::Battle);
        assert!(fighting.battle.as_ref().unwrap().enemy.is_boss);
        assert!(is_noop(&handle_boss_clear(&fighting, &rules, &mut rng)));

        let exploring_early = in_phase(Phase::Exploration);
        assert!(is_noop(&handle_boss_clear(&exploring_early, &rules, &mut rng)));
    }

    #[test]
    fn test_final_boss_clears_game() {
        let rules = GameRules::standard();
        let mut rng = create_test_rng();
        let state = GameState {
            current_area: 8,
            current_step: 8,
            ..in_phase(Phase::Exploration)
        };
        let next = handle_boss_clear(&state, &rules, &mut rng);
        assert!(is_game_clear(&next));
        assert_eq!(next.current_area, 8);
    }

    #[test]
    fn test_battle_actions_need_battle_phase() {
        let rules = GameRules::standard();
        let mut rng = create_test_rng();
        let state = in_phase(Phase::Exploration);
        assert!(is_noop(&battle_attack(&state, &rules, &mut rng)));
        assert!(is_noop(&battle_enemy_turn(&state, &rules, &mut rng)));
        assert!(is_noop(&finish_battle(&state, &rules, &mut rng, WeaponChoice::Keep)));
        assert!(state.player.gold.is_zero());
    }
}
