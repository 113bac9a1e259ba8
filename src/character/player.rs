//! Player stats and the level curve.
//!
//! Every function here takes a player by reference and returns a new value.

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants::{
    EXP_CURVE_COEFFICIENT, EXP_CURVE_EXPONENTIAL_THRESHOLD, INITIAL_ATK, INITIAL_HP,
    INITIAL_LEVEL, LEVEL_GROWTH_BANDS,
};
use crate::core::numbers::non_negative;
use crate::element::Element;
use crate::items::{Item, Weapon};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub level: u32,
    pub exp: BigInt,
    pub hp: BigInt,
    pub max_hp: BigInt,
    pub atk: BigInt,
    pub gold: BigInt,
    pub weapon: Weapon,
    pub items: Vec<Item>,
}

impl Player {
    /// Base attack plus the weapon bonus.
    pub fn total_attack(&self) -> BigInt {
        &self.atk + &self.weapon.attack_bonus
    }
}

/// Fresh level-1 player carrying a starter weapon of a random element.
pub fn create_initial_player(rng: &mut impl Rng) -> Player {
    Player {
        level: INITIAL_LEVEL,
        exp: BigInt::zero(),
        hp: BigInt::from(INITIAL_HP),
        max_hp: BigInt::from(INITIAL_HP),
        atk: BigInt::from(INITIAL_ATK),
        gold: BigInt::zero(),
        weapon: Weapon::starter(Element::random(rng)),
        items: Vec::new(),
    }
}

/// Cumulative EXP needed to leave `level`.
///
/// `10·L²`, plus `2^(L−10)` past level 10. Strictly increasing.
pub fn required_exp(level: u32) -> BigInt {
    let l = BigInt::from(level);
    let quadratic = BigInt::from(EXP_CURVE_COEFFICIENT) * &l * &l;
    if level > EXP_CURVE_EXPONENTIAL_THRESHOLD {
        let exponent = (level - EXP_CURVE_EXPONENTIAL_THRESHOLD) as usize;
        quadratic + (BigInt::one() << exponent)
    } else {
        quadratic
    }
}

/// (maxHp gain, atk gain) for leaving `level`.
pub fn level_growth(level: u32) -> (BigInt, BigInt) {
    let (_, hp, atk) = LEVEL_GROWTH_BANDS
        .iter()
        .copied()
        .find(|(max_level, _, _)| level <= *max_level)
        .unwrap_or(LEVEL_GROWTH_BANDS[LEVEL_GROWTH_BANDS.len() - 1]);
    (BigInt::from(hp), BigInt::from(atk))
}

/// Gains one level. Current HP rises by the same amount as max HP.
pub fn level_up(player: &Player) -> Player {
    let (hp_gain, atk_gain) = level_growth(player.level);
    Player {
        level: player.level + 1,
        max_hp: &player.max_hp + &hp_gain,
        hp: &player.hp + &hp_gain,
        atk: &player.atk + &atk_gain,
        ..player.clone()
    }
}

/// Adds EXP and levels up for as long as the threshold is met.
///
/// EXP is cumulative; levelling never subtracts from it.
pub fn add_exp(player: &Player, amount: &BigInt) -> Player {
    let mut next = Player {
        exp: &player.exp + non_negative(amount.clone()),
        ..player.clone()
    };
    let start_level = next.level;
    while next.exp >= required_exp(next.level) {
        next = level_up(&next);
    }
    if next.level > start_level {
        debug!(from = start_level, to = next.level, "level up");
    }
    next
}

/// Restores HP, capped at max HP.
pub fn heal(player: &Player, amount: &BigInt) -> Player {
    let healed = &player.hp + non_negative(amount.clone());
    Player {
        hp: healed.min(player.max_hp.clone()),
        ..player.clone()
    }
}

/// Removes HP, floored at zero.
pub fn take_damage(player: &Player, amount: &BigInt) -> Player {
    let remaining = &player.hp - non_negative(amount.clone());
    Player {
        hp: non_negative(remaining),
        ..player.clone()
    }
}

pub fn is_dead(player: &Player) -> bool {
    !player.hp.is_positive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_player() -> Player {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        create_initial_player(&mut rng)
    }

    #[test]
    fn test_initial_player() {
        let player = create_test_player();
        assert_eq!(player.level, 1);
        assert_eq!(player.hp, BigInt::from(50));
        assert_eq!(player.max_hp, BigInt::from(50));
        assert_eq!(player.atk, BigInt::from(10));
        assert!(player.exp.is_zero());
        assert!(player.gold.is_zero());
        assert!(player.weapon.attack_bonus.is_zero());
        assert!(player.items.is_empty());
    }

    #[test]
    fn test_required_exp_curve() {
        assert_eq!(required_exp(1), BigInt::from(10));
        assert_eq!(required_exp(2), BigInt::from(40));
        assert_eq!(required_exp(10), BigInt::from(1_000));
        assert_eq!(required_exp(11), BigInt::from(1_210 + 2));
        assert_eq!(required_exp(20), BigInt::from(4_000 + 1_024));
    }

    #[test]
    fn test_required_exp_strictly_increasing() {
        for level in 1..500 {
            assert!(required_exp(level + 1) > required_exp(level), "level {level}");
        }
    }

    #[test]
    fn test_level_growth_bands() {
        assert_eq!(level_growth(1), (BigInt::from(8), BigInt::from(3)));
        assert_eq!(level_growth(10), (BigInt::from(8), BigInt::from(3)));
        assert_eq!(level_growth(11), (BigInt::from(20), BigInt::from(8)));
        assert_eq!(level_growth(201), (BigInt::from(5_000), BigInt::from(2_000)));
    }

    #[test]
    fn test_level_up_preserves_missing_hp() {
        let player = Player {
            hp: BigInt::from(20),
            ..create_test_player()
        };
        let next = level_up(&player);
        assert_eq!(next.level, 2);
        assert_eq!(next.max_hp, BigInt::from(58));
        assert_eq!(next.hp, BigInt::from(28));
        assert_eq!(next.atk, BigInt::from(13));
    }

    #[test]
    fn test_add_exp_keeps_cumulative_exp() {
        let player = Player {
            exp: BigInt::from(5),
            ..create_test_player()
        };
        let next = add_exp(&player, &BigInt::from(10));
        assert_eq!(next.level, 2);
        assert_eq!(next.exp, BigInt::from(15));
    }

    #[test]
    fn test_add_exp_cascades_multiple_levels() {
        let player = create_test_player();
        let next = add_exp(&player, &BigInt::from(1_000));
        // 1000 >= 10·L² for L ≤ 10, and required_exp(11) = 1212
        assert_eq!(next.level, 11);
    }

    #[test]
    fn test_add_exp_terminates_on_huge_injection() {
        let player = create_test_player();
        let huge: BigInt = "1000000000000000000000000000000000000000".parse().unwrap();
        let next = add_exp(&player, &huge);
        assert!(next.exp < required_exp(next.level));
        assert!(next.exp >= required_exp(next.level - 1));
    }

    #[test]
    fn test_heal_caps_at_max() {
        let player = Player {
            hp: BigInt::from(45),
            ..create_test_player()
        };
        assert_eq!(heal(&player, &BigInt::from(100)).hp, BigInt::from(50));
        assert_eq!(heal(&player, &BigInt::from(3)).hp, BigInt::from(48));
    }

    #[test]
    fn test_take_damage_floors_at_zero() {
        let player = create_test_player();
        let hurt = take_damage(&player, &BigInt::from(500));
        assert!(hurt.hp.is_zero());
        assert!(is_dead(&hurt));
        assert!(!is_dead(&player));
    }

    #[test]
    fn test_functions_do_not_touch_input() {
        let player = create_test_player();
        let _ = take_damage(&player, &BigInt::from(10));
        let _ = add_exp(&player, &BigInt::from(100));
        assert_eq!(player.hp, BigInt::from(50));
        assert_eq!(player.level, 1);
    }
}
