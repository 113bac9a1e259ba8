//! Enemy stat rolls.
//!
//! Stats are `base × area multiplier × factor`, where the factor is the
//! individual variation for normal enemies (times the abnormal tier for HP)
//! and the boss multiplier for bosses. Every stat is floored to at least 1.

use num_bigint::BigInt;
use rand::Rng;
use tracing::debug;

use super::types::Enemy;
use crate::core::constants::{
    ABNORMAL_TIERS, ABNORMAL_TIER_WEIGHTS, ENEMY_BASE_ATK, ENEMY_BASE_EXP, ENEMY_BASE_GOLD,
    ENEMY_BASE_HP, FALLBACK_MONSTER_NAME,
};
use crate::core::numbers::scale_min1;
use crate::element::{roll_element, Element};
use crate::rules::GameRules;
use crate::zones::{boss_for_area, monsters_for_area, AreaConfig};

/// Draws a variation in `[min, max]` skewed toward `min` (`min + spread·r²`).
pub fn roll_individual_variation(area: &AreaConfig, rng: &mut impl Rng) -> f64 {
    let r: f64 = rng.gen();
    area.individual_variation.min + area.individual_variation.spread() * r * r
}

/// Rolls for a rare spawn, returning its HP tier.
pub fn roll_abnormal(area: &AreaConfig, rng: &mut impl Rng) -> Option<u32> {
    if rng.gen::<f64>() >= area.abnormal_rate {
        return None;
    }

    let total: u32 = ABNORMAL_TIER_WEIGHTS.iter().sum();
    let mut roll = rng.gen_range(0..total);
    for (tier, weight) in ABNORMAL_TIERS.iter().zip(ABNORMAL_TIER_WEIGHTS.iter()) {
        if roll < *weight {
            return Some(*tier);
        }
        roll -= weight;
    }
    Some(ABNORMAL_TIERS[0])
}

struct StatFactors {
    hp: f64,
    atk: f64,
    reward: f64,
}

fn build_enemy(
    name: String,
    element: Element,
    factors: StatFactors,
    abnormal_tier: Option<u32>,
    is_boss: bool,
) -> Enemy {
    let hp = scale_min1(&BigInt::from(ENEMY_BASE_HP), factors.hp);
    Enemy {
        name,
        element,
        max_hp: hp.clone(),
        hp,
        atk: scale_min1(&BigInt::from(ENEMY_BASE_ATK), factors.atk),
        exp_reward: scale_min1(&BigInt::from(ENEMY_BASE_EXP), factors.reward),
        gold_reward: scale_min1(&BigInt::from(ENEMY_BASE_GOLD), factors.reward),
        abnormal_tier,
        is_boss,
    }
}

/// Generates a normal encounter for `area_id`.
///
/// With a preset element the name is drawn from same-element monsters when
/// any exist; otherwise a random catalog monster brings its own element. An
/// empty catalog yields a generic monster.
pub fn generate_enemy(
    rules: &GameRules,
    area_id: u32,
    preset_element: Option<Element>,
    rng: &mut impl Rng,
) -> Enemy {
    let area = rules.area(area_id);
    let candidates = monsters_for_area(&rules.monsters, area_id);

    let (name, element) = match preset_element {
        Some(element) => {
            let same: Vec<_> = candidates.iter().filter(|m| m.element == element).collect();
            let name = if !same.is_empty() {
                same[rng.gen_range(0..same.len())].name.clone()
            } else if !candidates.is_empty() {
                candidates[rng.gen_range(0..candidates.len())].name.clone()
            } else {
                FALLBACK_MONSTER_NAME.to_string()
            };
            (name, element)
        }
        None if !candidates.is_empty() => {
            let picked = candidates[rng.gen_range(0..candidates.len())];
            (picked.name.clone(), picked.element)
        }
        None => (
            FALLBACK_MONSTER_NAME.to_string(),
            roll_element(&area.element_distribution.as_array(), rng),
        ),
    };

    let variation = roll_individual_variation(&area, rng);
    let abnormal_tier = roll_abnormal(&area, rng);
    let tier_factor = abnormal_tier.map_or(1.0, f64::from);

    if let Some(tier) = abnormal_tier {
        debug!(area = area_id, %name, tier, "abnormal enemy spawned");
    }

    build_enemy(
        name,
        element,
        StatFactors {
            hp: area.hp_multiplier * variation * tier_factor,
            atk: area.atk_multiplier * variation,
            reward: area.reward_multiplier * variation,
        },
        abnormal_tier,
        false,
    )
}

/// Generates the boss of `area_id`. Bosses never vary and are never abnormal.
pub fn generate_boss(
    rules: &GameRules,
    area_id: u32,
    preset_element: Option<Element>,
    rng: &mut impl Rng,
) -> Enemy {
    let area = rules.area(area_id);
    let entry = boss_for_area(&rules.monsters, area_id);

    let name = entry
        .map(|b| b.name.clone())
        .unwrap_or_else(|| format!("Guardian of {}", area.name));
    let element = preset_element
        .or_else(|| entry.map(|b| b.element))
        .unwrap_or_else(|| roll_element(&area.element_distribution.as_array(), rng));

    build_enemy(
        name,
        element,
        StatFactors {
            hp: area.hp_multiplier * area.boss_multiplier,
            atk: area.atk_multiplier * area.boss_multiplier,
            reward: area.reward_multiplier * area.boss_multiplier,
        },
        None,
        true,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_variation_stays_in_range() {
        let rules = GameRules::standard();
        let mut rng = create_test_rng();
        for area in &rules.areas {
            for _ in 0..200 {
                let v = roll_individual_variation(area, &mut rng);
                assert!(v >= area.individual_variation.min);
                assert!(v <= area.individual_variation.max);
            }
        }
    }

    #[test]
    fn test_variation_skews_low() {
        let rules = GameRules::standard();
        let area = &rules.areas[7];
        let mut rng = create_test_rng();
        let n = 5_000;
        let mean: f64 = (0..n)
            .map(|_| roll_individual_variation(area, &mut rng))
            .sum::<f64>()
            / n as f64;
        let midpoint = (area.individual_variation.min + area.individual_variation.max) / 2.0;
        assert!(mean < midpoint);
    }

    #[test]
    fn test_abnormal_never_rolls_at_zero_rate() {
        let mut area = AreaConfig::neutral(1);
        area.abnormal_rate = 0.0;
        let mut rng = create_test_rng();
        for _ in 0..1_000 {
            assert_eq!(roll_abnormal(&area, &mut rng), None);
        }
    }

    #[test]
    fn test_abnormal_always_rolls_a_known_tier_at_full_rate() {
        let mut area = AreaConfig::neutral(1);
        area.abnormal_rate = 1.0;
        let mut rng = create_test_rng();
        let mut seen = [false; 4];
        for _ in 0..1_000 {
            let tier = roll_abnormal(&area, &mut rng).unwrap();
            let idx = ABNORMAL_TIERS.iter().position(|t| *t == tier).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_enemy_starts_at_full_hp() {
        let rules = GameRules::standard();
        let mut rng = create_test_rng();
        for area_id in 1..=8 {
            let enemy = generate_enemy(&rules, area_id, None, &mut rng);
            assert_eq!(enemy.hp, enemy.max_hp);
            assert!(enemy.atk >= BigInt::from(1));
            assert!(enemy.gold_reward >= BigInt::from(1));
            assert!(!enemy.is_boss);
        }
    }

    #[test]
    fn test_preset_element_is_respected() {
        let rules = GameRules::standard();
        let mut rng = create_test_rng();
        for _ in 0..50 {
            let enemy = generate_enemy(&rules, 1, Some(Element::Thunder), &mut rng);
            assert_eq!(enemy.element, Element::Thunder);
            assert_eq!(enemy.name, "Shard Crow");
        }
    }

    #[test]
    fn test_area_one_stats_within_bounds() {
        let mut rules = GameRules::standard();
        rules.areas[0].abnormal_rate = 0.0;
        let mut rng = create_test_rng();
        for _ in 0..200 {
            let enemy = generate_enemy(&rules, 1, None, &mut rng);
            // 30 × [0.85, 1.15]
            assert!(enemy.max_hp >= BigInt::from(25) && enemy.max_hp <= BigInt::from(34));
            assert!(enemy.abnormal_tier.is_none());
        }
    }

    #[test]
    fn test_abnormal_enemy_multiplies_hp_only() {
        let mut rules = GameRules::standard();
        rules.areas[0].abnormal_rate = 1.0;
        rules.areas[0].individual_variation.min = 1.0;
        rules.areas[0].individual_variation.max = 1.0;
        let mut rng = create_test_rng();
        let enemy = generate_enemy(&rules, 1, None, &mut rng);
        let tier = enemy.abnormal_tier.unwrap();
        assert!(enemy.is_abnormal());
        assert_eq!(enemy.max_hp, BigInt::from(30 * tier));
        assert_eq!(enemy.atk, BigInt::from(5));
        assert_eq!(enemy.exp_reward, BigInt::from(16));
    }

    #[test]
    fn test_empty_catalog_falls_back() {
        let rules = GameRules {
            monsters: Vec::new(),
            ..GameRules::standard()
        };
        let mut rng = create_test_rng();
        let enemy = generate_enemy(&rules, 3, None, &mut rng);
        assert_eq!(enemy.name, FALLBACK_MONSTER_NAME);
        let boss = generate_boss(&rules, 3, None, &mut rng);
        assert_eq!(boss.name, "Guardian of Cavern");
    }

    #[test]
    fn test_boss_uses_boss_multiplier() {
        let rules = GameRules::standard();
        let mut rng = create_test_rng();
        let boss = generate_boss(&rules, 1, None, &mut rng);
        assert_eq!(boss.name, "Graze Beast");
        assert_eq!(boss.element, Element::Earth);
        assert_eq!(boss.max_hp, BigInt::from(60));
        assert_eq!(boss.atk, BigInt::from(10));
        assert!(boss.is_boss);
        assert!(!boss.is_abnormal());
    }

    #[test]
    fn test_boss_preset_element_overrides_catalog() {
        let rules = GameRules::standard();
        let mut rng = create_test_rng();
        let boss = generate_boss(&rules, 1, Some(Element::Water), &mut rng);
        assert_eq!(boss.element, Element::Water);
        assert_eq!(boss.name, "Graze Beast");
    }
}
