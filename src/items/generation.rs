//! Weapon drops and shop stock.

use num_bigint::BigInt;
use rand::Rng;

use super::catalog::weapons_for_area;
use super::types::{Item, ShopItem, Weapon, ALL_ITEM_KINDS};
use crate::core::constants::{
    FALLBACK_WEAPON_NAME, WEAPON_DROP_BASE_BONUS, WEAPON_DROP_ROLL_MAX, WEAPON_DROP_ROLL_MIN,
};
use crate::core::numbers::scale;
use crate::element::Element;
use crate::rules::GameRules;

/// Rolls a weapon from the area's catalog.
///
/// Bonus is `base × rewardMultiplier × U[0.8, 1.2]`, floored. An area with no
/// catalog entries yields a generic blade with a random element.
pub fn generate_weapon_drop(rules: &GameRules, area_id: u32, rng: &mut impl Rng) -> Weapon {
    let area = rules.area(area_id);
    let candidates = weapons_for_area(&rules.weapons, area_id);

    let (name, element) = if candidates.is_empty() {
        (FALLBACK_WEAPON_NAME.to_string(), Element::random(rng))
    } else {
        let entry = candidates[rng.gen_range(0..candidates.len())];
        (entry.name.clone(), entry.element)
    };

    let roll = rng.gen_range(WEAPON_DROP_ROLL_MIN..=WEAPON_DROP_ROLL_MAX);
    let attack_bonus = scale(
        &BigInt::from(WEAPON_DROP_BASE_BONUS),
        area.reward_multiplier * roll,
    );

    Weapon::new(name, element, attack_bonus)
}

/// The fixed three-item shop list with prices scaled by the area's reward
/// multiplier.
pub fn generate_shop_items(rules: &GameRules, area_id: u32) -> Vec<ShopItem> {
    let area = rules.area(area_id);
    ALL_ITEM_KINDS
        .iter()
        .map(|&kind| ShopItem {
            item: Item::new(kind),
            price: scale(
                &BigInt::from(rules.prices.base_price(kind)),
                area.reward_multiplier,
            ),
        })
        .collect()
}
