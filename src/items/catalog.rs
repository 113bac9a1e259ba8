//! Weapon catalog and shop price table.

use serde::{Deserialize, Serialize};

use super::types::ItemKind;
use crate::core::constants::{
    ELEMENT_CHANGE_BASE_PRICE, HEAL_ITEM_BASE_PRICE, PERFECT_GUARD_BASE_PRICE,
};
use crate::element::Element;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponEntry {
    pub name: String,
    pub description: String,
    pub area_ids: Vec<u32>,
    pub element: Element,
}

fn weapon(name: &str, area: u32, element: Element, description: &str) -> WeaponEntry {
    WeaponEntry {
        name: name.to_string(),
        description: description.to_string(),
        area_ids: vec![area],
        element,
    }
}

pub fn standard_weapons() -> Vec<WeaponEntry> {
    use Element::{Earth, Thunder, Water};
    vec![
        // Area 1
        weapon("Decayed Stick", 1, Water, "Just a stick, but it fits the hand."),
        weapon("Traveler's Dagger", 1, Thunder, "Light and easy to handle."),
        weapon("Apprentice Spear", 1, Earth, "Simple, with a comfortable reach."),
        weapon("Windcutter Bow", 1, Water, "Quick to draw and loose."),
        // Area 2
        weapon("Chipped Sword", 2, Thunder, "Nicked, but still sharp enough."),
        weapon("Iron-Banded Staff", 2, Earth, "Evenly weighted for heavy blows."),
        weapon("Hunter's Axe", 2, Water, "Splits firewood and skulls alike."),
        weapon("Old Longsword", 2, Thunder, "A well-worn standard blade."),
        // Area 3
        weapon("Trident Spear", 3, Earth, "Three points are better than one."),
        weapon("Flexible Whip", 3, Water, "Strikes from unexpected angles."),
        weapon("Heavy Greatsword", 3, Thunder, "Slow, but nothing stands after it lands."),
        weapon("Bone Carver", 3, Earth, "Cut from something very large."),
        // Area 4
        weapon("Pilgrim's Staff", 4, Water, "Carried across a thousand roads."),
        weapon("Curved Blade", 4, Thunder, "Made for drawing cuts."),
        weapon("Leather Sling", 4, Earth, "Any stone becomes a weapon."),
        weapon("Twin Fang Dagger", 4, Water, "A matched pair of fangs."),
        // Area 5
        weapon("Warrior's Hammer", 5, Thunder, "Crushes armor flat."),
        weapon("Long Scythe", 5, Earth, "Reaps more than wheat."),
        weapon("Iron Nunchaku", 5, Water, "Whirls faster than the eye can follow."),
        weapon("Bonecrusher Mace", 5, Thunder, "Its name is a promise."),
        // Area 6
        weapon("Cane Sword", 6, Earth, "A blade hidden in a walking stick."),
        weapon("Black Iron Javelin", 6, Thunder, "Thrown once, feared forever."),
        weapon("Crescent Ring", 6, Water, "A bladed disc that returns to the hand."),
        weapon("Heavy Machete", 6, Earth, "Clears jungle and foes alike."),
        // Area 7
        weapon("Ancient Crossbow", 7, Thunder, "Still fires true after centuries."),
        weapon("Heavy Flail", 7, Water, "Impossible to parry."),
        weapon("Steel Garrote", 7, Earth, "Silent and final."),
        // Area 8
        weapon("Siege Halberd", 8, Thunder, "Built to break castle gates."),
        weapon("Royal Ceremonial Sword", 8, Water, "Meant for parades, sharp for war."),
        weapon("Primordial Blade", 8, Earth, "Forged before the first monster woke."),
    ]
}

pub fn weapons_for_area(catalog: &[WeaponEntry], area_id: u32) -> Vec<&WeaponEntry> {
    catalog
        .iter()
        .filter(|w| w.area_ids.contains(&area_id))
        .collect()
}

/// Base shop prices before area scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPrices {
    pub element_change: u64,
    pub perfect_guard: u64,
    pub heal40: u64,
}

impl Default for ItemPrices {
    fn default() -> Self {
        Self {
            element_change: ELEMENT_CHANGE_BASE_PRICE,
            perfect_guard: PERFECT_GUARD_BASE_PRICE,
            heal40: HEAL_ITEM_BASE_PRICE,
        }
    }
}

impl ItemPrices {
    pub fn base_price(&self, kind: ItemKind) -> u64 {
        match kind {
            ItemKind::ElementChange => self.element_change,
            ItemKind::PerfectGuard => self.perfect_guard,
            ItemKind::Heal40 => self.heal40,
        }
    }
}
