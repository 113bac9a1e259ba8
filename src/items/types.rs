use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::core::constants::STARTER_WEAPON_NAME;
use crate::element::Element;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub element: Element,
    pub attack_bonus: BigInt,
}

impl Weapon {
    pub fn new(name: impl Into<String>, element: Element, attack_bonus: BigInt) -> Self {
        Self {
            name: name.into(),
            element,
            attack_bonus,
        }
    }

    /// The stick every run starts with.
    pub fn starter(element: Element) -> Self {
        Self::new(STARTER_WEAPON_NAME, element, BigInt::from(0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    /// Repaints the weapon's element for the rest of the battle.
    ElementChange,
    /// Nullifies the next enemy hit and grants a guard counter.
    PerfectGuard,
    /// Restores 40% of max HP.
    Heal40,
}

/// Shop order.
pub const ALL_ITEM_KINDS: [ItemKind; 3] = [
    ItemKind::ElementChange,
    ItemKind::PerfectGuard,
    ItemKind::Heal40,
];

impl ItemKind {
    pub fn display_name(self) -> &'static str {
        match self {
            ItemKind::ElementChange => "Weapon Paint",
            ItemKind::PerfectGuard => "Old Steel Shield",
            ItemKind::Heal40 => "Healing Draught",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ItemKind::ElementChange => "Changes your weapon's element until the battle ends.",
            ItemKind::PerfectGuard => "Completely blocks the next enemy attack.",
            ItemKind::Heal40 => "Restores 40% of max HP.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub name: String,
}

impl Item {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            name: kind.display_name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItem {
    pub item: Item,
    pub price: BigInt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_new_uses_display_name() {
        let item = Item::new(ItemKind::PerfectGuard);
        assert_eq!(item.kind, ItemKind::PerfectGuard);
        assert_eq!(item.name, "Old Steel Shield");
    }

    #[test]
    fn test_starter_weapon_has_no_bonus() {
        let weapon = Weapon::starter(Element::Thunder);
        assert_eq!(weapon.name, STARTER_WEAPON_NAME);
        assert_eq!(weapon.element, Element::Thunder);
        assert_eq!(weapon.attack_bonus, BigInt::from(0));
    }
}
