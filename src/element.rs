//! Element affinity triangle.
//!
//! Three elements in a closed cycle: Water beats Earth, Earth beats Thunder,
//! Thunder beats Water. Same element is neutral.

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Water,
    Earth,
    Thunder,
}

/// Every element in canonical order.
pub const ALL_ELEMENTS: [Element; 3] = [Element::Water, Element::Earth, Element::Thunder];

impl Element {
    pub fn name(self) -> &'static str {
        match self {
            Element::Water => "Water",
            Element::Earth => "Earth",
            Element::Thunder => "Thunder",
        }
    }

    /// The element this one deals double damage to.
    pub fn beats(self) -> Element {
        match self {
            Element::Water => Element::Earth,
            Element::Earth => Element::Thunder,
            Element::Thunder => Element::Water,
        }
    }

    /// The element that deals double damage to this one.
    pub fn beaten_by(self) -> Element {
        match self {
            Element::Water => Element::Thunder,
            Element::Earth => Element::Water,
            Element::Thunder => Element::Earth,
        }
    }

    /// Array index, matching `ALL_ELEMENTS` order.
    pub fn index(self) -> usize {
        match self {
            Element::Water => 0,
            Element::Earth => 1,
            Element::Thunder => 2,
        }
    }

    /// Uniformly random element.
    pub fn random(rng: &mut impl Rng) -> Element {
        ALL_ELEMENTS[rng.gen_range(0..ALL_ELEMENTS.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Advantage {
    Advantage,
    Disadvantage,
    Neutral,
}

/// How an attack of `attacker` element lands on a `defender` element.
pub fn advantage(attacker: Element, defender: Element) -> Advantage {
    if attacker == defender {
        Advantage::Neutral
    } else if attacker.beats() == defender {
        Advantage::Advantage
    } else {
        Advantage::Disadvantage
    }
}

/// Damage multiplier for an affinity: 2.0 / 0.1 / 1.0.
pub fn multiplier(advantage: Advantage) -> f64 {
    match advantage {
        Advantage::Advantage => 2.0,
        Advantage::Disadvantage => 0.1,
        Advantage::Neutral => 1.0,
    }
}

/// Integer form of `multiplier`: (numerator, divisor).
///
/// Damage code multiplies by the numerator then divides by the divisor, so the
/// 0.1 case becomes an integer divide by 10.
pub fn multiplier_ratio(advantage: Advantage) -> (u32, u32) {
    match advantage {
        Advantage::Advantage => (2, 1),
        Advantage::Disadvantage => (1, 10),
        Advantage::Neutral => (1, 1),
    }
}

/// Picks an element from a weighted distribution indexed like `ALL_ELEMENTS`.
///
/// Falls back to the last element when rounding leaves the roll past the
/// cumulative total.
pub fn roll_element(distribution: &[f64; 3], rng: &mut impl Rng) -> Element {
    let roll: f64 = rng.gen();
    let mut cumulative = 0.0;
    for element in ALL_ELEMENTS {
        cumulative += distribution[element.index()];
        if roll < cumulative {
            return element;
        }
    }
    ALL_ELEMENTS[ALL_ELEMENTS.len() - 1]
}
