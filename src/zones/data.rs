//! Area tuning tables.
//!
//! Later areas have higher multipliers and a wider individual-variation
//! spread, so both average power and variance climb as the run goes on.

use serde::{Deserialize, Serialize};

use crate::element::Element;

/// Relative spawn weights per element. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementWeights {
    pub water: f64,
    pub earth: f64,
    pub thunder: f64,
}

impl ElementWeights {
    pub const fn new(water: f64, earth: f64, thunder: f64) -> Self {
        Self {
            water,
            earth,
            thunder,
        }
    }

    pub fn weight(&self, element: Element) -> f64 {
        match element {
            Element::Water => self.water,
            Element::Earth => self.earth,
            Element::Thunder => self.thunder,
        }
    }

    /// Indexed like `ALL_ELEMENTS`.
    pub fn as_array(&self) -> [f64; 3] {
        [self.water, self.earth, self.thunder]
    }

    pub fn total(&self) -> f64 {
        self.water + self.earth + self.thunder
    }
}

/// Branch weights for non-final steps. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventWeights {
    pub battle: f64,
    pub treasure: f64,
    pub shop: f64,
}

impl EventWeights {
    pub const fn new(battle: f64, treasure: f64, shop: f64) -> Self {
        Self {
            battle,
            treasure,
            shop,
        }
    }

    pub fn total(&self) -> f64 {
        self.battle + self.treasure + self.shop
    }
}

/// Individual-variation bounds for normal enemies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariationRange {
    pub min: f64,
    pub max: f64,
}

impl VariationRange {
    pub fn spread(&self) -> f64 {
        self.max - self.min
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaConfig {
    pub id: u32,
    pub name: String,
    pub hp_multiplier: f64,
    pub atk_multiplier: f64,
    pub reward_multiplier: f64,
    pub element_distribution: ElementWeights,
    pub abnormal_rate: f64,
    pub boss_multiplier: f64,
    pub individual_variation: VariationRange,
    pub events: EventWeights,
}

impl AreaConfig {
    /// Flat, unscaled area used when a lookup finds nothing.
    pub fn neutral(id: u32) -> Self {
        Self {
            id,
            name: format!("Area {id}"),
            hp_multiplier: 1.0,
            atk_multiplier: 1.0,
            reward_multiplier: 1.0,
            element_distribution: ElementWeights::new(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0),
            abnormal_rate: 0.0,
            boss_multiplier: 1.0,
            individual_variation: VariationRange { min: 1.0, max: 1.0 },
            events: EventWeights::new(1.0, 0.0, 0.0),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn area(
    id: u32,
    name: &str,
    (hp_multiplier, atk_multiplier, reward_multiplier): (f64, f64, f64),
    element_distribution: ElementWeights,
    abnormal_rate: f64,
    boss_multiplier: f64,
    (min, max): (f64, f64),
    events: EventWeights,
) -> AreaConfig {
    AreaConfig {
        id,
        name: name.to_string(),
        hp_multiplier,
        atk_multiplier,
        reward_multiplier,
        element_distribution,
        abnormal_rate,
        boss_multiplier,
        individual_variation: VariationRange { min, max },
        events,
    }
}

/// Returns the eight built-in areas.
pub fn standard_areas() -> Vec<AreaConfig> {
    let early = EventWeights::new(0.70, 0.20, 0.10);
    let late = EventWeights::new(0.75, 0.15, 0.10);
    vec![
        area(
            1,
            "Grassland",
            (1.0, 1.0, 2.0),
            ElementWeights::new(0.33, 0.33, 0.34),
            0.005,
            2.0,
            (0.85, 1.15),
            early,
        ),
        area(
            2,
            "Highlands",
            (4.0, 2.0, 6.0),
            ElementWeights::new(0.30, 0.30, 0.40),
            0.01,
            2.5,
            (0.80, 1.30),
            early,
        ),
        area(
            3,
            "Cavern",
            (15.0, 4.0, 20.0),
            ElementWeights::new(0.20, 0.20, 0.60),
            0.02,
            3.0,
            (0.75, 1.50),
            early,
        ),
        area(
            4,
            "Cursed Forest",
            (60.0, 8.0, 80.0),
            ElementWeights::new(0.20, 0.50, 0.30),
            0.04,
            3.5,
            (0.70, 1.70),
            early,
        ),
        area(
            5,
            "Marsh of the Dead",
            (300.0, 16.0, 400.0),
            ElementWeights::new(0.15, 0.55, 0.30),
            0.07,
            4.0,
            (0.65, 1.90),
            late,
        ),
        area(
            6,
            "Obsidian Volcano",
            (2_000.0, 32.0, 2_500.0),
            ElementWeights::new(0.60, 0.15, 0.25),
            0.10,
            4.5,
            (0.60, 2.10),
            late,
        ),
        area(
            7,
            "Gate of the Abyss",
            (15_000.0, 64.0, 20_000.0),
            ElementWeights::new(0.35, 0.35, 0.30),
            0.14,
            5.0,
            (0.55, 2.30),
            late,
        ),
        area(
            8,
            "Demon Lord's Castle",
            (150_000.0, 128.0, 200_000.0),
            ElementWeights::new(0.33, 0.33, 0.34),
            0.18,
            5.5,
            (0.50, 2.60),
            late,
        ),
    ]
}
