//! Monster catalog: normal spawns plus exactly one boss per area.

use serde::{Deserialize, Serialize};

use crate::element::Element;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterEntry {
    pub name: String,
    pub description: String,
    pub area_ids: Vec<u32>,
    pub element: Element,
    pub is_boss: bool,
}

impl MonsterEntry {
    pub fn appears_in(&self, area_id: u32) -> bool {
        self.area_ids.contains(&area_id)
    }
}

fn monster(name: &str, area: u32, element: Element, description: &str) -> MonsterEntry {
    MonsterEntry {
        name: name.to_string(),
        description: description.to_string(),
        area_ids: vec![area],
        element,
        is_boss: false,
    }
}

fn boss(name: &str, area: u32, element: Element, description: &str) -> MonsterEntry {
    MonsterEntry {
        is_boss: true,
        ..monster(name, area, element, description)
    }
}

pub fn standard_monsters() -> Vec<MonsterEntry> {
    use Element::{Earth, Thunder, Water};
    vec![
        // Area 1: Grassland
        monster("Grass Hound", 1, Earth, "A nimble fanged beast that roams the plains."),
        monster("Shard Crow", 1, Thunder, "Hoards anything that glitters."),
        monster("Long Tail", 1, Water, "Balances on an absurdly long tail."),
        boss("Graze Beast", 1, Earth, "A gentle-looking giant that charges without warning."),
        // Area 2: Highlands
        monster("Crag Horn", 2, Earth, "Leaps between rocks on powerful legs."),
        monster("Sky Eye", 2, Thunder, "A floating sentinel with a metallic shell."),
        monster("Wanderer", 2, Water, "A humanoid shadow drifting along mountain paths."),
        boss("Highland Lord", 2, Thunder, "Claims the summit as its territory."),
        // Area 3: Cavern
        monster("Glow Fang", 3, Thunder, "Its fangs light up the dark."),
        monster("Silk Leg", 3, Earth, "Spins webs across the tunnels."),
        monster("Digger", 3, Thunder, "Burrows through solid stone."),
        boss("Deep Throw", 3, Earth, "Hurls boulders from the deepest chamber."),
        // Area 4: Cursed Forest
        monster("Bark Deer", 4, Earth, "Antlers of living wood."),
        monster("Vine Hand", 4, Earth, "Grasps at anything that passes."),
        monster("Spore Beast", 4, Water, "Leaves a trail of choking spores."),
        boss("Green Lord", 4, Earth, "The forest itself, given a will."),
        // Area 5: Marsh of the Dead
        monster("Mud Jaw", 5, Earth, "Waits beneath the mire."),
        monster("Gas Wisp", 5, Water, "A drifting light that lures travelers."),
        monster("Hollow Guard", 5, Thunder, "An empty suit of armor still on patrol."),
        boss("Rot Titan", 5, Earth, "A colossus grown from the marsh's dead."),
        // Area 6: Obsidian Volcano
        monster("Ash Monkey", 6, Earth, "Pelts intruders with burning cinders."),
        monster("Flare Scale", 6, Water, "Its scales steam in the heat."),
        monster("Core Worker", 6, Thunder, "A tireless automaton mining the magma."),
        boss("Lava Eater", 6, Water, "Drinks molten rock and spits steam."),
        // Area 7: Gate of the Abyss
        monster("Failed One", 7, Water, "A creature that did not survive its making."),
        monster("Mix Beast", 7, Earth, "Stitched together from many animals."),
        boss("Gate Keeper", 7, Thunder, "Nothing passes the gate unchallenged."),
        // Area 8: Demon Lord's Castle
        monster("Echo", 8, Thunder, "Repeats your every move."),
        monster("Sentry", 8, Water, "The castle's last line of watchers."),
        boss("Alpha", 8, Earth, "The first and final monster."),
    ]
}

/// Non-boss monsters that can appear in `area_id`.
pub fn monsters_for_area(catalog: &[MonsterEntry], area_id: u32) -> Vec<&MonsterEntry> {
    catalog
        .iter()
        .filter(|m| !m.is_boss && m.appears_in(area_id))
        .collect()
}

/// The boss guarding `area_id`, if the catalog has one.
pub fn boss_for_area(catalog: &[MonsterEntry], area_id: u32) -> Option<&MonsterEntry> {
    catalog.iter().find(|m| m.is_boss && m.appears_in(area_id))
}
