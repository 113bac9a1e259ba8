//! Per-area event rolls and the lookahead window.

use rand::Rng;

use super::types::{EventKind, UpcomingEvent};
use crate::core::constants::UPCOMING_EVENT_WINDOW;
use crate::element::roll_element;
use crate::rules::GameRules;
use crate::zones::boss_for_area;

/// Event kind for `step` of `area_id`. The last step is always the boss.
pub fn roll_event(rules: &GameRules, area_id: u32, step: u32, rng: &mut impl Rng) -> EventKind {
    if step >= rules.steps_per_area {
        return EventKind::Boss;
    }

    let weights = rules.area(area_id).events;
    let roll: f64 = rng.gen();
    if roll < weights.battle {
        EventKind::Battle
    } else if roll < weights.battle + weights.treasure {
        EventKind::Treasure
    } else {
        EventKind::Shop
    }
}

/// Rolls the whole step sequence for an area once, on entry.
///
/// Battle slots get an element from the area distribution; the boss slot uses
/// the catalog boss's element when there is one.
pub fn generate_area_events(
    rules: &GameRules,
    area_id: u32,
    rng: &mut impl Rng,
) -> Vec<UpcomingEvent> {
    let area = rules.area(area_id);
    let distribution = area.element_distribution.as_array();

    (1..=rules.steps_per_area)
        .map(|step| match roll_event(rules, area_id, step, rng) {
            EventKind::Battle => UpcomingEvent::Battle {
                enemy_element: roll_element(&distribution, rng),
            },
            EventKind::Treasure => UpcomingEvent::Treasure,
            EventKind::Shop => UpcomingEvent::Shop,
            EventKind::Boss => UpcomingEvent::Boss {
                enemy_element: boss_for_area(&rules.monsters, area_id)
                    .map(|b| b.element)
                    .unwrap_or_else(|| roll_element(&distribution, rng)),
            },
        })
        .collect()
}

/// Up to three committed events strictly after `current_step`, never past
/// the end of the area.
pub fn generate_upcoming_events(
    area_events: &[UpcomingEvent],
    current_step: u32,
) -> Vec<UpcomingEvent> {
    let start = (current_step as usize).min(area_events.len());
    let end = (start + UPCOMING_EVENT_WINDOW).min(area_events.len());
    area_events[start..end].to_vec()
}
